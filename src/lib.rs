//! blobput - Azure Blob Storage SAS uploader
//!
//! Uploads a single file as a block blob using a pre-signed
//! Shared Access Signature, with a small CLI on top.

pub mod blob;
pub mod cli;
pub mod config;
pub mod error;
pub mod utils;

// Re-export commonly used types
pub use blob::{BlobUploader, ConnectionOptions, FilePayload};
pub use error::{BlobputError, Result};
