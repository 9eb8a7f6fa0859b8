//! Azure Blob Storage uploads
//!
//! This module provides the block blob uploader, the payload and connection
//! models it works with, and the HTTP transport it sends requests through.

pub mod models;
pub mod transport;
pub mod uploader;

// Re-export commonly used types
pub use models::*;
pub use transport::{HttpTransport, ReqwestTransport, TransportRequest, TransportResponse};
pub use uploader::{block_blob_url, BlobUploader};
