//! Utility functions module
//!
//! This module contains HTTP client construction and SAS redaction helpers.

pub mod network;
pub mod sanitizer;

pub use network::*;
pub use sanitizer::*;
