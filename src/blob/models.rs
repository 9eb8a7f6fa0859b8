//! Data models for blob uploads
//!
//! This module defines the connection options an uploader is built from
//! and the payload handed to each upload.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Connection parameters for a single storage container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionOptions {
    pub account: String,
    pub container: String,
    /// Query-string credential appended verbatim to blob URLs (e.g. `?sv=...&sig=...`)
    pub sas: String,
}

impl ConnectionOptions {
    pub fn new<A, C, S>(account: A, container: C, sas: S) -> Self
    where
        A: Into<String>,
        C: Into<String>,
        S: Into<String>,
    {
        Self {
            account: account.into(),
            container: container.into(),
            sas: sas.into(),
        }
    }
}

/// File content to upload as a block blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub content: Vec<u8>,
    pub content_type: String,
    pub content_length: u64,
}

impl FilePayload {
    /// Build a payload whose length is taken from the content
    pub fn new<T: Into<String>>(content: Vec<u8>, content_type: T) -> Self {
        let content_length = content.len() as u64;
        Self {
            content,
            content_type: content_type.into(),
            content_length,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        Ok(Self::new(content, content_type))
    }

    /// Replace the guessed content type
    pub fn with_content_type<T: Into<String>>(mut self, content_type: T) -> Self {
        self.content_type = content_type.into();
        self
    }
}
