//! Block blob uploader
//!
//! Creates or overwrites a block blob with a single `Put Blob` request
//! authorised by a SAS token.
//!
//! API reference:
//! https://docs.microsoft.com/en-us/rest/api/storageservices/put-blob

use crate::blob::models::{ConnectionOptions, FilePayload};
use crate::blob::transport::{HttpTransport, ReqwestTransport, TransportRequest};
use crate::error::{BlobputError, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Header selecting the blob type on `Put Blob`
pub const BLOB_TYPE_HEADER: &str = "x-ms-blob-type";
pub const BLOCK_BLOB: &str = "BlockBlob";

/// The only status accepted as a successful upload
pub const EXPECTED_STATUS: StatusCode = StatusCode::CREATED;

/// Uploads files into one container of one storage account
pub struct BlobUploader {
    options: ConnectionOptions,
    transport: Arc<dyn HttpTransport>,
}

impl BlobUploader {
    /// Create an uploader; performs no I/O and accepts any option values
    pub fn new(options: ConnectionOptions, transport: Arc<dyn HttpTransport>) -> Self {
        Self { options, transport }
    }

    /// Create an uploader using a default reqwest client
    pub fn with_default_transport(options: ConnectionOptions) -> Self {
        Self::new(options, Arc::new(ReqwestTransport::new()))
    }

    pub fn account(&self) -> &str {
        &self.options.account
    }

    pub fn container(&self) -> &str {
        &self.options.container
    }

    pub fn sas(&self) -> &str {
        &self.options.sas
    }

    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    /// URL of `blob_name` in this uploader's container
    pub fn blob_url(&self, blob_name: &str) -> String {
        block_blob_url(self.account(), self.container(), blob_name, self.sas())
    }

    /// Create (or overwrite) a block blob named `file_name`
    ///
    /// Resolves with `file_name` when the service answers `201 Created`.
    /// Any other status yields [`BlobputError::UploadStatusMismatch`] with
    /// the response attached. Transport failures are returned as-is.
    pub async fn create_block_blob(&self, file: FilePayload, file_name: &str) -> Result<String> {
        let url = self.blob_url(file_name);
        let headers = put_blob_headers(&file)?;

        info!(
            "Uploading blob '{}' to {}/{} ({} bytes)",
            file_name,
            self.account(),
            self.container(),
            file.content_length
        );

        let request = TransportRequest {
            method: Method::PUT,
            url,
            headers,
            body: file.content,
        };

        let response = self.transport.send(request).await?;

        if response.status() == EXPECTED_STATUS {
            debug!("Blob '{}' created", file_name);
            Ok(file_name.to_string())
        } else {
            warn!(
                "Upload of blob '{}' returned {} instead of {}",
                file_name,
                response.status(),
                EXPECTED_STATUS
            );
            Err(BlobputError::status_mismatch(
                EXPECTED_STATUS.as_u16(),
                response,
            ))
        }
    }
}

/// Format the URL of a blob; nothing is encoded and the SAS is appended verbatim
pub fn block_blob_url(account: &str, container: &str, blob: &str, sas: &str) -> String {
    format!("https://{account}.blob.core.windows.net/{container}/{blob}{sas}")
}

fn put_blob_headers(file: &FilePayload) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_str(&file.content_type)?);
    headers.insert(CONTENT_LENGTH, HeaderValue::from(file.content_length));
    headers.insert(BLOB_TYPE_HEADER, HeaderValue::from_static(BLOCK_BLOB));
    Ok(headers)
}
