use crate::blob::transport::TransportResponse;
use thiserror::Error;

/// Main error type for blobput operations
#[derive(Debug, Error)]
pub enum BlobputError {
    #[error("The response status wasn't the expected.\nExpected: {expected}\nReceived: {received}")]
    UploadStatusMismatch {
        expected: u16,
        received: u16,
        response: Box<TransportResponse>,
    },

    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl BlobputError {
    pub fn status_mismatch(expected: u16, response: TransportResponse) -> Self {
        Self::UploadStatusMismatch {
            expected,
            received: response.status().as_u16(),
            response: Box::new(response),
        }
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::NetworkError(msg.into())
    }

    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// The response attached to a status mismatch, if any
    pub fn response(&self) -> Option<&TransportResponse> {
        match self {
            Self::UploadStatusMismatch { response, .. } => Some(response),
            _ => None,
        }
    }
}

/// Result type alias for blobput operations
pub type Result<T> = std::result::Result<T, BlobputError>;
