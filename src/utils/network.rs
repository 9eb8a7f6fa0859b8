use crate::error::{BlobputError, Result};
use reqwest::Client;
use std::time::Duration;

/// Configuration for the HTTP client used by the CLI
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(300),
            user_agent: format!("blobput/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Create an HTTP client with the configured timeouts
pub fn create_http_client(config: &NetworkConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| BlobputError::network(format!("Failed to create HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_agent_carries_version() {
        let config = NetworkConfig::default();
        assert!(config.user_agent.starts_with("blobput/"));
        assert!(config.user_agent.ends_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_create_http_client() {
        let config = NetworkConfig {
            connect_timeout: Duration::from_secs(1),
            request_timeout: Duration::from_secs(2),
            ..NetworkConfig::default()
        };
        assert!(create_http_client(&config).is_ok());
    }
}
