//! CLI commands and argument parsing
//!
//! This module defines the command-line interface structure using clap
//! and the handlers behind each command.

use crate::blob::{block_blob_url, BlobUploader, FilePayload, ReqwestTransport};
use crate::config::{set_config_value, Config};
use crate::error::{BlobputError, Result};
use crate::utils::network::create_http_client;
use crate::utils::sanitizer::redact_sas;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "blobput")]
#[command(about = "Upload files to Azure Blob Storage with a SAS token")]
#[command(version, author)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Storage account name
    #[arg(long, global = true, env = "AZURE_STORAGE_ACCOUNT")]
    pub account: Option<String>,

    /// Container name
    #[arg(long, global = true, env = "AZURE_STORAGE_CONTAINER")]
    pub container: Option<String>,

    /// SAS token, including its leading '?'
    #[arg(long, global = true, env = "AZURE_STORAGE_SAS_TOKEN", hide_env_values = true)]
    pub sas: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a file as a block blob
    Upload {
        /// File to upload
        path: PathBuf,
        /// Blob name (defaults to the file name)
        #[arg(long, short)]
        name: Option<String>,
        /// Content type (guessed from the extension when omitted)
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Print the URL a blob would be uploaded to, with the signature redacted
    Url {
        /// Blob name
        name: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Set a value in the configuration file
    Set {
        /// Key (account, container, sas_token, debug, connect_timeout_secs, request_timeout_secs)
        key: String,
        /// Value
        value: String,
    },
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if self.debug {
            config.debug = true;
        }
        if let Some(account) = &self.account {
            config.account = account.clone();
        }
        if let Some(container) = &self.container {
            config.container = container.clone();
        }
        if let Some(sas) = &self.sas {
            config.sas_token = sas.clone();
        }
    }

    pub async fn execute(self, mut config: Config) -> Result<()> {
        self.apply_overrides(&mut config);

        match self.command {
            Commands::Upload {
                path,
                name,
                content_type,
            } => execute_upload(&config, &path, name, content_type).await,
            Commands::Url { name } => execute_url(&config, &name),
            Commands::Config { command } => execute_config_command(command, config).await,
        }
    }
}

/// Build an uploader from validated configuration
pub fn create_uploader(config: &Config) -> Result<BlobUploader> {
    config.validate()?;
    let client = create_http_client(&config.network_config())?;
    Ok(BlobUploader::new(
        config.connection_options(),
        Arc::new(ReqwestTransport::with_client(client)),
    ))
}

/// Blob name to use when none is given: the file name of the path
pub fn default_blob_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_string())
        .ok_or_else(|| {
            BlobputError::invalid_argument(format!(
                "Cannot derive a blob name from '{}', use --name",
                path.display()
            ))
        })
}

async fn execute_upload(
    config: &Config,
    path: &Path,
    name: Option<String>,
    content_type: Option<String>,
) -> Result<()> {
    let uploader = create_uploader(config)?;
    let blob_name = match name {
        Some(name) => name,
        None => default_blob_name(path)?,
    };

    let mut payload = FilePayload::from_path(path).await?;
    if let Some(content_type) = content_type {
        payload = payload.with_content_type(content_type);
    }
    debug!(
        "Read {} ({} bytes, {})",
        path.display(),
        payload.content_length,
        payload.content_type
    );

    let uploaded = uploader.create_block_blob(payload, &blob_name).await?;
    info!("Upload of '{}' complete", uploaded);
    println!("{}", uploaded);

    Ok(())
}

/// Blob URL for display, built from an already redacted SAS
pub fn redacted_blob_url(config: &Config, name: &str) -> String {
    block_blob_url(
        &config.account,
        &config.container,
        name,
        &redact_sas(&config.sas_token),
    )
}

fn execute_url(config: &Config, name: &str) -> Result<()> {
    config.validate()?;
    println!("{}", redacted_blob_url(config, name));
    Ok(())
}

async fn execute_config_command(command: ConfigCommands, config: Config) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let contents = toml::to_string_pretty(&config.redacted())?;
            print!("{}", contents);
        }
        ConfigCommands::Path => {
            println!("{}", Config::get_config_path()?.display());
        }
        ConfigCommands::Set { key, value } => {
            let path = Config::get_config_path()?;
            set_config_value(&path, &key, &value).await?;
            println!("Set {} in {}", key, path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_blob_name_uses_file_name() {
        assert_eq!(
            default_blob_name(Path::new("/tmp/reports/q3.pdf")).unwrap(),
            "q3.pdf"
        );
        assert!(default_blob_name(Path::new("/")).is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "blobput",
            "--account",
            "flagacct",
            "--sas",
            "?sig=flag",
            "upload",
            "report.pdf",
            "--name",
            "r.pdf",
        ]);

        let mut config = Config {
            account: "fileacct".to_string(),
            container: "files".to_string(),
            ..Config::default()
        };
        cli.apply_overrides(&mut config);

        assert_eq!(config.account, "flagacct");
        assert_eq!(config.container, "files");
        assert_eq!(config.sas_token, "?sig=flag");
        match cli.command {
            Commands::Upload { path, name, .. } => {
                assert_eq!(path, PathBuf::from("report.pdf"));
                assert_eq!(name.as_deref(), Some("r.pdf"));
            }
            _ => panic!("expected upload command"),
        }
    }

    #[test]
    fn test_redacted_blob_url_hides_signature() {
        let mut config = Config {
            account: "acct".to_string(),
            container: "c".to_string(),
            sas_token: "&sv=1&sig=SECRET".to_string(),
            ..Config::default()
        };
        assert_eq!(
            redacted_blob_url(&config, "a.txt"),
            "https://acct.blob.core.windows.net/c/a.txt&sv=1&sig=REDACTED"
        );

        config.sas_token = "?sv=1&sig=SECRET".to_string();
        let url = redacted_blob_url(&config, "what?sig=x.txt");
        assert!(!url.contains("SECRET"), "signature leaked: {url}");
        assert!(url.ends_with("?sv=1&sig=REDACTED"));
    }

    #[test]
    fn test_create_uploader_requires_valid_config() {
        assert!(create_uploader(&Config::default()).is_err());

        let config = Config {
            account: "acct".to_string(),
            container: "files".to_string(),
            sas_token: "?sig=x".to_string(),
            ..Config::default()
        };
        let uploader = create_uploader(&config).unwrap();
        assert_eq!(uploader.account(), "acct");
        assert_eq!(uploader.sas(), "?sig=x");
    }
}
