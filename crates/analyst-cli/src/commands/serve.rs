//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use analyst_core::completion::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use analyst_core::{CompletionClient, CompletionConfig};
use analyst_web::{ServerConfig, DEFAULT_MAX_UPLOAD_BYTES};

#[derive(Args)]
pub struct ServeArgs {
    /// AI Pipe API token
    #[arg(long, env = "AIPIPE_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Chat-completion endpoint
    #[arg(long, env = "AIPIPE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Request timeout for the completion call, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Maximum accepted upload size, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "8000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl ServeArgs {
    /// Validate the credential and build the completion client.
    pub fn completion_client(&self) -> Result<CompletionClient> {
        let config = CompletionConfig::new(self.token.as_str())?
            .with_endpoint(self.endpoint.as_str())
            .with_timeout(Duration::from_secs(self.timeout_secs));
        Ok(CompletionClient::new(config)?)
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    // Fails before binding when the token is missing or blank
    let client = Arc::new(args.completion_client()?);
    let config = args.server_config();
    tracing::info!(
        endpoint = client.config().endpoint(),
        timeout_secs = args.timeout_secs,
        "Completion client ready"
    );

    println!();
    println!("  {} {}", "Analyst".cyan().bold(), "Web Server".bold());
    println!();
    println!(
        "  {}   http://{}:{}/api",
        "Upload".green(),
        config.host,
        config.port
    );
    println!(
        "  {}  http://{}:{}/analyze",
        "Analyze".green(),
        config.host,
        config.port
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    analyst_web::run_server(client, config).await?;

    Ok(())
}
