use actorhub::commands::{Command, execute};
use actorhub::{CancellationToken, Client, ClientConfig};
use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use std::time::Duration;

/// actorhub - ActorHub.ai API client
///
/// Verify images against protected identities, check consent, browse the
/// marketplace and manage licenses. Responses are printed as JSON.
///
/// The API key is read from --api-key or the ACTORHUB_API_KEY environment variable.
///
/// Examples:
///   actorhub verify --url https://example.com/face.jpg
///   actorhub consent --file face.jpg --platform runway --intended-use video
#[derive(Parser, Debug)]
#[command(author, version = env!("ACTORHUB_CLI_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// ActorHub API key
    #[arg(long, env = "ACTORHUB_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// API base URL (defaults to https://api.actorhub.ai)
    #[arg(long, env = "ACTORHUB_BASE_URL", value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    timeout: Option<u64>,

    /// Attempts per request for rate-limit and server errors
    #[arg(long, value_name = "N", global = true)]
    max_retries: Option<u32>,
}

impl Cli {
    fn client_config(&self) -> Result<ClientConfig> {
        let api_key = self
            .api_key
            .clone()
            .context("An API key is required: pass --api-key or set ACTORHUB_API_KEY")?;

        let mut config = ClientConfig::new(api_key);
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(max_retries) = self.max_retries {
            config = config.with_max_retries(max_retries);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = cli.client_config()?;
    debug!("Using API at {}", config.base_url);

    let cancel = CancellationToken::new();
    let client = Client::with_config(config)
        .context("Failed to create ActorHub client")?
        .with_cancellation(cancel.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupted, cancelling request");
            cancel.cancel();
        }
    });

    let output = execute(&client, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
