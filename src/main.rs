use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use calburn::cli::{self, PredictArgs};
use calburn::config::{self, ClientConfig};

#[derive(Parser)]
#[command(author, version, about = "Terminal client for the calorie burn prediction service", long_about = None)]
struct Cli {
    /// Base URL of the prediction service (overrides environment and config file)
    #[arg(long, value_name = "URL", global = true)]
    url: Option<String>,

    /// Path to a TOML config file
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a one-shot prediction from command-line flags
    Predict(PredictArgs),
    /// Collect metrics interactively and predict in a loop
    Wizard,
    /// Show the effective endpoint configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let (file_config, config_path) = ClientConfig::load(cli.config.as_deref())?;
    let endpoint = config::resolve_endpoint(cli.url.clone(), &file_config)?;
    info!(base_url = %endpoint.base_url, source = %endpoint.source, "resolved prediction endpoint");

    match &cli.command {
        Commands::Predict(args) => cli::run_predict(args, &endpoint.base_url).await,
        Commands::Wizard => cli::wizard::run(&endpoint.base_url).await,
        Commands::Config => {
            cli::show_config(&endpoint, config_path.as_deref());
            Ok(())
        }
    }
}
