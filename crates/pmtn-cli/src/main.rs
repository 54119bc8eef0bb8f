use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod clean;
mod fetch;
mod report;

#[derive(Debug, Parser)]
#[command(name = "pmtn-cli")]
#[command(about = "PUBG Mobile traffic-news pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect news for every configured keyword and append to the store.
    Fetch(fetch::FetchArgs),
    /// Re-run the keyword classifier over the store, dropping irrelevant rows.
    Clean(clean::CleanArgs),
    /// Build and deliver the Slack digest for the recent window.
    Report(report::ReportArgs),
}

/// Exit code for any failed command. Distinct from `1`, which `fetch` uses
/// to signal "nothing new" to the scheduled workflow.
const EXIT_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match pmtn_core::load_app_config_from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let result = match cli.command {
        Commands::Fetch(args) => fetch::run(&args, &config).await,
        Commands::Clean(args) => clean::run(&args, &config).map(|()| ExitCode::SUCCESS),
        Commands::Report(args) => report::run(&args, &config)
            .await
            .map(|()| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = format!("{e:#}"), "command failed");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
