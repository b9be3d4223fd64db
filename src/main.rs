//! ClearThink CLI - decision analysis client

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use clearthink::error::{ClearThinkError, FixSuggestion};
use clearthink::store::FileStore;
use clearthink::ClearThinkConfig;

#[derive(Parser)]
#[command(name = "clearthink")]
#[command(about = "ClearThink - multi-agent decision analysis in your terminal")]
#[command(version)]
struct Cli {
    /// Override the analysis service URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Override the request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Directory for history and preferences
    #[arg(long, value_name = "DIR")]
    state_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    // Initialize tracing; warnings only by default so log lines stay out
    // of the alternate screen
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ClearThinkError> {
    let mut config = ClearThinkConfig::load()?.with_env();
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(secs) = cli.timeout {
        config.request_timeout_secs = secs;
    }

    let state_root = cli.state_dir.or_else(FileStore::default_root);
    clearthink::tui::run_tui(&config, state_root).await
}
