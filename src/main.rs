//! # ctgpdx CLI
//!
//! Developer harness around the ctgpdx library. It runs the extraction
//! pipeline against a saved copy of the download page and prints what was
//! found.
//!
//! ## Subcommands
//!
//! - `extract`: run one update cycle and print the fields (text or JSON)
//! - `normalize`: print the normalized page text the rules run against
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

mod telemetry;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use ctgpdx::consts::URL;
use ctgpdx::coordinator::{
    CoordinatorConfig, FileSource, PageSource, StaticSource, UpdateCoordinator,
};
use ctgpdx::extract::normalize_html;
use ctgpdx::health::LogNotifier;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::instrument;

#[derive(Parser)]
#[command(author, version, about = "Extract release information from the CTGP Deluxe download page", long_about = None)]
struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract version, sizes and release date from a saved page
    Extract(ExtractArgs),

    /// Print the normalized text of a saved page
    Normalize(NormalizeArgs),
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Saved download page (reads stdin when omitted)
    path: Option<PathBuf>,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Address the page was saved from
    #[arg(long, default_value = URL)]
    url: String,

    /// Read timeout in seconds
    #[arg(short, long, default_value = "10")]
    timeout: u64,
}

#[derive(Args, Debug)]
struct NormalizeArgs {
    /// Saved download page (reads stdin when omitted)
    path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing_subscriber(cli.log_file.as_deref())?;

    match cli.command {
        Some(Commands::Extract(args)) => {
            extract_command(args).await?;
        }
        Some(Commands::Normalize(args)) => {
            normalize_command(args).await?;
        }
        None => {
            // If no command is provided, show help
            let _ = Cli::parse_from(["ctgpdx", "--help"]);
        }
    }

    Ok(())
}

async fn read_stdin() -> anyhow::Result<String> {
    let mut html = String::new();
    tokio::io::stdin()
        .read_to_string(&mut html)
        .await
        .context("Failed to read page from stdin")?;
    Ok(html)
}

#[instrument]
async fn extract_command(args: ExtractArgs) -> anyhow::Result<()> {
    let config = CoordinatorConfig::builder()
        .url(args.url.clone())
        .fetch_timeout(Duration::from_secs(args.timeout))
        .build();
    config.validate()?;

    let output = match &args.path {
        Some(path) => run_cycle(FileSource::new(path), config, &args.format).await,
        None => run_cycle(StaticSource::new(read_stdin().await?), config, &args.format).await,
    };

    let location = args
        .path
        .as_ref()
        .map_or_else(|| "stdin".to_string(), |path| path.display().to_string());
    println!("{}", output.with_context(|| format!("Update failed for {}", location))?);

    Ok(())
}

/// Run one update cycle and render the fields
async fn run_cycle<S: PageSource>(
    source: S,
    config: CoordinatorConfig,
    format: &str,
) -> ctgpdx::Result<String> {
    let url = config.url.clone();
    let mut coordinator = UpdateCoordinator::with_config(config, source, LogNotifier);

    let data = coordinator.refresh().await?;

    let output = match format {
        "json" => {
            let json = serde_json::json!({
                "url": url,
                "fields": data,
            });
            serde_json::to_string_pretty(&json)?
        }
        _ => {
            let mut lines = vec![format!("Source: {}", url)];
            for (field, value) in data.iter() {
                lines.push(format!("{}: {}", field, value));
            }
            lines.join("\n")
        }
    };

    Ok(output)
}

#[instrument]
async fn normalize_command(args: NormalizeArgs) -> anyhow::Result<()> {
    let html = match &args.path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => read_stdin().await?,
    };

    println!("{}", normalize_html(&html));

    Ok(())
}
