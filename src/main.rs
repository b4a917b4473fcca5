//! CLI entry point for the repository collector.

use anyhow::{Context, Result};
use clap::Parser;
use repo_harvester::{ApiClient, Collector, CollectorConfig, assemble, write_csv};
use tracing::{debug, info};

mod cli;

use cli::Args;

/// Rows echoed after a successful run.
const PREVIEW_ROWS: usize = 5;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.default_log_level()));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let config = CollectorConfig::from_env();
    debug!(?config, "configuration loaded");
    info!(
        query = config.query(),
        authenticated = config.token().is_some(),
        "collecting repositories"
    );

    let client = ApiClient::new(&config).context("failed to initialize search API client")?;
    let collector = Collector::new(client, &config);

    let records = collector
        .collect(config.query())
        .await
        .context("repository collection aborted")?;

    let dataset = assemble(records);
    let output_path = config.output_path();
    write_csv(output_path, &dataset)
        .with_context(|| format!("failed to save {}", output_path.display()))?;

    let (rows, columns) = dataset.shape();
    info!(rows, columns, path = %output_path.display(), "saved");

    for record in dataset.records().iter().take(PREVIEW_ROWS) {
        info!(
            full_name = %record.full_name,
            stars = record.stars,
            language = %record.language,
            license = %record.license,
            "preview"
        );
    }

    Ok(())
}
