//! Summarize the star distribution of a collected repository table.
//!
//! Prints descriptive statistics of the `stars` column followed by a
//! linear-scale and a log-scale histogram.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use repo_harvester::config::DEFAULT_OUTPUT_PATH;
use repo_harvester::{Histogram, describe, read_csv};

/// Width of the longest histogram bar, in characters.
const BAR_WIDTH: usize = 50;

/// Describe the star distribution of a repository table.
#[derive(Parser, Debug)]
#[command(name = "repo-stats")]
#[command(author, version, about)]
struct StatsArgs {
    /// Table written by repo-harvester
    #[arg(default_value = DEFAULT_OUTPUT_PATH)]
    path: PathBuf,

    /// Number of histogram bins (1-500)
    #[arg(short, long, default_value_t = 50, value_parser = clap::value_parser!(u16).range(1..=500))]
    bins: u16,
}

fn main() -> Result<()> {
    let args = StatsArgs::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let records = read_csv(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let stars: Vec<u64> = records.iter().map(|r| r.stars).collect();

    let Some(summary) = describe(&stars) else {
        println!("{} has no rows; nothing to describe.", args.path.display());
        return Ok(());
    };

    println!("Descriptive statistics:");
    print!("{summary}");
    println!("Name: stars");
    println!();

    let bins = usize::from(args.bins);
    if let Some(hist) = Histogram::linear(&stars, bins) {
        println!(
            "{}",
            hist.render(
                "Distribution of repository stars",
                "Stars",
                "Repositories",
                BAR_WIDTH
            )
        );
    }
    match Histogram::log10(&stars, bins) {
        Some(hist) => println!(
            "{}",
            hist.render(
                "Distribution of repository stars (log scale)",
                "Stars (log)",
                "Repositories",
                BAR_WIDTH
            )
        ),
        None => println!("No positive star counts; log-scale histogram skipped."),
    }

    Ok(())
}
