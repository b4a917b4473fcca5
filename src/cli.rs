//! CLI argument definitions using clap derive macros.

use clap::Parser;

/// Collect the 1000 most-starred public repositories into a CSV table.
///
/// Runs the fixed query `stars:>50` against the GitHub search API and writes
/// `github_repos_1000.csv`. Set `GITHUB_TOKEN` for the authenticated rate limit.
#[derive(Parser, Debug)]
#[command(name = "repo-harvester")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Log filter used when `RUST_LOG` is unset.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}
