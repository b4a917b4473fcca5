//! Repo Harvester Core Library
//!
//! This library collects the most-starred public repositories from the GitHub
//! search API, normalizes them into a flat table, and summarizes the
//! distribution of their star counts.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`fetch`] - HTTP executor with rate-limit and server-error backoff
//! - [`collect`] - Paginated collector and record normalization
//! - [`dataset`] - First-seen-wins deduplicating assembler
//! - [`output`] - CSV persistence and read-back
//! - [`analysis`] - Descriptive statistics and histograms
//! - [`config`] - Explicit collector configuration

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod analysis;
pub mod collect;
pub mod config;
pub mod dataset;
pub mod fetch;
pub mod output;
mod user_agent;

// Re-export commonly used types
pub use analysis::{Histogram, Summary, describe};
pub use collect::{Collector, Record};
pub use config::CollectorConfig;
pub use dataset::{Dataset, assemble};
pub use fetch::{
    ApiClient, DEFAULT_MAX_ATTEMPTS, FetchError, RetryDecision, RetryPolicy, Sleeper,
    TokioSleeper, Verdict, classify,
};
pub use output::{OutputError, read_csv, write_csv};
