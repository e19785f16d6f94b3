//! CLI enum types for the convert run.

use clap::ValueEnum;

/// How the end-of-run summary is printed.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum SummaryFormat {
    /// Human-readable table on stdout (default)
    #[default]
    Text,
    /// A single JSON document on stdout
    Json,
}
