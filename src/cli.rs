//! Command line interface definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for classification results
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per result
    Text,
    /// One JSON object per line
    Json,
}

/// Classify DNS trace sequences against a labelled corpus
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Corpus JSON file with labelled training sequences
    pub corpus: PathBuf,

    /// JSON file with query sequences to classify
    pub queries: Option<PathBuf>,

    /// Number of nearest neighbors taking part in the vote
    #[arg(short, long = "neighbors", default_value_t = 1)]
    pub k: usize,

    /// Keep exactly k neighbors instead of including all distance ties
    #[arg(long)]
    pub exact_k: bool,

    /// Ignore corpus members farther away than this distance
    #[arg(long)]
    pub distance_threshold: Option<usize>,

    /// Classify every corpus member against the rest of the corpus
    #[arg(long, conflicts_with = "queries")]
    pub cross_validate: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print per-label quality statistics as CSV after the results
    #[arg(long)]
    pub stats: bool,

    /// TOML file overriding the edit-operation cost parameters
    #[arg(long, value_name = "FILE")]
    pub cost_config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
