//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! ```rust
//! use clap::Parser;
//! use inboxpack::cli::Args;
//!
//! let args = Args::parse_from(["inboxpack", "export/", "-f", "jsonl", "--top", "3"]);
//! assert_eq!(args.top, 3);
//! assert_eq!(args.output_path().to_str(), Some("messages.jsonl"));
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{AggregatorConfig, NormalizerConfig};

/// Default output file stem; the extension follows `--format`.
pub const DEFAULT_OUTPUT_STEM: &str = "messages";

/// Extract messages and activity statistics from a Facebook Messenger
/// HTML export.
#[derive(Parser, Debug, Clone)]
#[command(name = "inboxpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    inboxpack facebook-export/
    inboxpack facebook-export/ -o messages.json -f json
    inboxpack facebook-export/ --summary-only --top 10
    RUST_LOG=inboxpack=debug inboxpack facebook-export/")]
pub struct Args {
    /// Root of the unpacked export
    pub input: PathBuf,

    /// Path to output file [default: messages.<format>]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Print the summary without writing the table
    #[arg(long)]
    pub summary_only: bool,

    /// Number of senders and threads listed in the report
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub top: usize,

    /// Parse files one at a time
    #[arg(long)]
    pub sequential: bool,

    /// Extra chrono timestamp format, tried after the built-in ones
    #[arg(long = "timestamp-format", value_name = "FORMAT")]
    pub timestamp_formats: Vec<String>,

    /// Re-decode Latin-1 mojibake in extracted text
    #[arg(long)]
    pub repair_mojibake: bool,

    /// Print file progress and log discarded records at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,
}

impl Args {
    /// Builds the aggregator configuration from the flags.
    pub fn aggregator_config(&self) -> AggregatorConfig {
        let mut config = AggregatorConfig::new()
            .with_parallel(!self.sequential)
            .with_normalizer(NormalizerConfig::new().with_repair_mojibake(self.repair_mojibake));
        for format in &self.timestamp_formats {
            config = config.with_timestamp_format(format.clone());
        }
        config
    }

    /// Output path. Without `--output` it is `messages.<ext>` for the
    /// chosen format.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => {
                let lib_format: crate::format::OutputFormat = self.format.into();
                PathBuf::from(DEFAULT_OUTPUT_STEM).with_extension(lib_format.extension())
            }
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-delimited CSV with header (default)
    #[default]
    Csv,

    /// JSON array of rows
    Json,

    /// JSON Lines - one row per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
