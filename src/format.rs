//! Output format types for the inboxpack library.
//!
//! This module provides library-first format types that don't depend on CLI
//! frameworks.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> inboxpack::Result<()> {
//! use inboxpack::format::{OutputFormat, write_table};
//! use inboxpack::core::{Corpus, to_table};
//!
//! let rows = to_table(&Corpus::new());
//!
//! // Write using format enum
//! write_table(&rows, "messages.csv", OutputFormat::Csv)?;
//!
//! // Or use format detection from extension
//! let format = OutputFormat::from_path("messages.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::stats::MessageRow;
use crate::error::InboxpackError;

/// Output format for the message table.
///
/// # Example
///
/// ```rust
/// use inboxpack::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("jsonl").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Comma-delimited CSV with a header row (default)
    #[default]
    Csv,

    /// JSON array of rows
    Json,

    /// JSON Lines - one JSON object per line
    ///
    /// Also known as NDJSON.
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    ///
    /// ```rust
    /// use inboxpack::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Csv.extension(), "csv");
    /// assert_eq!(OutputFormat::Jsonl.extension(), "jsonl");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    /// Detects format from a file path based on extension.
    ///
    /// ```rust
    /// use inboxpack::format::OutputFormat;
    ///
    /// let format = OutputFormat::from_path("output.ndjson").unwrap();
    /// assert_eq!(format, OutputFormat::Jsonl);
    /// assert!(OutputFormat::from_path("output.xml").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InboxpackError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(InboxpackError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: csv, json, jsonl"),
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes the table to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_table(
    rows: &[MessageRow],
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<(), InboxpackError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(rows, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(rows, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(rows, path),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Converts the table to a string in the specified format.
///
/// ```rust
/// # #[cfg(feature = "json-output")]
/// # fn example() -> inboxpack::Result<()> {
/// use inboxpack::format::{OutputFormat, to_table_string};
///
/// assert_eq!(to_table_string(&[], OutputFormat::Json)?, "[]");
/// # Ok(())
/// # }
/// ```
#[allow(unused_variables)]
pub fn to_table_string(rows: &[MessageRow], format: OutputFormat) -> Result<String, InboxpackError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(rows),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(rows),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(rows),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

#[allow(dead_code)]
fn missing_feature(format: OutputFormat) -> InboxpackError {
    InboxpackError::invalid_format(
        "output",
        format!(
            "Output format {format:?} requires the '{}' feature to be enabled",
            match format {
                OutputFormat::Csv => "csv-output",
                OutputFormat::Json | OutputFormat::Jsonl => "json-output",
            }
        ),
    )
}
