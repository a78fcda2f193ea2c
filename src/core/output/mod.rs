//! Table writers.
//!
//! This module provides writers for the projected message table:
//! - [`write_csv`] / [`to_csv`] - comma-delimited with header row - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of rows - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one row per line - requires `json-output` feature
//!
//! # Choosing a Format
//!
//! | Format | Use Case |
//! |--------|----------|
//! | CSV | Spreadsheets, dataframe loaders |
//! | JSON | Dashboards loading the whole table at once |
//! | JSONL | Streaming ingestion, large exports |
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> inboxpack::Result<()> {
//! use inboxpack::core::output::{write_csv, to_jsonl};
//! use inboxpack::core::{Corpus, to_table};
//!
//! let rows = to_table(&Corpus::new());
//! write_csv(&rows, "messages.csv")?;
//! let jsonl = to_jsonl(&rows)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{CSV_HEADER, REACTION_SEPARATOR, to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
