//! Corpus model and its projections.
//!
//! This module contains:
//! - [`corpus`] - [`Corpus`], [`Thread`] and the per-file [`ParsedDocument`]
//! - [`stats`] - table rows, summary and activity report
//! - [`output`] - table writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use inboxpack::core::{Corpus, summary, to_table};
//!
//! let corpus = Corpus::new();
//! assert!(to_table(&corpus).is_empty());
//! assert_eq!(summary(&corpus).total_threads, 0);
//! ```

pub mod corpus;
pub mod output;
pub mod stats;

pub use corpus::{Corpus, ParsedDocument, Thread};
pub use stats::{
    ActivityReport, DateRange, MessageRow, Summary, ThreadCount, activity, summary, to_table,
};

// Re-export Message from the crate root
pub use crate::Message;

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
