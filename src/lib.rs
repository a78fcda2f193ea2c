//! # Inboxpack
//!
//! A Rust library for turning Facebook Messenger HTML exports into a typed
//! stream of message records plus activity statistics.
//!
//! ## Overview
//!
//! A "Download Your Information" export is a tree of loosely structured,
//! inconsistently encoded HTML files. Inboxpack walks the tree, pulls every
//! authored message out of each document, and accumulates them into a
//! [`Corpus`](core::Corpus) that can be projected into a flat table
//! (CSV / JSON / JSONL) or summarized.
//!
//! Extraction is salvage-oriented: a bad file, a malformed section or an
//! unrecognized timestamp costs only that record, never the run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inboxpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let aggregator = CorpusAggregator::new()?;
//!     let corpus = aggregator.parse_directory("facebook-export".as_ref())?;
//!
//!     let stats = summary(&corpus);
//!     println!("{} messages in {} threads", stats.total_messages, stats.total_threads);
//!
//!     write_table(&to_table(&corpus), "messages.csv", OutputFormat::Csv)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Single Documents
//!
//! ```rust
//! use inboxpack::parsing::{DocumentExtractor, MessageAssembler};
//!
//! let html = r#"<h1>Team</h1>
//! <section class="_a6-g"><h2>Alice</h2>
//!   <div class="_2ph_ _a6-p"><div>hello</div></div>
//!   <footer><div class="_a72d">Jan 1, 2023 9:00:00 am</div></footer>
//! </section>"#;
//!
//! let doc = DocumentExtractor::new()?.extract(html)?;
//! let assembler = MessageAssembler::new();
//! let messages: Vec<_> = doc
//!     .bundles
//!     .iter()
//!     .filter_map(|b| assembler.assemble(b, &doc.thread_title, "inline.html"))
//!     .collect();
//! assert_eq!(messages[0].content(), "hello");
//! # Ok::<(), inboxpack::InboxpackError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - per-document pipeline
//!   - [`TextNormalizer`](parsing::TextNormalizer), [`TimestampParser`](parsing::TimestampParser)
//!   - [`MarkupProfile`](parsing::MarkupProfile) - versioned selector table
//!   - [`DocumentExtractor`](parsing::DocumentExtractor), [`MessageAssembler`](parsing::MessageAssembler)
//! - [`discovery`] - [`LayoutProbe`](discovery::LayoutProbe)s locating files in an export tree
//! - [`aggregator`] - [`CorpusAggregator`](aggregator::CorpusAggregator), [`ParseReport`](aggregator::ParseReport)
//! - [`core`] - [`Corpus`](core::Corpus), table rows, summary, activity, writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) and dispatch
//! - [`config`] - builder-style configuration
//! - [`progress`] - progress callbacks
//! - [`error`] - [`InboxpackError`], [`Result`]
//! - [`prelude`] - convenient re-exports

pub mod aggregator;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod discovery;
pub mod error;
pub mod format;
#[cfg(feature = "cli")]
pub mod logging;
pub mod message;
pub mod parsing;
pub mod progress;

// Re-export the main types at the crate root for convenience
pub use error::{InboxpackError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use inboxpack::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;

    // Error types
    pub use crate::error::{InboxpackError, Result};

    // Pipeline
    pub use crate::aggregator::{CorpusAggregator, ParseReport};
    pub use crate::parsing::{DocumentExtractor, MarkupProfile, MessageAssembler, TextNormalizer, TimestampParser};

    // Configuration
    pub use crate::config::{AggregatorConfig, ExtractorConfig, NormalizerConfig, UnicodeForm};

    // Corpus and projections
    pub use crate::core::{
        ActivityReport, Corpus, MessageRow, Summary, Thread, activity, summary, to_table,
    };

    // Output
    pub use crate::format::{OutputFormat, to_table_string, write_table};
}
