//! Unified error types for inboxpack.
//!
//! This module provides a single [`InboxpackError`] enum that covers every
//! error the library can surface to a caller.
//!
//! # Error Handling Philosophy
//!
//! Extraction is salvage-oriented. Only a missing input directory aborts a
//! run; everything below that level (an unreadable file, a malformed section,
//! an unparsable timestamp) is logged and skipped by the aggregator. The
//! variants below therefore show up mostly at the edges: opening the input,
//! compiling a markup profile, and writing output.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for inboxpack operations.
///
/// # Example
///
/// ```rust
/// use inboxpack::error::Result;
/// use inboxpack::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, InboxpackError>;

/// The error type for all inboxpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InboxpackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when a discovered file cannot be read or
    /// an output file cannot be created.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The export directory handed to the aggregator does not exist.
    ///
    /// This is the only error that aborts a parsing run.
    #[error("Directory does not exist: {}", path.display())]
    DirectoryNotFound {
        /// The path that was requested
        path: PathBuf,
    },

    /// Failed to parse an export document.
    #[error("Failed to parse export document{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// A markup profile entry is not a valid CSS selector.
    #[error("Invalid selector for '{name}' ({selector}): {message}")]
    InvalidSelector {
        /// Profile field the selector belongs to (e.g. "section")
        name: &'static str,
        /// The selector text that failed to compile
        selector: String,
        /// Description from the selector parser
        message: String,
    },

    /// A single message section exceeded the configured size guard.
    #[error("Message section too large: {actual_size} bytes (maximum: {max_size} bytes)")]
    SectionTooLarge {
        /// Maximum allowed size in bytes
        max_size: usize,
        /// Actual size encountered
        actual_size: usize,
    },

    /// An unknown or unsupported format was requested.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The kind of format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kinds of parse errors that can occur.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// The document contained no recognizable markup at all
    #[error("document is empty")]
    EmptyDocument,
    /// Generic parsing error
    #[error("{0}")]
    Other(String),
}

impl From<std::string::FromUtf8Error> for InboxpackError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        InboxpackError::Parse {
            source: ParseErrorKind::Other(err.to_string()),
            path: None,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl InboxpackError {
    /// Creates a directory-not-found error.
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        InboxpackError::DirectoryNotFound { path: path.into() }
    }

    /// Creates a parse error for a document, optionally tagged with its path.
    pub fn parse(source: ParseErrorKind, path: Option<PathBuf>) -> Self {
        InboxpackError::Parse { source, path }
    }

    /// Creates an invalid selector error.
    pub fn invalid_selector(
        name: &'static str,
        selector: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        InboxpackError::InvalidSelector {
            name,
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Creates a section-too-large error.
    pub fn section_too_large(max_size: usize, actual_size: usize) -> Self {
        InboxpackError::SectionTooLarge {
            max_size,
            actual_size,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        InboxpackError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Attaches a file path to a parse error; other variants pass through.
    #[must_use]
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            InboxpackError::Parse { source, .. } => InboxpackError::Parse {
                source,
                path: Some(file.into()),
            },
            other => other,
        }
    }

    /// Returns `true` if this is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, InboxpackError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, InboxpackError::Parse { .. })
    }

    /// Returns `true` if the export directory was missing.
    pub fn is_directory_not_found(&self) -> bool {
        matches!(self, InboxpackError::DirectoryNotFound { .. })
    }

    /// Returns `true` if this is an invalid selector error.
    pub fn is_invalid_selector(&self) -> bool {
        matches!(self, InboxpackError::InvalidSelector { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, InboxpackError::InvalidFormat { .. })
    }
}
