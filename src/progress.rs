//! Progress reporting for directory parsing runs.
//!
//! The aggregator invokes a [`ProgressCallback`] every
//! `progress_interval` files and once more when the run finishes, so
//! callers can drive a status line without polling.
//!
//! # Example
//!
//! ```rust
//! use inboxpack::progress::{Progress, ProgressCallback};
//! use std::sync::Arc;
//!
//! let callback: ProgressCallback = Arc::new(|progress| {
//!     if let Some(pct) = progress.percentage() {
//!         println!("Parsed {:.1}% of files", pct);
//!     }
//! });
//!
//! callback(Progress::new(10, Some(40), 250));
//! ```

use std::sync::Arc;

/// Snapshot of a directory parsing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Files parsed so far, including ones that failed.
    pub files_processed: usize,

    /// Files discovered, if known.
    pub total_files: Option<usize>,

    /// Messages added to the corpus so far.
    pub messages: usize,
}

impl Progress {
    /// Creates a new progress snapshot.
    pub fn new(files_processed: usize, total_files: Option<usize>, messages: usize) -> Self {
        Self {
            files_processed,
            total_files,
            messages,
        }
    }

    /// Returns file progress as a percentage (0.0 - 100.0).
    ///
    /// Returns `None` if the total is not known.
    ///
    /// ```rust
    /// use inboxpack::progress::Progress;
    ///
    /// assert_eq!(Progress::new(5, Some(10), 0).percentage(), Some(50.0));
    /// assert_eq!(Progress::new(5, None, 0).percentage(), None);
    /// ```
    pub fn percentage(&self) -> Option<f64> {
        self.total_files.map(|total| {
            if total == 0 {
                100.0
            } else {
                (self.files_processed as f64 / total as f64) * 100.0
            }
        })
    }

    /// Returns whether every discovered file has been processed.
    pub fn is_complete(&self) -> bool {
        self.total_files
            .map(|total| self.files_processed >= total)
            .unwrap_or(false)
    }

    /// Returns the number of files still to process.
    pub fn remaining_files(&self) -> Option<usize> {
        self.total_files
            .map(|total| total.saturating_sub(self.files_processed))
    }
}

/// Thread-safe callback receiving [`Progress`] updates.
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// Formats a progress snapshot as a one-line status message.
///
/// ```rust
/// use inboxpack::progress::{Progress, status_line};
///
/// assert_eq!(
///     status_line(&Progress::new(10, Some(40), 250)),
///     "Processed 10/40 files, 30 remaining (250 messages)"
/// );
/// assert_eq!(
///     status_line(&Progress::new(40, Some(40), 900)),
///     "Processed all 40 files (900 messages)"
/// );
/// ```
pub fn status_line(progress: &Progress) -> String {
    match (progress.total_files, progress.remaining_files()) {
        (Some(total), _) if progress.is_complete() => {
            format!("Processed all {} files ({} messages)", total, progress.messages)
        }
        (Some(total), Some(remaining)) => format!(
            "Processed {}/{} files, {} remaining ({} messages)",
            progress.files_processed, total, remaining, progress.messages
        ),
        _ => format!(
            "Processed {} files ({} messages)",
            progress.files_processed, progress.messages
        ),
    }
}

/// Creates a progress callback that prints [`status_line`] to stderr.
pub fn stderr_progress() -> ProgressCallback {
    Arc::new(|progress| eprintln!("   {}", status_line(&progress)))
}
