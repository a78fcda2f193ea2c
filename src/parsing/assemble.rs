//! Turns raw section bundles into validated [`Message`]s.

use std::fmt;

use super::extract::RawBundle;
use super::normalize::TextNormalizer;
use super::timestamp::TimestampParser;
use crate::Message;

/// Why a bundle did not become a message.
///
/// Discards are expected for reaction-only and administrative sections,
/// so they are reported at debug level only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscardReason {
    /// Content was empty after normalization
    EmptyContent,
    /// The section had no timestamp element
    MissingTimestamp,
    /// The timestamp matched none of the known formats
    UnparsableTimestamp,
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscardReason::EmptyContent => write!(f, "empty content"),
            DiscardReason::MissingTimestamp => write!(f, "missing timestamp"),
            DiscardReason::UnparsableTimestamp => write!(f, "unparsable timestamp"),
        }
    }
}

/// Validates bundles and builds messages.
///
/// # Example
///
/// ```rust
/// use inboxpack::parsing::{MessageAssembler, RawBundle};
///
/// let assembler = MessageAssembler::new();
/// let bundle = RawBundle {
///     sender_name: " Alice ".into(),
///     raw_content: "hello &amp; bye".into(),
///     reactions: vec!["👍Bob".into()],
///     raw_timestamp: Some("Jan 1, 2023 9:00:00 am".into()),
/// };
///
/// let msg = assembler.assemble(&bundle, "Team", "inbox/t1/message_1.html").unwrap();
/// assert_eq!(msg.sender_name(), "Alice");
/// assert_eq!(msg.content(), "hello & bye");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageAssembler {
    normalizer: TextNormalizer,
    timestamps: TimestampParser,
}

impl MessageAssembler {
    /// Creates an assembler with default normalizer and built-in formats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an assembler from its two collaborators.
    pub fn with_parts(normalizer: TextNormalizer, timestamps: TimestampParser) -> Self {
        Self {
            normalizer,
            timestamps,
        }
    }

    /// Builds a message, or returns `None` if the bundle is not valid.
    pub fn assemble(
        &self,
        bundle: &RawBundle,
        thread_title: &str,
        source_path: &str,
    ) -> Option<Message> {
        match self.try_assemble(bundle, thread_title, source_path) {
            Ok(msg) => Some(msg),
            Err(reason) => {
                tracing::debug!(thread = thread_title, %reason, "discarded bundle");
                None
            }
        }
    }

    /// Builds a message, reporting why a bundle was discarded.
    pub fn try_assemble(
        &self,
        bundle: &RawBundle,
        thread_title: &str,
        source_path: &str,
    ) -> Result<Message, DiscardReason> {
        let content = self.normalizer.normalize(&bundle.raw_content);
        if content.is_empty() {
            return Err(DiscardReason::EmptyContent);
        }

        let raw_timestamp = bundle
            .raw_timestamp
            .as_deref()
            .ok_or(DiscardReason::MissingTimestamp)?;
        let timestamp = self
            .timestamps
            .parse(raw_timestamp)
            .ok_or(DiscardReason::UnparsableTimestamp)?;

        let reactions = bundle
            .reactions
            .iter()
            .map(|r| self.normalizer.normalize(r))
            .collect();

        Message::new(
            thread_title,
            self.normalizer.normalize(&bundle.sender_name),
            timestamp,
            content,
            reactions,
            source_path,
        )
        .ok_or(DiscardReason::EmptyContent)
    }
}
