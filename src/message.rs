//! The extracted message record.
//!
//! A [`Message`] is produced only by the
//! [`MessageAssembler`](crate::parsing::MessageAssembler) after a raw section
//! bundle passes validation, so every instance carries a timestamp and
//! non-empty content. Fields are private; the record is read-only once built.
//!
//! # Serialization
//!
//! ```
//! use inboxpack::Message;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2023, 1, 1, 9, 0, 0).unwrap();
//! let msg = Message::new("Team", "Alice", ts, "hello", vec![], "inbox/t1/message_1.html").unwrap();
//! let json = serde_json::to_string(&msg)?;
//! let parsed: Message = serde_json::from_str(&json)?;
//!
//! assert_eq!(msg, parsed);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validated message from one thread of an export.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `thread_title` | `String` | Title of the conversation (first `<h1>`) |
/// | `sender_name` | `String` | Normalized author name |
/// | `timestamp` | `DateTime<Utc>` | Wall-clock send time as printed in the export |
/// | `content` | `String` | Normalized, non-empty message body |
/// | `reactions` | `Vec<String>` | One entry per reaction, usually `<emoji><name>` |
/// | `source_path` | `String` | File the message was extracted from |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MessageRecord")]
pub struct Message {
    thread_title: String,
    sender_name: String,
    /// Exports print local wall-clock time without an offset; it is stored
    /// as-is in UTC.
    timestamp: DateTime<Utc>,
    content: String,
    reactions: Vec<String>,
    source_path: String,
}

/// Unvalidated wire form of a [`Message`].
#[derive(Deserialize)]
struct MessageRecord {
    thread_title: String,
    sender_name: String,
    timestamp: DateTime<Utc>,
    content: String,
    #[serde(default)]
    reactions: Vec<String>,
    source_path: String,
}

impl TryFrom<MessageRecord> for Message {
    type Error = &'static str;

    fn try_from(record: MessageRecord) -> Result<Self, Self::Error> {
        Message::new(
            record.thread_title,
            record.sender_name,
            record.timestamp,
            record.content,
            record.reactions,
            record.source_path,
        )
        .ok_or("message content must not be empty")
    }
}

impl Message {
    /// Builds a message, returning `None` when `content` is empty or
    /// whitespace-only.
    ///
    /// # Example
    ///
    /// ```rust
    /// use inboxpack::Message;
    /// use chrono::Utc;
    ///
    /// assert!(Message::new("Team", "Alice", Utc::now(), "   ", vec![], "a.html").is_none());
    /// assert!(Message::new("Team", "Alice", Utc::now(), "hi", vec![], "a.html").is_some());
    /// ```
    pub fn new(
        thread_title: impl Into<String>,
        sender_name: impl Into<String>,
        timestamp: DateTime<Utc>,
        content: impl Into<String>,
        reactions: Vec<String>,
        source_path: impl Into<String>,
    ) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return None;
        }
        Some(Self {
            thread_title: thread_title.into(),
            sender_name: sender_name.into(),
            timestamp,
            content,
            reactions,
            source_path: source_path.into(),
        })
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the thread title.
    pub fn thread_title(&self) -> &str {
        &self.thread_title
    }

    /// Returns the sender name.
    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    /// Returns the send time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the reactions, in document order.
    pub fn reactions(&self) -> &[String] {
        &self.reactions
    }

    /// Returns the path of the file this message came from.
    pub fn source_path(&self) -> &str {
        &self.source_path
    }
}
