//! Corpus-level state for one parsing run.
//!
//! A [`Corpus`] owns the flat message list, the [`Thread`]s that group it
//! and the participant set. It is populated by merging [`ParsedDocument`]s
//! and is read-only afterwards.
//!
//! Threads store indices into the flat list rather than copies, so the
//! union of all thread sequences is the flat list by construction.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use crate::Message;
use crate::parsing::SectionStats;

/// A conversation, identified by its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    title: String,
    indices: Vec<usize>,
}

impl Thread {
    /// Returns the thread title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the number of messages in the thread.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the thread has no messages.
    ///
    /// Recorded threads are never empty.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Positions of this thread's messages in [`Corpus::messages`].
    pub fn message_indices(&self) -> &[usize] {
        &self.indices
    }
}

/// The result of parsing one file, ready to be merged into a [`Corpus`].
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    /// File the document was read from
    pub source_path: PathBuf,
    /// Normalized thread title
    pub thread_title: String,
    /// Names from the participant declaration
    pub participants: Vec<String>,
    /// Valid messages in extraction order
    pub messages: Vec<Message>,
    /// Section counters from the extractor
    pub sections: SectionStats,
    /// Bundles the assembler rejected
    pub discarded: usize,
}

/// All threads, participants and messages from one parsing run.
///
/// # Example
///
/// ```rust
/// use inboxpack::core::Corpus;
/// use inboxpack::Message;
/// use chrono::Utc;
///
/// let corpus: Corpus = vec![
///     Message::new("Team", "Alice", Utc::now(), "hi", vec![], "a.html").unwrap(),
///     Message::new("Team", "Bob", Utc::now(), "yo", vec![], "a.html").unwrap(),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(corpus.len(), 2);
/// assert_eq!(corpus.thread_count(), 1);
/// assert!(corpus.participants().contains("Bob"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    messages: Vec<Message>,
    threads: Vec<Thread>,
    thread_index: HashMap<String, usize>,
    participants: BTreeSet<String>,
}

impl Corpus {
    /// Creates an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one parsed document, returning the number of messages added.
    ///
    /// Declared participants and every sender join the participant set.
    /// Messages are appended to the thread with the same title; a document
    /// with no valid messages creates no thread.
    pub fn add_document(&mut self, doc: ParsedDocument) -> usize {
        self.participants
            .extend(doc.participants.into_iter().filter(|p| !p.is_empty()));

        let added = doc.messages.len();
        for message in doc.messages {
            self.push(message);
        }
        added
    }

    fn push(&mut self, message: Message) {
        let index = self.messages.len();
        let title = message.thread_title();

        let slot = match self.thread_index.get(title) {
            Some(&slot) => slot,
            None => {
                self.threads.push(Thread {
                    title: title.to_string(),
                    indices: Vec::new(),
                });
                let slot = self.threads.len() - 1;
                self.thread_index.insert(title.to_string(), slot);
                slot
            }
        };
        self.threads[slot].indices.push(index);

        if !message.sender_name().is_empty() && !self.participants.contains(message.sender_name()) {
            self.participants.insert(message.sender_name().to_string());
        }
        self.messages.push(message);
    }

    /// Returns all messages in merge order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns threads in order of first appearance.
    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    /// Looks up a thread by title.
    pub fn thread(&self, title: &str) -> Option<&Thread> {
        self.thread_index.get(title).map(|&slot| &self.threads[slot])
    }

    /// Iterates a thread's messages in insertion order.
    pub fn messages_in<'a>(&'a self, thread: &'a Thread) -> impl Iterator<Item = &'a Message> + 'a {
        thread.indices.iter().filter_map(|&i| self.messages.get(i))
    }

    /// Returns the participant set, sorted by name.
    pub fn participants(&self) -> &BTreeSet<String> {
        &self.participants
    }

    /// Total number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if no messages were collected.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of non-empty threads.
    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    /// Number of distinct participants.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}

impl FromIterator<Message> for Corpus {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        let mut corpus = Corpus::new();
        for message in iter {
            corpus.push(message);
        }
        corpus
    }
}

impl Extend<Message> for Corpus {
    fn extend<I: IntoIterator<Item = Message>>(&mut self, iter: I) {
        for message in iter {
            self.push(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn msg(thread: &str, sender: &str, content: &str) -> Message {
        let ts = Utc.with_ymd_and_hms(2023, 1, 1, 9, 0, 0).unwrap();
        Message::new(thread, sender, ts, content, vec![], "a.html").unwrap()
    }

    fn doc(thread: &str, participants: &[&str], messages: Vec<Message>) -> ParsedDocument {
        ParsedDocument {
            thread_title: thread.to_string(),
            participants: participants.iter().map(|p| (*p).to_string()).collect(),
            messages,
            ..ParsedDocument::default()
        }
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = Corpus::new();
        assert!(corpus.is_empty());
        assert_eq!(corpus.thread_count(), 0);
        assert_eq!(corpus.participant_count(), 0);
    }

    #[test]
    fn test_add_document() {
        let mut corpus = Corpus::new();
        let added = corpus.add_document(doc(
            "Team",
            &["Alice", "Bob", "Carol"],
            vec![msg("Team", "Alice", "hi"), msg("Team", "Bob", "hey")],
        ));
        assert_eq!(added, 2);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.thread_count(), 1);
        // Carol was declared but never wrote
        assert_eq!(corpus.participant_count(), 3);
    }

    #[test]
    fn test_document_without_messages_creates_no_thread() {
        let mut corpus = Corpus::new();
        corpus.add_document(doc("Quiet", &["Dave"], vec![]));
        assert_eq!(corpus.thread_count(), 0);
        assert!(corpus.thread("Quiet").is_none());
        assert!(corpus.participants().contains("Dave"));
    }

    #[test]
    fn test_same_title_merges() {
        let mut corpus = Corpus::new();
        corpus.add_document(doc("Team", &[], vec![msg("Team", "Alice", "1"), msg("Team", "Bob", "2")]));
        corpus.add_document(doc("Other", &[], vec![msg("Other", "Eve", "x")]));
        corpus.add_document(doc("Team", &[], vec![msg("Team", "Alice", "3")]));

        assert_eq!(corpus.thread_count(), 2);
        let team = corpus.thread("Team").unwrap();
        assert_eq!(team.len(), 3);
        let contents: Vec<_> = corpus.messages_in(team).map(Message::content).collect();
        assert_eq!(contents, vec!["1", "2", "3"]);
        assert_eq!(team.message_indices(), [0, 1, 3]);
    }

    #[test]
    fn test_threads_partition_messages() {
        let corpus: Corpus = vec![
            msg("A", "x", "1"),
            msg("B", "y", "2"),
            msg("A", "z", "3"),
        ]
        .into_iter()
        .collect();

        let mut all: Vec<usize> = corpus
            .threads()
            .iter()
            .flat_map(|t| t.message_indices().iter().copied())
            .collect();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2]);
        assert_eq!(corpus.threads()[0].title(), "A");
    }

    #[test]
    fn test_senders_join_participants() {
        let mut corpus = Corpus::new();
        corpus.add_document(doc("Team", &["Alice"], vec![msg("Team", "Zed", "hi")]));
        assert!(corpus.participants().contains("Zed"));
        assert!(corpus.participants().contains("Alice"));
    }

    #[test]
    fn test_extend() {
        let mut corpus = Corpus::new();
        corpus.extend(vec![msg("T", "a", "1")]);
        corpus.extend(vec![msg("T", "b", "2")]);
        assert_eq!(corpus.thread("T").map(Thread::len), Some(2));
    }
}
