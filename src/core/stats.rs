//! Analytic projections of a [`Corpus`].
//!
//! - [`to_table`] - one [`MessageRow`] per message with derived columns
//! - [`summary`] - corpus totals and date range
//! - [`activity`] - top senders/threads, busiest hour and weekday

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::Serialize;

use super::corpus::Corpus;
use crate::Message;

/// One table row: a message plus derived analytic columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRow {
    pub thread_title: String,
    pub sender_name: String,
    pub timestamp: DateTime<Utc>,
    pub content: String,
    pub reactions: Vec<String>,
    pub source_path: String,
    /// Calendar date of the timestamp
    pub date: NaiveDate,
    /// Hour of day, 0-23
    pub hour: u32,
    /// English weekday name ("Sunday")
    pub weekday: String,
    pub month: u32,
    pub year: i32,
    /// Content length in characters
    pub length: usize,
    /// Whitespace-delimited tokens
    pub word_count: usize,
    pub reaction_count: usize,
}

impl MessageRow {
    /// Derives a row from a message.
    pub fn from_message(msg: &Message) -> Self {
        let ts = msg.timestamp();
        Self {
            thread_title: msg.thread_title().to_string(),
            sender_name: msg.sender_name().to_string(),
            timestamp: ts,
            content: msg.content().to_string(),
            reactions: msg.reactions().to_vec(),
            source_path: msg.source_path().to_string(),
            date: ts.date_naive(),
            hour: ts.hour(),
            weekday: ts.format("%A").to_string(),
            month: ts.month(),
            year: ts.year(),
            length: msg.content().chars().count(),
            word_count: msg.content().split_whitespace().count(),
            reaction_count: msg.reactions().len(),
        }
    }
}

/// Projects the corpus into one row per message, in corpus order.
pub fn to_table(corpus: &Corpus) -> Vec<MessageRow> {
    corpus.messages().iter().map(MessageRow::from_message).collect()
}

/// Message count for one thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadCount {
    pub title: String,
    pub messages: usize,
}

/// Earliest and latest message timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Corpus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_messages: usize,
    pub total_participants: usize,
    pub total_threads: usize,
    /// Per-thread message counts, in order of first appearance
    pub per_thread_counts: Vec<ThreadCount>,
    /// `None` only for an empty corpus
    pub date_range: Option<DateRange>,
}

/// Computes corpus totals.
///
/// # Example
///
/// ```rust
/// use inboxpack::core::{Corpus, summary};
///
/// let s = summary(&Corpus::new());
/// assert_eq!(s.total_messages, 0);
/// assert!(s.date_range.is_none());
/// ```
pub fn summary(corpus: &Corpus) -> Summary {
    let date_range = corpus
        .messages()
        .iter()
        .map(Message::timestamp)
        .fold(None, |range: Option<DateRange>, ts| {
            Some(match range {
                None => DateRange { start: ts, end: ts },
                Some(r) => DateRange {
                    start: r.start.min(ts),
                    end: r.end.max(ts),
                },
            })
        });

    Summary {
        total_messages: corpus.len(),
        total_participants: corpus.participant_count(),
        total_threads: corpus.thread_count(),
        per_thread_counts: corpus
            .threads()
            .iter()
            .map(|t| ThreadCount {
                title: t.title().to_string(),
                messages: t.len(),
            })
            .collect(),
        date_range,
    }
}

/// Who and when: the console report printed after a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityReport {
    /// Most active senders with message counts
    pub top_senders: Vec<(String, usize)>,
    /// Largest threads with message counts
    pub top_threads: Vec<(String, usize)>,
    pub busiest_hour: Option<u32>,
    pub busiest_weekday: Option<String>,
    /// Mean content length in characters
    pub mean_length: Option<f64>,
}

/// Computes the activity report. Ties keep order of first appearance.
pub fn activity(corpus: &Corpus, top_n: usize) -> ActivityReport {
    let messages = corpus.messages();

    let mut top_senders = ranked(messages.iter().map(|m| m.sender_name().to_string()));
    top_senders.truncate(top_n);

    let mut top_threads: Vec<(String, usize)> = corpus
        .threads()
        .iter()
        .map(|t| (t.title().to_string(), t.len()))
        .collect();
    // Stable, so equal threads keep first-appearance order.
    top_threads.sort_by(|a, b| b.1.cmp(&a.1));
    top_threads.truncate(top_n);

    let busiest_hour = ranked(messages.iter().map(|m| m.timestamp().hour()))
        .first()
        .map(|(hour, _)| *hour);
    let busiest_weekday = ranked(messages.iter().map(|m| m.timestamp().format("%A").to_string()))
        .into_iter()
        .next()
        .map(|(day, _)| day);

    let mean_length = if messages.is_empty() {
        None
    } else {
        let total: usize = messages.iter().map(|m| m.content().chars().count()).sum();
        Some(total as f64 / messages.len() as f64)
    };

    ActivityReport {
        top_senders,
        top_threads,
        busiest_hour,
        busiest_weekday,
        mean_length,
    }
}

/// Counts keys and sorts by count descending, ties in first-seen order.
fn ranked<K: Eq + Hash + Clone>(keys: impl Iterator<Item = K>) -> Vec<(K, usize)> {
    let mut counts: Vec<(K, usize)> = Vec::new();
    let mut slots: HashMap<K, usize> = HashMap::new();

    for key in keys {
        match slots.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
