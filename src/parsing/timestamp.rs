//! Timestamp parsing for export footers.
//!
//! Footers print a local wall-clock time with no offset, in one of a few
//! layouts depending on export locale and version. Formats are tried in a
//! fixed order and the first exact match wins; named-month layouts come
//! before the numeric one so `10/11/2022` is never the first guess for a
//! string that also names its month.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Built-in footer timestamp layouts, in match order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampFormat {
    /// Abbreviated month, 12-hour clock
    /// Example: Oct 25, 2022 10:03:52 am
    ShortMonth,
    /// Full month name, 12-hour clock
    /// Example: October 25, 2022 10:03:52 am
    LongMonth,
    /// Numeric M/D/Y, 12-hour clock
    /// Example: 10/25/2022 10:03:52 am
    NumericUs,
    /// ISO-like date, 24-hour clock
    /// Example: 2022-10-25 10:03:52
    Iso,
}

impl TimestampFormat {
    /// Returns the chrono format string for this layout.
    pub fn pattern(self) -> &'static str {
        match self {
            TimestampFormat::ShortMonth => "%b %d, %Y %I:%M:%S %p",
            TimestampFormat::LongMonth => "%B %d, %Y %I:%M:%S %p",
            TimestampFormat::NumericUs => "%m/%d/%Y %I:%M:%S %p",
            TimestampFormat::Iso => "%Y-%m-%d %H:%M:%S",
        }
    }

    /// Returns all layouts in match order.
    pub fn all() -> &'static [TimestampFormat] {
        &[
            TimestampFormat::ShortMonth,
            TimestampFormat::LongMonth,
            TimestampFormat::NumericUs,
            TimestampFormat::Iso,
        ]
    }
}

/// Parses footer timestamps, optionally with extra caller-supplied formats.
///
/// # Example
///
/// ```rust
/// use inboxpack::parsing::TimestampParser;
/// use chrono::{Datelike, Timelike};
///
/// let parser = TimestampParser::new();
/// let ts = parser.parse(" Oct 25, 2022 10:03:52 pm ").unwrap();
/// assert_eq!((ts.month(), ts.day(), ts.hour()), (10, 25, 22));
/// assert!(parser.parse("not a date").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimestampParser {
    extra_formats: Vec<String>,
}

impl TimestampParser {
    /// Creates a parser with only the built-in formats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser that also tries `formats` after the built-in ones.
    pub fn with_formats(formats: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            extra_formats: formats.into_iter().map(Into::into).collect(),
        }
    }

    /// Adds a chrono format string tried after the built-in ones.
    #[must_use]
    pub fn with_extra_format(mut self, format: impl Into<String>) -> Self {
        self.extra_formats.push(format.into());
        self
    }

    /// Parses a timestamp, returning `None` when no format matches.
    pub fn parse(&self, raw: &str) -> Option<DateTime<Utc>> {
        let trimmed = raw.trim();

        for format in TimestampFormat::all() {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format.pattern()) {
                return Some(naive.and_utc());
            }
        }

        for pattern in &self.extra_formats {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, pattern) {
                return Some(naive.and_utc());
            }
        }

        tracing::debug!(timestamp = trimmed, "could not parse timestamp");
        None
    }

    /// Returns which built-in layout matches `raw`, if any.
    pub fn detect(raw: &str) -> Option<TimestampFormat> {
        let trimmed = raw.trim();
        TimestampFormat::all()
            .iter()
            .copied()
            .find(|format| NaiveDateTime::parse_from_str(trimmed, format.pattern()).is_ok())
    }
}

/// Parses a timestamp with the built-in formats only.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    TimestampParser::new().parse(raw)
}
