//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::stats::MessageRow;
use crate::error::{InboxpackError, Result};

/// Column names, in output order.
pub const CSV_HEADER: [&str; 14] = [
    "thread_title",
    "sender_name",
    "timestamp",
    "content",
    "reactions",
    "source_path",
    "date",
    "hour",
    "weekday",
    "month",
    "year",
    "length",
    "word_count",
    "reaction_count",
];

/// Separator for the reactions column.
pub const REACTION_SEPARATOR: &str = "|";

/// Writes rows to CSV.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: see [`CSV_HEADER`]
/// - Timestamp: `YYYY-MM-DD HH:MM:SS`
/// - Reactions: joined with `|`
/// - Encoding: UTF-8
pub fn write_csv(rows: &[MessageRow], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_rows(rows, file)
}

/// Converts rows to a CSV string.
///
/// Same format as [`write_csv`].
pub fn to_csv(rows: &[MessageRow]) -> Result<String> {
    let mut buf = Vec::new();
    write_rows(rows, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn write_rows<W: Write>(rows: &[MessageRow], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b',').from_writer(out);

    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.write_record(build_record(row))?;
    }

    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| InboxpackError::Io(e.into_error()))?;
    Ok(())
}

fn build_record(row: &MessageRow) -> [String; 14] {
    [
        row.thread_title.clone(),
        row.sender_name.clone(),
        row.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        row.content.clone(),
        row.reactions.join(REACTION_SEPARATOR),
        row.source_path.clone(),
        row.date.format("%Y-%m-%d").to_string(),
        row.hour.to_string(),
        row.weekday.clone(),
        row.month.to_string(),
        row.year.to_string(),
        row.length.to_string(),
        row.word_count.to_string(),
        row.reaction_count.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;
    use chrono::{TimeZone, Utc};
    use tempfile::NamedTempFile;

    fn row(content: &str, reactions: &[&str]) -> MessageRow {
        let ts = Utc.with_ymd_and_hms(2023, 1, 1, 9, 0, 0).unwrap();
        let msg = Message::new(
            "Team",
            "Alice",
            ts,
            content,
            reactions.iter().map(|r| (*r).to_string()).collect(),
            "inbox/t1/message_1.html",
        )
        .unwrap();
        MessageRow::from_message(&msg)
    }

    #[test]
    fn test_to_csv_basic() {
        let csv = to_csv(&[row("hello", &[])]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), CSV_HEADER.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "Team,Alice,2023-01-01 09:00:00,hello,,inbox/t1/message_1.html,2023-01-01,9,Sunday,1,2023,5,1,0"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_to_csv_reactions_joined() {
        let csv = to_csv(&[row("nice", &["👍Bob", "❤Carol"])]).unwrap();
        assert!(csv.contains(",👍Bob|❤Carol,"));
    }

    #[test]
    fn test_to_csv_quotes_commas() {
        let csv = to_csv(&[row("one, two", &[])]).unwrap();
        assert!(csv.contains("\"one, two\""));
    }

    #[test]
    fn test_to_csv_empty_has_header() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(csv.trim(), CSV_HEADER.join(","));
    }

    #[test]
    fn test_write_csv_file() {
        let temp_file = NamedTempFile::new().unwrap();
        write_csv(&[row("hello", &[])], temp_file.path()).unwrap();

        let mut reader = csv::Reader::from_path(temp_file.path()).unwrap();
        let records: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][3], "hello");
        assert_eq!(&records[0][8], "Sunday");
    }
}
