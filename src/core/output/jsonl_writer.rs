//! JSON Lines (JSONL) output writer.
//!
//! One row per line; suited to streaming loaders and dataframe readers
//! that accept newline-delimited JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::stats::MessageRow;
use crate::error::Result;

/// Writes rows to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"thread_title":"Team","sender_name":"Alice",...}
/// {"thread_title":"Team","sender_name":"Bob",...}
/// ```
pub fn write_jsonl(rows: &[MessageRow], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(rows, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Converts rows to a JSONL string.
pub fn to_jsonl(rows: &[MessageRow]) -> Result<String> {
    let mut buf = Vec::new();
    write_lines(rows, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn write_lines<W: Write>(rows: &[MessageRow], writer: &mut W) -> Result<()> {
    for row in rows {
        let line = serde_json::to_string(row)?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}
