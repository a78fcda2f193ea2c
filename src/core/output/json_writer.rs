//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::stats::MessageRow;
use crate::error::Result;

/// Writes rows to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {"thread_title": "Team", "sender_name": "Alice", "reactions": ["👍Bob"], ...}
/// ]
/// ```
pub fn write_json(rows: &[MessageRow], output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(rows)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts rows to a JSON array string.
pub fn to_json(rows: &[MessageRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
