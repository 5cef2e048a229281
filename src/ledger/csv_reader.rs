//! Ledger file reader.
//!
//! Turns the saved table back into records: one aggregated record per
//! non-zero (player, source) cell. Per-reward names are not stored, so a
//! reloaded record is named after its source.

use super::csv_writer::{EOL, SEP};
use crate::ocr::Record;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

/// Parses table text into aggregated records.
///
/// Any malformed row fails the whole table.
pub fn parse_table(text: &str) -> Result<Vec<Record>> {
    let mut lines = text
        .split(EOL)
        .map(|line| line.strip_suffix('\r').unwrap_or(line));

    let header = match lines.next() {
        Some(header) if !text.is_empty() => header,
        _ => return Err(anyhow!("Ledger file is empty")),
    };
    let columns: Vec<&str> = header.split(SEP).collect();
    if !columns[0].is_empty() {
        return Err(anyhow!("Ledger header must start with an empty cell"));
    }

    let mut records = Vec::new();

    for (row_num, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let cells: Vec<&str> = line.split(SEP).collect();
        if cells.len() != columns.len() {
            return Err(anyhow!(
                "Row {}: expected {} columns, got {}",
                row_num + 2,
                columns.len(),
                cells.len()
            ));
        }

        let player = cells[0];
        if player.is_empty() {
            return Err(anyhow!("Row {}: missing player name", row_num + 2));
        }

        for (source, value) in columns.iter().zip(cells.iter()).skip(1) {
            let count = value
                .trim()
                .parse::<u32>()
                .context(format!("Row {}: invalid count '{}' for {}", row_num + 2, value, source))?;
            if count > 0 {
                records.push(Record::aggregated(player, *source, count));
            }
        }
    }

    Ok(records)
}

/// Reads the ledger file into aggregated records.
pub fn read_ledger(path: &Path) -> Result<Vec<Record>> {
    let text = fs::read_to_string(path)
        .context(format!("Failed to read ledger file: {}", path.display()))?;
    parse_table(&text)
}

/// Loads previously saved records.
///
/// A missing, unreadable or corrupt file counts as no saved state: the
/// result is empty and `notify` says so. Otherwise `notify` reports how much
/// was loaded.
pub fn load(path: &Path, mut notify: impl FnMut(&str)) -> Vec<Record> {
    if !path.exists() {
        notify(&format!("No saved chests found at {}", path.display()));
        return Vec::new();
    }

    match read_ledger(path) {
        Ok(records) if !records.is_empty() => {
            let total = records.iter().fold(0u32, |acc, r| acc.saturating_add(r.count));
            notify(&format!(
                "Loaded {} saved chests ({} entries) from {}",
                total,
                records.len(),
                path.display()
            ));
            records
        }
        Ok(_) => {
            notify(&format!("No saved chests found in {}", path.display()));
            Vec::new()
        }
        Err(e) => {
            notify(&format!("No saved chests loaded: {:#}", e));
            Vec::new()
        }
    }
}
