//! Ledger file writer.
//!
//! The file is a semicolon-separated table. The first row is an empty cell
//! followed by every source label; each following row is a canonical player
//! name followed by that player's count per source column.

use super::Ledger;
use crate::ocr::Record;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Field separator.
pub const SEP: char = ';';

/// Record separator.
pub const EOL: char = '\n';

/// Makes a value safe to store in a single cell.
fn cell(value: &str) -> String {
    value.replace([SEP, EOL, '\r'], " ")
}

/// Renders the ledger as table text.
pub fn to_table(ledger: &Ledger) -> String {
    let mut out = String::new();

    let header: Vec<String> = ledger.header().iter().map(|s| cell(s)).collect();
    out.push_str(&header.join(&SEP.to_string()));
    out.push(EOL);

    for (player, _) in ledger.iter() {
        let mut row = vec![cell(player)];
        for source in ledger.sources() {
            row.push(ledger.count(player, source).to_string());
        }
        out.push_str(&row.join(&SEP.to_string()));
        out.push(EOL);
    }

    out
}

/// Writes a ledger snapshot, replacing the file.
pub fn write_ledger(ledger: &Ledger, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create ledger directory: {}", parent.display()))?;
        }
    }

    let mut file = File::create(path)
        .context(format!("Failed to create ledger file: {}", path.display()))?;
    file.write_all(to_table(ledger).as_bytes())
        .context("Failed to write ledger rows")?;
    Ok(())
}

/// Rebuilds the ledger from `records` and persists it.
///
/// Returns the snapshot that was written.
pub fn save(records: &[Record], path: &Path) -> Result<Ledger> {
    let ledger = Ledger::collect(records);
    write_ledger(&ledger, path)?;
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_case_variants_share_one_row() {
        let records = vec![
            Record::new("Chest", "Bob", "Crypt"),
            Record::new("Chest", "bob", "Crypt"),
        ];
        let dir = tempdir().unwrap();
        let path = dir.path().join("chests.csv");

        save(&records, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, ";Crypt\nBob;2\n");
    }

    #[test]
    fn test_table_columns_follow_header() {
        let records = vec![
            Record::new("A", "Mira", "Crypt"),
            Record::new("B", "Theo", "Vault 45"),
            Record::new("C", "Mira", "Vault 45"),
            Record::new("D", "Mira", "Vault 45"),
        ];
        let table = to_table(&Ledger::collect(&records));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines, vec![";Crypt;Vault 45", "Mira;1;2", "Theo;0;1"]);
    }

    #[test]
    fn test_empty_ledger_writes_header_only() {
        assert_eq!(to_table(&Ledger::default()), "\n");
    }

    #[test]
    fn test_separators_removed_from_cells() {
        let records = vec![Record::new("A", "Mi;ra", "Cr\nypt")];
        let table = to_table(&Ledger::collect(&records));
        assert_eq!(table, ";Cr ypt\nMi ra;1\n");
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("chests.csv");

        save(&[Record::new("A", "Mira", "Crypt")], &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_path_is_error() {
        let dir = tempdir().unwrap();
        // A directory cannot be opened as a file
        assert!(save(&[Record::new("A", "Mira", "Crypt")], dir.path()).is_err());
    }
}
