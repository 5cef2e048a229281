//! Loads pre-recognized OCR text.
//!
//! Text recognition happens elsewhere; this reads its output dumps, one
//! batch per file (or stdin), for the line parser.

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Path argument meaning "read from stdin".
pub const STDIN_PATH: &str = "-";

/// Splits recognized text into lines, dropping Windows line endings.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Reads one batch of OCR lines from a file, or from stdin for `-`.
pub fn read_batch(path: &Path) -> Result<Vec<String>> {
    let text = if path.as_os_str() == STDIN_PATH {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read OCR text from stdin")?;
        text
    } else {
        fs::read_to_string(path)
            .context(format!("Failed to read OCR text: {}", path.display()))?
    };
    Ok(split_lines(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_split_lines_handles_crlf() {
        let lines = split_lines("Chest\r\nFrom Mira\r\n\r\nSource Crypt");
        assert_eq!(lines, vec!["Chest", "From Mira", "", "Source Crypt"]);
    }

    #[test]
    fn test_read_batch_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Gilded Chest\nFrom Mira.\nSource Tier-3 Dungeon\n").unwrap();

        let lines = read_batch(file.path()).unwrap();
        assert_eq!(lines[0], "Gilded Chest");
        assert_eq!(lines[2], "Source Tier-3 Dungeon");
    }

    #[test]
    fn test_read_batch_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_batch(&dir.path().join("missing.txt")).is_err());
    }
}
