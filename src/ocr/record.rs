//! A single reward entry reconstructed from OCR text.

use serde::Serialize;
use std::fmt;

/// One reward entry: what was received, who sent it, and where it came from.
///
/// Records built by the line parser always have `count == 1`. Records
/// reconstituted from the ledger file carry the aggregate count for their
/// (player, source) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Reward name, possibly joined from several OCR lines
    pub name: String,
    /// Sender as recognized by OCR (not yet canonicalized)
    pub player: String,
    /// Origin label, e.g. "Level 10 Crypt" or "Runic-7 squad"
    pub source: String,
    /// Number of rewards this record stands for
    pub count: u32,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            name: String::new(),
            player: String::new(),
            source: String::new(),
            count: 1,
        }
    }
}

impl Record {
    /// Creates a single-count record.
    pub fn new(name: impl Into<String>, player: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            player: player.into(),
            source: source.into(),
            count: 1,
        }
    }

    /// Creates an aggregated record as read back from storage.
    ///
    /// The original reward name is not stored, so it degenerates to the source label.
    pub fn aggregated(player: impl Into<String>, source: impl Into<String>, count: u32) -> Self {
        let source = source.into();
        Self {
            name: source.clone(),
            player: player.into(),
            source,
            count,
        }
    }

    /// A record is complete once name, player and source are all known.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.player.is_empty() && !self.source.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} ({})", self.name, self.player, self.source)?;
        if self.count > 1 {
            write!(f, " x{}", self.count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_single_count() {
        let record = Record::default();
        assert_eq!(record.count, 1);
        assert!(!record.is_valid());
    }

    #[test]
    fn test_valid_requires_all_fields() {
        assert!(Record::new("Chest", "Mira", "Crypt").is_valid());
        assert!(!Record::new("", "Mira", "Crypt").is_valid());
        assert!(!Record::new("Chest", "", "Crypt").is_valid());
        assert!(!Record::new("Chest", "Mira", "").is_valid());
    }

    #[test]
    fn test_aggregated_name_is_source() {
        let record = Record::aggregated("Bob", "Level 10 Crypt", 4);
        assert_eq!(record.name, "Level 10 Crypt");
        assert_eq!(record.source, "Level 10 Crypt");
        assert_eq!(record.count, 4);
    }

    #[test]
    fn test_display() {
        let record = Record::new("Gilded Chest", "Mira", "Tier-3 Dungeon");
        assert_eq!(record.to_string(), "Gilded Chest from Mira (Tier-3 Dungeon)");

        let record = Record::aggregated("Bob", "Crypt", 3);
        assert_eq!(record.to_string(), "Crypt from Bob (Crypt) x3");
    }
}
