//! Per-player reward tally.
//!
//! The ledger merges records whose player names differ only in case (OCR
//! noise), keeping the first-seen spelling, and groups them by source label.
//! It is always rebuilt from a full list of records and never patched in place.
//!
//! This module provides:
//! - `Ledger::collect` for building a snapshot
//! - Semicolon-separated persistence (`csv_writer` / `csv_reader`)

pub mod csv_reader;
pub mod csv_writer;

pub use csv_reader::load;
pub use csv_writer::save;

use crate::ocr::Record;
use std::collections::HashMap;

/// Aggregated view of a list of records.
#[derive(Debug, Clone)]
pub struct Ledger {
    /// Canonical player names in first-seen order
    players: Vec<String>,
    /// Source labels in first-seen order; index 0 is the empty header cell
    sources: Vec<String>,
    /// Case-folded player name -> index into `players`
    lookup: HashMap<String, usize>,
    /// Records per canonical player, parallel to `players`
    player_records: Vec<Vec<Record>>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            sources: vec![String::new()],
            lookup: HashMap::new(),
            player_records: Vec::new(),
        }
    }
}

/// Key used to match player spellings that differ only in case.
fn fold(player: &str) -> String {
    player.to_lowercase()
}

impl Ledger {
    /// Builds a fresh snapshot from records in order.
    pub fn collect<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut ledger = Self::default();

        for record in records {
            let idx = match ledger.lookup.get(&fold(&record.player)) {
                Some(&idx) => idx,
                None => {
                    ledger.lookup.insert(fold(&record.player), ledger.players.len());
                    ledger.players.push(record.player.clone());
                    ledger.player_records.push(Vec::new());
                    ledger.players.len() - 1
                }
            };

            if !ledger.sources.contains(&record.source) {
                ledger.sources.push(record.source.clone());
            }

            ledger.player_records[idx].push(record.clone());
        }

        ledger
    }

    /// Canonical player names in first-seen order.
    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// Source labels in first-seen order, without the empty header cell.
    pub fn sources(&self) -> &[String] {
        &self.sources[1..]
    }

    /// Header cells for the table, starting with the empty player column.
    pub fn header(&self) -> &[String] {
        &self.sources
    }

    /// Canonical spelling for any case variant of a known player.
    pub fn canonical(&self, player: &str) -> Option<&str> {
        self.lookup
            .get(&fold(player))
            .map(|&idx| self.players[idx].as_str())
    }

    /// Records attributed to a player (any case variant), in input order.
    pub fn records_for(&self, player: &str) -> &[Record] {
        self.lookup
            .get(&fold(player))
            .map(|&idx| self.player_records[idx].as_slice())
            .unwrap_or(&[])
    }

    /// Iterates (canonical player, records) in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.players
            .iter()
            .zip(self.player_records.iter())
            .map(|(player, records)| (player.as_str(), records.as_slice()))
    }

    /// Total count for one (player, exact source) pair.
    pub fn count(&self, player: &str, source: &str) -> u32 {
        self.records_for(player)
            .iter()
            .filter(|r| r.source == source)
            .fold(0, |acc: u32, r| acc.saturating_add(r.count))
    }

    /// Total count across all players and sources.
    pub fn total(&self) -> u32 {
        self.player_records
            .iter()
            .flatten()
            .fold(0, |acc: u32, r| acc.saturating_add(r.count))
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_variants_collapse_to_first_spelling() {
        let records = vec![
            Record::new("Chest", "Aria", "Crypt"),
            Record::new("Chest", "ARIA", "Crypt"),
            Record::new("Chest", "aria", "Citadel"),
        ];
        let ledger = Ledger::collect(&records);

        assert_eq!(ledger.players(), ["Aria"]);
        assert_eq!(ledger.count("Aria", "Crypt"), 2);
        assert_eq!(ledger.count("aRiA", "Citadel"), 1);
        assert_eq!(ledger.canonical("ARIA"), Some("Aria"));
    }

    #[test]
    fn test_each_record_attributed_once() {
        let records = vec![
            Record::new("A", "Bob", "Crypt"),
            Record::new("B", "Mira", "Crypt"),
            Record::new("C", "bob", "Vault 45"),
        ];
        let ledger = Ledger::collect(&records);

        let attributed: usize = ledger.iter().map(|(_, records)| records.len()).sum();
        assert_eq!(attributed, records.len());
        for (player, records) in ledger.iter() {
            assert!(records.iter().all(|r| r.player.to_lowercase() == player.to_lowercase()));
        }
    }

    #[test]
    fn test_sources_exact_match_first_seen_order() {
        let records = vec![
            Record::new("A", "Bob", "Crypt"),
            Record::new("B", "Bob", "crypt"),
            Record::new("C", "Bob", "Citadel"),
            Record::new("D", "Bob", "Crypt"),
        ];
        let ledger = Ledger::collect(&records);

        assert_eq!(ledger.sources(), ["Crypt", "crypt", "Citadel"]);
        assert_eq!(ledger.header()[0], "");
        assert_eq!(ledger.header().len(), 4);
    }

    #[test]
    fn test_players_first_seen_order() {
        let records = vec![
            Record::new("A", "Zed", "Crypt"),
            Record::new("B", "Amy", "Crypt"),
            Record::new("C", "zed", "Crypt"),
        ];
        let ledger = Ledger::collect(&records);
        assert_eq!(ledger.players(), ["Zed", "Amy"]);
    }

    #[test]
    fn test_counts_sum_aggregated_records() {
        let records = vec![
            Record::aggregated("Bob", "Crypt", 3),
            Record::new("Chest", "BOB", "Crypt"),
        ];
        let ledger = Ledger::collect(&records);
        assert_eq!(ledger.count("Bob", "Crypt"), 4);
        assert_eq!(ledger.total(), 4);
    }

    #[test]
    fn test_counts_saturate() {
        let records = vec![
            Record::aggregated("Bob", "Crypt", u32::MAX),
            Record::new("Chest", "Bob", "Crypt"),
        ];
        let ledger = Ledger::collect(&records);
        assert_eq!(ledger.count("Bob", "Crypt"), u32::MAX);
        assert_eq!(ledger.total(), u32::MAX);
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = Ledger::collect(&[]);
        assert!(ledger.is_empty());
        assert!(ledger.sources().is_empty());
        assert_eq!(ledger.header(), [""]);
        assert!(ledger.records_for("nobody").is_empty());
        assert_eq!(ledger.count("nobody", "Crypt"), 0);
    }
}
