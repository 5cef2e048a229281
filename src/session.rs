//! Grab session: loaded state plus the records parsed since startup.
//!
//! Each grab produces one batch of OCR lines. Batches are parsed
//! independently, and the session stops accepting batches once a grab comes
//! back with no records (the reward list has been read to the end). Finishing
//! the session rebuilds the ledger from everything and writes it out.

use anyhow::Result;
use std::path::Path;

use crate::ledger::{self, Ledger};
use crate::ocr::{parse_lines, Record};

#[derive(Debug, Default)]
pub struct Session {
    /// Records reconstituted from the ledger file
    loaded: Vec<Record>,
    /// Records parsed during this session, in grab order
    parsed: Vec<Record>,
    /// Number of batches parsed
    batches: u32,
    /// Set after a batch yields nothing
    exhausted: bool,
}

impl Session {
    pub fn new(loaded: Vec<Record>) -> Self {
        Self {
            loaded,
            ..Self::default()
        }
    }

    /// Parses one batch and keeps its records.
    ///
    /// Returns how many records the batch produced. Once a batch produces
    /// none, later batches are ignored and return 0.
    pub fn ingest<I, S>(&mut self, lines: I, on_record: impl FnMut(&str)) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.exhausted {
            return 0;
        }

        let records = parse_lines(lines, on_record);
        self.batches += 1;
        if records.is_empty() {
            self.exhausted = true;
        }

        let count = records.len();
        self.parsed.extend(records);
        count
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn batches(&self) -> u32 {
        self.batches
    }

    /// Records parsed in this session.
    pub fn parsed(&self) -> &[Record] {
        &self.parsed
    }

    /// Loaded records followed by parsed ones.
    pub fn all_records(&self) -> Vec<Record> {
        self.loaded.iter().chain(self.parsed.iter()).cloned().collect()
    }

    /// Fresh ledger snapshot over loaded and parsed records.
    pub fn snapshot(&self) -> Ledger {
        Ledger::collect(self.loaded.iter().chain(self.parsed.iter()))
    }

    /// Writes the combined ledger and returns it.
    pub fn finish(self, path: &Path) -> Result<Ledger> {
        ledger::save(&self.all_records(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const GRAB_1: [&str; 6] = [
        "Wooden Chest",
        "From Aria",
        "Source Level 5 Crypt",
        "Stone Chest",
        "From Bob.",
        "Source Citadel",
    ];

    #[test]
    fn test_ingest_accumulates_batches() {
        let mut session = Session::default();
        assert_eq!(session.ingest(GRAB_1, |_| {}), 2);
        assert_eq!(session.ingest(["Chest", "From ARIA", "Source Level 5 Crypt"], |_| {}), 1);

        assert_eq!(session.batches(), 2);
        assert_eq!(session.parsed().len(), 3);
        assert_eq!(session.snapshot().count("Aria", "Level 5 Crypt"), 2);
    }

    #[test]
    fn test_partial_record_does_not_cross_batches() {
        let mut session = Session::default();
        assert_eq!(session.ingest(["Chest", "From Aria"], |_| {}), 0);
        assert!(session.is_exhausted());
    }

    #[test]
    fn test_empty_batch_stops_session() {
        let mut session = Session::default();
        session.ingest(GRAB_1, |_| {});
        assert_eq!(session.ingest(Vec::<String>::new(), |_| {}), 0);
        assert!(session.is_exhausted());

        assert_eq!(session.ingest(GRAB_1, |_| {}), 0);
        assert_eq!(session.parsed().len(), 2);
        assert_eq!(session.batches(), 2);
    }

    #[test]
    fn test_finish_merges_loaded_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chests.csv");

        let loaded = vec![Record::aggregated("aria", "Level 5 Crypt", 3)];
        let mut session = Session::new(loaded);
        session.ingest(GRAB_1, |_| {});
        let ledger = session.finish(&path).unwrap();

        // Loaded spelling came first, so it is canonical
        assert_eq!(ledger.players(), ["aria", "Bob"]);
        assert_eq!(ledger.count("aria", "Level 5 Crypt"), 4);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, ";Level 5 Crypt;Citadel\naria;4;0\nBob;0;1\n");
    }
}
