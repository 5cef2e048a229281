//! Reconstructs reward records from raw OCR lines.
//!
//! The recognized region lists rewards as a name (possibly wrapped over several
//! lines) followed by a `From <player>` line and a `Source <label>` line, in no
//! guaranteed order. OCR sometimes splits a marker from its value, so a marker
//! line with nothing after it means the value follows on the next non-empty line.

use super::record::Record;

/// Marker that opens the player field.
const PLAYER_MARKER: &str = "From";

/// Marker that opens the source field.
const SOURCE_MARKER: &str = "Source";

/// Lines containing this are recognized and deliberately ignored.
/// What produces them is unknown, so they are passed over without touching any field.
const PASSTHROUGH_MARKER: &str = "PRBS";

/// Progress of a marker-introduced field within the record being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FieldState {
    /// No marker seen yet
    #[default]
    NotStarted,
    /// Marker seen without a value; the next non-empty line is the value
    AwaitingContinuation,
    /// Value captured
    Complete,
}

impl FieldState {
    /// Whether `line` supplies this field.
    fn accepts(self, line: &str, marker: &str) -> bool {
        match self {
            FieldState::NotStarted => line.starts_with(marker),
            FieldState::AwaitingContinuation => true,
            FieldState::Complete => false,
        }
    }

    /// State after a value has been extracted.
    fn after(value: &str) -> Self {
        if value.is_empty() {
            FieldState::AwaitingContinuation
        } else {
            FieldState::Complete
        }
    }
}

/// Stateful parser fed one OCR line at a time.
///
/// A record is emitted as soon as its name, player and source are all known.
/// Blank lines are not separators.
#[derive(Debug, Default)]
pub struct LineParser {
    current: Record,
    player: FieldState,
    source: FieldState,
}

impl LineParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one line, returning a record if this line completed one.
    pub fn feed(&mut self, line: &str) -> Option<Record> {
        let line = line.trim();
        if line.is_empty() || line.contains(PASSTHROUGH_MARKER) {
            return None;
        }

        if self.player.accepts(line, PLAYER_MARKER) {
            let value = match self.player {
                FieldState::AwaitingContinuation => line.to_string(),
                _ => marker_value(line).replace('.', ""),
            };
            self.player = FieldState::after(&value);
            self.current.player = value;
        } else if self.source.accepts(line, SOURCE_MARKER) {
            let value = match self.source {
                FieldState::AwaitingContinuation => line.to_string(),
                _ => marker_value(line),
            };
            self.source = FieldState::after(&value);
            self.current.source = value;
        } else {
            let joined = format!("{} {}", self.current.name, line);
            self.current.name = joined.trim().to_string();
        }

        if self.current.is_valid() {
            self.player = FieldState::NotStarted;
            self.source = FieldState::NotStarted;
            Some(std::mem::take(&mut self.current))
        } else {
            None
        }
    }
}

/// Everything after the marker token, re-joined with single spaces.
fn marker_value(line: &str) -> String {
    line.split_whitespace().skip(1).collect::<Vec<_>>().join(" ")
}

/// Parses one batch of OCR lines into complete records.
///
/// `on_record` receives the one-line rendering of each record as it completes.
/// A record still incomplete when the batch ends is dropped.
pub fn parse_lines<I, S>(lines: I, mut on_record: impl FnMut(&str)) -> Vec<Record>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = LineParser::new();
    let mut records = Vec::new();

    for line in lines {
        if let Some(record) = parser.feed(line.as_ref()) {
            on_record(&record.to_string());
            records.push(record);
        }
    }

    records
}
