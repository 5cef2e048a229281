//! Reward report generation.
//!
//! This module provides:
//! - Source label classification (category, points, vault level)
//! - Per-player scores and category counts, ranked
//! - JSON export of the report for external renderers

pub mod classify;
pub mod export;
pub mod statistics;

pub use statistics::{ReportSummary, DEFAULT_TOP_PLAYERS};

use crate::ledger::Ledger;
use anyhow::Result;
use std::path::Path;

/// Builds the report for a ledger snapshot, logs it, and writes the JSON export.
pub fn generate_report(ledger: &Ledger, top: usize, json_path: &Path) -> Result<ReportSummary> {
    let summary = ReportSummary::from_ledger(ledger);

    crate::log(&format!(
        "Report: {} players, {} chests",
        summary.players.len(),
        ledger.total()
    ));
    for line in export::summary_lines(&summary, top) {
        crate::log(&line);
    }

    export::export_to_json(&summary, top, json_path)?;
    crate::log(&format!("Report JSON saved: {}", json_path.display()));

    Ok(summary)
}
