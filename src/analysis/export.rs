//! Hands the report to renderers: JSON for documents and charts, plain text for the log.

use super::classify::Category;
use super::statistics::{PlayerSummary, ReportSummary};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// What the external renderer receives.
#[derive(Debug, Serialize)]
pub struct ReportExport<'a> {
    /// Generation time (local, ISO format)
    pub generated_at: String,
    /// Leading players for the summary view
    pub top_players: &'a [PlayerSummary],
    #[serde(flatten)]
    pub summary: &'a ReportSummary,
}

impl<'a> ReportExport<'a> {
    pub fn new(summary: &'a ReportSummary, top: usize) -> Self {
        Self {
            generated_at: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            top_players: summary.top_players(top),
            summary,
        }
    }
}

/// Export the report to a JSON file.
///
/// The output is pretty-printed for human readability.
pub fn export_to_json(summary: &ReportSummary, top: usize, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&ReportExport::new(summary, top))
        .context("Failed to serialize report to JSON")?;

    let mut file = File::create(output_path)
        .context(format!("Failed to create report file: {}", output_path.display()))?;

    file.write_all(json.as_bytes())
        .context("Failed to write report data")?;

    Ok(())
}

/// Plain-text table of the ranked players, one line per row.
pub fn summary_lines(summary: &ReportSummary, top: usize) -> Vec<String> {
    let mut lines = Vec::new();

    let mut header = format!("{:<4} {:<20} {:>6} {:>6}", "#", "Player", "Score", "Total");
    for category in Category::ALL {
        header.push_str(&format!(" {:>13}", category.label()));
    }
    lines.push(header);

    for (rank, player) in summary.players.iter().enumerate() {
        let marker = if rank < top { "*" } else { " " };
        let mut line = format!(
            "{:<4} {:<20} {:>6} {:>6}",
            format!("{}{}", rank + 1, marker),
            player.player,
            player.score,
            player.chests
        );
        for category in Category::ALL {
            line.push_str(&format!(" {:>13}", player.categories.get(category)));
        }
        lines.push(line);
    }

    for vault in &summary.vault_levels {
        let level = if vault.level.is_empty() { "?" } else { vault.level.as_str() };
        lines.push(format!("Vault level {}: {}", level, vault.count));
    }

    lines
}
