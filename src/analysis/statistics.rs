//! Per-player scores and category counts.

use super::classify::{classify, points, vault_level, Category};
use crate::ledger::Ledger;
use crate::ocr::Record;
use serde::Serialize;

/// Number of players in the "top players" view unless configured otherwise.
pub const DEFAULT_TOP_PLAYERS: usize = 5;

/// Category counts, indexed by `Category::index`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts([u32; 6]);

impl CategoryCounts {
    pub fn get(&self, category: Category) -> u32 {
        self.0[category.index()]
    }

    fn add(&mut self, category: Category, count: u32) {
        let slot = &mut self.0[category.index()];
        *slot = slot.saturating_add(count);
    }

    pub fn total(&self) -> u32 {
        self.0.iter().fold(0, |acc, &n| acc.saturating_add(n))
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(Category::ALL.len()))?;
        for category in Category::ALL {
            map.serialize_entry(category.label(), &self.get(category))?;
        }
        map.end()
    }
}

/// Summary row for one canonical player.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    /// Canonical player name
    pub player: String,
    /// Total score, may be negative
    pub score: i64,
    /// Rewards of any kind, categorized or not
    pub chests: u32,
    /// Rewards per category
    pub categories: CategoryCounts,
}

/// Aggregate count for one vault level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultLevelTotal {
    /// Level label as found in the source, empty if none was found
    pub level: String,
    pub count: u32,
}

/// Report over one ledger snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// All players, highest score first; ties keep ledger order
    pub players: Vec<PlayerSummary>,
    /// Category totals across all players
    pub category_totals: CategoryCounts,
    /// Vault counts per level, in first-seen order
    pub vault_levels: Vec<VaultLevelTotal>,
}

impl ReportSummary {
    /// Builds the report from a ledger snapshot.
    ///
    /// Every record adds `points * count` to its player's score. Records in
    /// the heroic category add it a second time. Totals saturate instead of
    /// overflowing.
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let mut players = Vec::with_capacity(ledger.players().len());
        let mut category_totals = CategoryCounts::default();
        let mut vault_levels: Vec<VaultLevelTotal> = Vec::new();

        for (player, records) in ledger.iter() {
            let mut summary = PlayerSummary {
                player: player.to_string(),
                score: 0,
                chests: 0,
                categories: CategoryCounts::default(),
            };

            for record in records {
                let score = points(&record.source).saturating_mul(i64::from(record.count));
                summary.score = summary.score.saturating_add(score);
                summary.chests = summary.chests.saturating_add(record.count);

                let Some(category) = classify(&record.source) else {
                    continue;
                };
                summary.categories.add(category, record.count);
                category_totals.add(category, record.count);

                match category {
                    Category::Vault => {
                        let level = vault_level(&record.source);
                        match vault_levels.iter_mut().find(|v| v.level == level) {
                            Some(total) => total.count = total.count.saturating_add(record.count),
                            None => vault_levels.push(VaultLevelTotal {
                                level: level.to_string(),
                                count: record.count,
                            }),
                        }
                    }
                    // Heroic scores count twice. Kept as-is until the scoring rule is settled.
                    Category::Heroic => summary.score = summary.score.saturating_add(score),
                    _ => {}
                }
            }

            players.push(summary);
        }

        // Stable sort keeps ledger order among equal scores
        players.sort_by(|a, b| b.score.cmp(&a.score));

        ReportSummary {
            players,
            category_totals,
            vault_levels,
        }
    }

    /// The `n` highest-ranked players.
    pub fn top_players(&self, n: usize) -> &[PlayerSummary] {
        &self.players[..n.min(self.players.len())]
    }

    /// Looks up a player's row by canonical name.
    pub fn player(&self, name: &str) -> Option<&PlayerSummary> {
        self.players.iter().find(|p| p.player == name)
    }
}

/// Builds a report straight from records.
pub fn report(records: &[Record]) -> ReportSummary {
    ReportSummary::from_ledger(&Ledger::collect(records))
}
