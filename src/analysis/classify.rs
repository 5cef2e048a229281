//! Reads scores, vault levels and categories out of source labels.
//!
//! None of these fail: anything unrecognized just yields no score, no level
//! or no category.

use serde::Serialize;

/// Reward category, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Crypt,
    Citadel,
    RaidRunic,
    Vault,
    AncientEvent,
    Heroic,
}

impl Category {
    /// All categories, highest priority first.
    pub const ALL: [Category; 6] = [
        Category::Crypt,
        Category::Citadel,
        Category::RaidRunic,
        Category::Vault,
        Category::AncientEvent,
        Category::Heroic,
    ];

    /// Lowercase text whose presence in a source label selects this category.
    pub fn needle(self) -> &'static str {
        match self {
            Category::Crypt => "crypt",
            Category::Citadel => "citadel",
            Category::RaidRunic => "runic",
            Category::Vault => "vault",
            Category::AncientEvent => "ancient",
            Category::Heroic => "heroic",
        }
    }

    /// Column label used in summaries.
    pub fn label(self) -> &'static str {
        match self {
            Category::Crypt => "crypt",
            Category::Citadel => "citadel",
            Category::RaidRunic => "raid-runic",
            Category::Vault => "vault",
            Category::AncientEvent => "ancient-event",
            Category::Heroic => "heroic",
        }
    }

    /// Index into per-category arrays.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// First category whose needle occurs in the source label (case-insensitive).
pub fn classify(source: &str) -> Option<Category> {
    let source = source.to_lowercase();
    Category::ALL
        .into_iter()
        .find(|category| source.contains(category.needle()))
}

/// Point value carried by a source label.
///
/// Tokens are tried left to right. A token with a hyphen after its first
/// character contributes the number after the hyphen (`Runic-7` is 7); any
/// other token must be a whole integer. The first token that parses wins,
/// 0 if none do.
///
/// A token starting with a hyphen is parsed whole, so `-3` scores -3.
pub fn points(source: &str) -> i64 {
    for token in source.split_whitespace() {
        let parsed = match token.find('-') {
            Some(pos) if pos > 0 => token[pos + 1..].parse::<i64>(),
            _ => token.parse::<i64>(),
        };
        if let Ok(value) = parsed {
            return value;
        }
    }
    0
}

/// Vault level label: the first token with a hyphen or containing "45".
pub fn vault_level(source: &str) -> &str {
    source
        .split_whitespace()
        .find(|token| token.contains('-') || token.contains("45"))
        .unwrap_or("")
}
