//! Pattern extractor: ranked frequency lists of categorical attributes.

use std::collections::HashMap;

use crate::domain::models::{Encounter, PatternSet, RankedEntry};

/// Ranked lists are capped at this many entries.
pub const PATTERN_CAP: usize = 5;

/// Extract the top locations and top individual position tags from a
/// record set.
///
/// Position tags are counted per individual tag, not per raw combination:
/// two records tagged `[A, B]` count `A: 2, B: 2`. Ties between equal
/// counts break by name; any stable order would do, since only the capped
/// top entries surface to the user.
pub fn extract(history: &[Encounter]) -> PatternSet {
    let mut locations: HashMap<String, u64> = HashMap::new();
    let mut positions: HashMap<String, u64> = HashMap::new();

    for encounter in history {
        if let Some(location) = &encounter.location {
            let trimmed = location.trim();
            if !trimmed.is_empty() {
                *locations.entry(trimmed.to_string()).or_default() += 1;
            }
        }
        for tag in &encounter.positions {
            let trimmed = tag.trim();
            if !trimmed.is_empty() {
                *positions.entry(trimmed.to_string()).or_default() += 1;
            }
        }
    }

    PatternSet {
        top_locations: rank(locations),
        top_positions: rank(positions),
    }
}

fn rank(counts: HashMap<String, u64>) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = counts
        .into_iter()
        .map(|(name, count)| RankedEntry { name, count })
        .collect();
    entries.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    entries.truncate(PATTERN_CAP);
    entries
}
