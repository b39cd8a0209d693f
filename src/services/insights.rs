//! Insight narrator: threshold-conditioned natural-language sentences.

use crate::domain::models::{AggregateStats, Encounter, PatternSet};

/// Rating at or above which an encounter counts as a "best encounter".
const BEST_RATING_THRESHOLD: f64 = 8.0;

/// Narrate the aggregates as an ordered list of sentences.
///
/// Zero history produces exactly one sentence. The best-encounter sentence
/// names the first record meeting the threshold in the order the history
/// was supplied, not the global maximum.
pub fn narrate(stats: &AggregateStats, patterns: &PatternSet, history: &[Encounter]) -> Vec<String> {
    if stats.count == 0 {
        return vec!["This is your first encounter. Enjoy the experience!".to_string()];
    }

    let mut insights = Vec::new();

    insights.push(format!(
        "You have logged {} encounter{}.",
        stats.count,
        if stats.count == 1 { "" } else { "s" }
    ));

    if stats.avg_rating > 7.0 {
        insights.push(format!(
            "Your average rating is {:.1}/10 - excellent!",
            stats.avg_rating
        ));
    } else if stats.avg_rating > 5.0 {
        insights.push(format!("Your average rating is {:.1}/10.", stats.avg_rating));
    }

    if let Some(top) = patterns.top_locations.first() {
        insights.push(format!(
            "Your favorite location is \"{}\" (used {} times).",
            top.name, top.count
        ));
    }

    if let Some(top) = patterns.top_positions.first() {
        insights.push(format!(
            "Your favorite position is \"{}\" (used {} times).",
            top.name, top.count
        ));
    }

    if let Some(best) = history
        .iter()
        .find(|e| e.rating >= BEST_RATING_THRESHOLD)
    {
        insights.push(format!(
            "Your best encounter was rated {:.1}/10.",
            best.rating
        ));
    }

    insights
}
