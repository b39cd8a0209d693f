//! Stats aggregator: reduces a record set into count/average/min/max
//! summaries.

use crate::domain::models::{AggregateStats, Encounter};

/// Aggregate a filtered record set. Zero history is valid; averages
/// default to 0 and the occurrence bounds stay unset.
pub fn aggregate(history: &[Encounter]) -> AggregateStats {
    if history.is_empty() {
        return AggregateStats::default();
    }

    let count = history.len() as u64;
    let rating_sum: f64 = history.iter().map(|e| e.rating).sum();
    let duration_sum: i64 = history.iter().map(|e| e.duration_minutes).sum();

    AggregateStats {
        count,
        avg_rating: rating_sum / count as f64,
        avg_duration: duration_sum as f64 / count as f64,
        first_occurred_at: history.iter().map(|e| e.occurred_at).min(),
        last_occurred_at: history.iter().map(|e| e.occurred_at).max(),
    }
}
