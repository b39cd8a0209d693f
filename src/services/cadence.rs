//! Date predictor: derives a next-session timestamp from historical
//! cadence.

use chrono::{DateTime, Duration, Utc};

use crate::domain::models::AggregateStats;

/// Predict the next-session timestamp.
///
/// - No history at all: `now + 3 days`.
/// - A single record (the interval divisor would be zero): `last + 7 days`.
/// - Otherwise: `last + (last - first) / (count - 1)`.
///
/// The cadence result is computed first and clamped after: anything landing
/// at or before `now` becomes `now + 7 days`. Skipping the clamp would
/// surface past-dated suggestions.
pub fn predict_next(stats: &AggregateStats, now: DateTime<Utc>) -> DateTime<Utc> {
    let suggested = match (stats.count, stats.first_occurred_at, stats.last_occurred_at) {
        (0, _, _) | (_, _, None) => return now + Duration::days(3),
        (1, _, Some(last)) => last + Duration::days(7),
        (count, Some(first), Some(last)) => {
            let divisor = i32::try_from(count - 1).unwrap_or(i32::MAX);
            last + (last - first) / divisor
        }
        (_, None, Some(last)) => last + Duration::days(7),
    };

    if suggested <= now {
        now + Duration::days(7)
    } else {
        suggested
    }
}
