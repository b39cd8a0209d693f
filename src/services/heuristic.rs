//! Heuristic composer: the deterministic fallback strategy.

use chrono::{DateTime, Utc};

use crate::domain::models::{
    AggregateStats, Encounter, PatternSet, PatternStats, Patterns, Recommendation, Suggestion,
};
use crate::services::{cadence, insights, playbook};

/// Compose a recommendation locally from the aggregates.
///
/// Pure function: identical `(stats, patterns, history, now)` always yields
/// an identical result. `now` is a parameter for exactly that reason.
pub fn compose(
    stats: &AggregateStats,
    patterns: &PatternSet,
    history: &[Encounter],
    now: DateTime<Utc>,
) -> Recommendation {
    let location = patterns
        .top_locations
        .first()
        .map_or(playbook::DEFAULT_LOCATION, |e| e.name.as_str());
    let position = patterns
        .top_positions
        .first()
        .map_or(playbook::DEFAULT_POSITION, |e| e.name.as_str());

    let duration = match stats.avg_duration.round() as i64 {
        d if d > 0 => d,
        _ => 60,
    };

    let (summary, rationale) = if stats.count > 0 {
        (
            format!(
                "Based on your history of {} encounter{}, here are personalized recommendations.",
                stats.count,
                if stats.count == 1 { "" } else { "s" }
            ),
            format!(
                "Based on your previous encounters, we recommend trying \"{position}\" at \
                 \"{location}\" for about {duration} minutes."
            ),
        )
    } else {
        (
            "Since this is your first encounter, here are some starting suggestions.".to_string(),
            format!(
                "For your first encounter, we suggest starting with \"{position}\" at \
                 \"{location}\" for about {duration} minutes."
            ),
        )
    };

    Recommendation {
        suggestion: Suggestion {
            summary,
            next_date_suggestion: cadence::predict_next(stats, now),
            location: location.to_string(),
            positions: vec![position.to_string()],
            attire: None,
            duration_minutes: duration,
            rationale,
            scenario: playbook::scenario_for(Some(location)),
            tips: playbook::tips_for(Some(position)),
        },
        patterns: Patterns {
            top_positions: patterns.top_positions.clone(),
            top_locations: patterns.top_locations.clone(),
            stats: PatternStats {
                avg_rating: stats.avg_rating,
                avg_duration: stats.avg_duration.round(),
                count: stats.count,
            },
        },
        insights: insights::narrate(stats, patterns, history),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{patterns as extractor, stats as aggregator};
    use chrono::Duration;
    use uuid::Uuid;

    fn encounter(days_ago: i64, rating: f64, location: &str, tags: &[&str]) -> Encounter {
        Encounter::new(Uuid::new_v4(), Uuid::new_v4(), Utc::now() - Duration::days(days_ago))
            .with_rating(rating)
            .with_duration(75)
            .with_location(location)
            .with_positions(tags.iter().map(ToString::to_string).collect())
    }

    fn compose_over(history: &[Encounter], now: DateTime<Utc>) -> Recommendation {
        compose(
            &aggregator::aggregate(history),
            &extractor::extract(history),
            history,
            now,
        )
    }

    #[test]
    fn test_composition_is_pure() {
        let now = Utc::now();
        let history = vec![
            encounter(20, 6.0, "Hotel", &["Misionero", "Perrito"]),
            encounter(10, 8.0, "Hotel", &["Misionero"]),
        ];
        let a = compose_over(&history, now);
        let b = compose_over(&history, now);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_first_encounter_defaults() {
        let now = Utc::now();
        let rec = compose_over(&[], now);

        assert!(rec.suggestion.summary.contains("first"));
        assert_eq!(rec.suggestion.next_date_suggestion, now + Duration::days(3));
        assert_eq!(rec.suggestion.location, playbook::DEFAULT_LOCATION);
        assert_eq!(rec.suggestion.positions, vec![playbook::DEFAULT_POSITION]);
        assert_eq!(rec.suggestion.duration_minutes, 60);
        assert_eq!(rec.suggestion.scenario, playbook::scenario_for(None));
        assert_eq!(rec.suggestion.tips, playbook::tips_for(None));
        assert_eq!(rec.patterns.stats.count, 0);
        assert_eq!(rec.insights.len(), 1);
        assert!(rec.suggestion.attire.is_none());
    }

    #[test]
    fn test_history_drives_suggestion_fields() {
        let now = Utc::now();
        let history = vec![
            encounter(30, 6.0, "Motel", &["Perrito"]),
            encounter(20, 8.0, "Motel", &["Perrito", "Cowgirl"]),
            encounter(10, 9.0, "Hotel", &["Perrito"]),
        ];
        let rec = compose_over(&history, now);

        assert_eq!(rec.suggestion.location, "Motel");
        assert_eq!(rec.suggestion.positions, vec!["Perrito"]);
        assert_eq!(rec.suggestion.duration_minutes, 75);
        assert!(rec.suggestion.rationale.contains("\"Perrito\""));
        assert!(rec.suggestion.rationale.contains("\"Motel\""));
        assert_eq!(rec.suggestion.scenario, playbook::scenario_for(Some("Motel")));
        assert_eq!(rec.suggestion.tips, playbook::tips_for(Some("Perrito")));
        assert_eq!(rec.patterns.stats.count, 3);
        assert_eq!(rec.patterns.stats.avg_duration, 75.0);
    }

    #[test]
    fn test_summary_pluralizes() {
        let now = Utc::now();
        let one = compose_over(&[encounter(5, 6.0, "Hotel", &[])], now);
        assert!(one.suggestion.summary.contains("1 encounter,"));

        let history = vec![
            encounter(5, 6.0, "Hotel", &[]),
            encounter(3, 6.0, "Hotel", &[]),
        ];
        let two = compose_over(&history, now);
        assert!(two.suggestion.summary.contains("2 encounters,"));
    }
}
