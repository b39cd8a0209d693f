//! The recommendation output contract and its derived inputs.
//!
//! `Recommendation` is the wire schema both generation strategies must
//! produce. Field names serialize in camelCase; the generative delegate's
//! typed parse of this schema is what validates a recovered response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Count/average/min/max summary of a record set. Recomputed per request,
/// never cached.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AggregateStats {
    pub count: u64,
    pub avg_rating: f64,
    pub avg_duration: f64,
    pub first_occurred_at: Option<DateTime<Utc>>,
    pub last_occurred_at: Option<DateTime<Utc>>,
}

/// A name with its occurrence count, for ranked frequency lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub name: String,
    pub count: u64,
}

/// Ranked frequency lists of categorical attributes, capped at 5 entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatternSet {
    pub top_locations: Vec<RankedEntry>,
    pub top_positions: Vec<RankedEntry>,
}

/// Structured ambience description keyed by a dominant location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub ambience: String,
    pub lighting: String,
    pub sound: String,
    pub detail: String,
}

/// The concrete next-session suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub summary: String,
    pub next_date_suggestion: DateTime<Utc>,
    pub location: String,
    pub positions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attire: Option<String>,
    pub duration_minutes: i64,
    pub rationale: String,
    pub scenario: Scenario,
    pub tips: Vec<String>,
}

/// The statistics block echoed inside `patterns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternStats {
    pub avg_rating: f64,
    pub avg_duration: f64,
    pub count: u64,
}

/// The ranked patterns the suggestion was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patterns {
    pub top_positions: Vec<RankedEntry>,
    pub top_locations: Vec<RankedEntry>,
    pub stats: PatternStats,
}

/// The engine's output contract, identical for both strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub suggestion: Suggestion,
    pub patterns: Patterns,
    pub insights: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_field_names_are_camel_case() {
        let rec = Recommendation {
            suggestion: Suggestion {
                summary: "s".to_string(),
                next_date_suggestion: Utc::now(),
                location: "Hotel".to_string(),
                positions: vec!["Misionero".to_string()],
                attire: None,
                duration_minutes: 60,
                rationale: "r".to_string(),
                scenario: Scenario {
                    ambience: "a".to_string(),
                    lighting: "l".to_string(),
                    sound: "s".to_string(),
                    detail: "d".to_string(),
                },
                tips: vec![],
            },
            patterns: Patterns {
                top_positions: vec![],
                top_locations: vec![],
                stats: PatternStats {
                    avg_rating: 0.0,
                    avg_duration: 0.0,
                    count: 0,
                },
            },
            insights: vec![],
        };

        let json = serde_json::to_value(&rec).unwrap();
        assert!(json["suggestion"]["nextDateSuggestion"].is_string());
        assert!(json["suggestion"]["durationMinutes"].is_i64());
        assert!(json["patterns"]["topPositions"].is_array());
        assert!(json["patterns"]["stats"]["avgRating"].is_number());
        // Optional attire is omitted entirely when absent.
        assert!(json["suggestion"].get("attire").is_none());
    }

    #[test]
    fn test_missing_patterns_fails_deserialization() {
        let json = r#"{"suggestion": null, "insights": []}"#;
        assert!(serde_json::from_str::<Recommendation>(json).is_err());
    }
}
