//! Statistics overview: the dashboard-style summary across a full journal.
//!
//! Unlike the insight narrator, the best encounter here is the global
//! maximum (latest date wins ties), since the overview reports facts
//! rather than narrating the supplied order.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::{Encounter, Partner};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewTotals {
    pub encounters: u64,
    pub partners: u64,
    pub this_month: u64,
    pub avg_rating: f64,
    pub avg_duration: f64,
    pub first_occurred_at: Option<DateTime<Utc>>,
    pub last_occurred_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingBucket {
    pub range: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyActivity {
    /// Calendar month in `YYYY-MM` form.
    pub month: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerSummary {
    pub partner_id: Uuid,
    pub alias: String,
    pub encounters: u64,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestEncounter {
    pub encounter_id: Uuid,
    pub partner_alias: Option<String>,
    pub rating: f64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub totals: OverviewTotals,
    pub rating_distribution: Vec<RatingBucket>,
    pub monthly_activity: Vec<MonthlyActivity>,
    pub top_partners: Vec<PartnerSummary>,
    pub best_encounter: Option<BestEncounter>,
}

const BUCKET_RANGES: [&str; 4] = ["9-10", "7-8", "4-6", "1-3"];

fn bucket_for(rating: f64) -> &'static str {
    if rating >= 9.0 {
        "9-10"
    } else if rating >= 7.0 {
        "7-8"
    } else if rating >= 4.0 {
        "4-6"
    } else {
        "1-3"
    }
}

/// Summarize the full journal.
pub fn summarize(history: &[Encounter], partners: &[Partner], now: DateTime<Utc>) -> Overview {
    let count = history.len() as u64;
    let (avg_rating, avg_duration) = if history.is_empty() {
        (0.0, 0.0)
    } else {
        (
            history.iter().map(|e| e.rating).sum::<f64>() / count as f64,
            history.iter().map(|e| e.duration_minutes).sum::<i64>() as f64 / count as f64,
        )
    };

    let this_month = history
        .iter()
        .filter(|e| e.occurred_at.year() == now.year() && e.occurred_at.month() == now.month())
        .count() as u64;

    let mut buckets: HashMap<&'static str, u64> = HashMap::new();
    for encounter in history {
        *buckets.entry(bucket_for(encounter.rating)).or_default() += 1;
    }
    let rating_distribution = BUCKET_RANGES
        .iter()
        .filter_map(|range| {
            buckets.get(range).map(|&count| RatingBucket {
                range: (*range).to_string(),
                count,
            })
        })
        .collect();

    let horizon = now - Duration::days(365);
    let mut monthly: HashMap<String, u64> = HashMap::new();
    for encounter in history.iter().filter(|e| e.occurred_at >= horizon) {
        *monthly
            .entry(encounter.occurred_at.format("%Y-%m").to_string())
            .or_default() += 1;
    }
    let mut monthly_activity: Vec<MonthlyActivity> = monthly
        .into_iter()
        .map(|(month, count)| MonthlyActivity { month, count })
        .collect();
    monthly_activity.sort_unstable_by(|a, b| b.month.cmp(&a.month));

    let alias_by_id: HashMap<Uuid, &str> = partners
        .iter()
        .map(|p| (p.id, p.alias.as_str()))
        .collect();
    let mut per_partner: HashMap<Uuid, (u64, f64)> = HashMap::new();
    for encounter in history {
        let entry = per_partner.entry(encounter.partner_id).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += encounter.rating;
    }
    let mut top_partners: Vec<PartnerSummary> = per_partner
        .into_iter()
        .map(|(partner_id, (encounters, rating_sum))| PartnerSummary {
            partner_id,
            alias: alias_by_id
                .get(&partner_id)
                .map_or_else(|| partner_id.to_string(), ToString::to_string),
            encounters,
            avg_rating: rating_sum / encounters as f64,
        })
        .collect();
    top_partners.sort_unstable_by(|a, b| {
        b.encounters
            .cmp(&a.encounters)
            .then_with(|| a.alias.cmp(&b.alias))
    });
    top_partners.truncate(5);

    let best_encounter = history
        .iter()
        .max_by(|a, b| {
            a.rating
                .total_cmp(&b.rating)
                .then_with(|| a.occurred_at.cmp(&b.occurred_at))
        })
        .map(|e| BestEncounter {
            encounter_id: e.id,
            partner_alias: e.partner_alias.clone(),
            rating: e.rating,
            occurred_at: e.occurred_at,
        });

    Overview {
        totals: OverviewTotals {
            encounters: count,
            partners: partners.len() as u64,
            this_month,
            avg_rating,
            avg_duration,
            first_occurred_at: history.iter().map(|e| e.occurred_at).min(),
            last_occurred_at: history.iter().map(|e| e.occurred_at).max(),
        },
        rating_distribution,
        monthly_activity,
        top_partners,
        best_encounter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encounter(partner: &Partner, days_ago: i64, rating: f64) -> Encounter {
        let mut e = Encounter::new(
            partner.owner_id,
            partner.id,
            Utc::now() - Duration::days(days_ago),
        )
        .with_rating(rating);
        e.partner_alias = Some(partner.alias.clone());
        e
    }

    #[test]
    fn test_empty_journal() {
        let overview = summarize(&[], &[], Utc::now());
        assert_eq!(overview.totals.encounters, 0);
        assert!(overview.rating_distribution.is_empty());
        assert!(overview.best_encounter.is_none());
    }

    #[test]
    fn test_rating_buckets() {
        let owner = Uuid::new_v4();
        let p = Partner::new(owner, "Alex");
        let history = vec![
            encounter(&p, 1, 9.5),
            encounter(&p, 2, 9.0),
            encounter(&p, 3, 7.0),
            encounter(&p, 4, 4.0),
            encounter(&p, 5, 2.0),
        ];
        let overview = summarize(&history, &[p], Utc::now());
        let ranges: Vec<(&str, u64)> = overview
            .rating_distribution
            .iter()
            .map(|b| (b.range.as_str(), b.count))
            .collect();
        assert_eq!(
            ranges,
            vec![("9-10", 2), ("7-8", 1), ("4-6", 1), ("1-3", 1)]
        );
    }

    #[test]
    fn test_top_partners_ranked_by_count() {
        let owner = Uuid::new_v4();
        let alex = Partner::new(owner, "Alex");
        let sam = Partner::new(owner, "Sam");
        let history = vec![
            encounter(&alex, 1, 8.0),
            encounter(&sam, 2, 6.0),
            encounter(&sam, 3, 7.0),
        ];
        let overview = summarize(&history, &[alex, sam], Utc::now());

        assert_eq!(overview.totals.partners, 2);
        assert_eq!(overview.top_partners[0].alias, "Sam");
        assert_eq!(overview.top_partners[0].encounters, 2);
        assert!((overview.top_partners[0].avg_rating - 6.5).abs() < 1e-9);
    }

    #[test]
    fn test_best_encounter_is_global_max_latest_wins_ties() {
        let owner = Uuid::new_v4();
        let p = Partner::new(owner, "Alex");
        let older = encounter(&p, 20, 9.0);
        let newer = encounter(&p, 5, 9.0);
        let history = vec![older, newer.clone(), encounter(&p, 1, 8.0)];

        let overview = summarize(&history, &[p], Utc::now());
        let best = overview.best_encounter.unwrap();
        assert_eq!(best.encounter_id, newer.id);
    }

    #[test]
    fn test_monthly_activity_ignores_old_entries() {
        let owner = Uuid::new_v4();
        let p = Partner::new(owner, "Alex");
        let history = vec![encounter(&p, 10, 7.0), encounter(&p, 400, 7.0)];

        let overview = summarize(&history, &[p], Utc::now());
        let total: u64 = overview.monthly_activity.iter().map(|m| m.count).sum();
        assert_eq!(total, 1);
    }
}
