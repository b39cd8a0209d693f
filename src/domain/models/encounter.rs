//! Encounter domain model.
//!
//! An encounter is one logged session against a partner. Records are
//! immutable once created; the recommendation engine only ever reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};

/// The five bounded sub-scores of an encounter, each in [1, 10].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoreSet {
    pub intensity: u8,
    pub exposure: u8,
    pub immersion: u8,
    pub oral_given: u8,
    pub oral_received: u8,
}

impl Default for ScoreSet {
    fn default() -> Self {
        Self {
            intensity: 5,
            exposure: 5,
            immersion: 5,
            oral_given: 5,
            oral_received: 5,
        }
    }
}

impl ScoreSet {
    fn validate(&self) -> DomainResult<()> {
        let scores = [
            ("intensity", self.intensity),
            ("exposure", self.exposure),
            ("immersion", self.immersion),
            ("oral_given", self.oral_given),
            ("oral_received", self.oral_received),
        ];
        for (name, value) in scores {
            if !(1..=10).contains(&value) {
                return Err(DomainError::ValidationFailed(format!(
                    "score {name} must be in 1..=10, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// One logged session record.
///
/// `positions` is an ordered list of categorical tags. The storage adapter
/// persists it as a single delimited column; that representation never
/// crosses this boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub partner_id: Uuid,
    /// Display name of the partner, joined in by the read path.
    pub partner_alias: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub duration_minutes: i64,
    pub location: Option<String>,
    pub positions: Vec<String>,
    pub outcome: Option<String>,
    pub attire: Option<String>,
    pub scores: ScoreSet,
    /// Overall rating in [0, 10].
    pub rating: f64,
    pub notes: Option<String>,
}

impl Encounter {
    /// Create a new encounter with default duration, scores, and rating.
    pub fn new(owner_id: Uuid, partner_id: Uuid, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            partner_id,
            partner_alias: None,
            occurred_at,
            duration_minutes: 60,
            location: None,
            positions: Vec::new(),
            outcome: None,
            attire: None,
            scores: ScoreSet::default(),
            rating: 5.0,
            notes: None,
        }
    }

    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_positions(mut self, positions: Vec<String>) -> Self {
        self.positions = positions;
        self
    }

    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = Some(outcome.into());
        self
    }

    pub fn with_attire(mut self, attire: impl Into<String>) -> Self {
        self.attire = Some(attire.into());
        self
    }

    pub fn with_scores(mut self, scores: ScoreSet) -> Self {
        self.scores = scores;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Validate invariants enforced by the write path.
    pub fn validate(&self) -> DomainResult<()> {
        if self.duration_minutes <= 0 {
            return Err(DomainError::ValidationFailed(format!(
                "duration must be positive, got {}",
                self.duration_minutes
            )));
        }
        if !(0.0..=10.0).contains(&self.rating) {
            return Err(DomainError::ValidationFailed(format!(
                "rating must be in 0..=10, got {}",
                self.rating
            )));
        }
        self.scores.validate()
    }
}
