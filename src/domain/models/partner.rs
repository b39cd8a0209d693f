//! Partner domain model and the recommendation target selector.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};

/// A named counterparty the owner logs encounters against.
///
/// `alias` is unique per owner. The descriptors are free-form and optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub alias: String,
    pub physique: Option<String>,
    pub face: Option<String>,
    pub age: Option<i64>,
    pub registered_at: DateTime<Utc>,
}

impl Partner {
    pub fn new(owner_id: Uuid, alias: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            alias: alias.into(),
            physique: None,
            face: None,
            age: None,
            registered_at: Utc::now(),
        }
    }

    pub fn with_physique(mut self, physique: impl Into<String>) -> Self {
        self.physique = Some(physique.into());
        self
    }

    pub fn with_face(mut self, face: impl Into<String>) -> Self {
        self.face = Some(face.into());
        self
    }

    pub fn with_age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.alias.trim().is_empty() {
            return Err(DomainError::ValidationFailed(
                "alias must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Which record set a recommendation is computed over: one partner, or the
/// synthetic cross-partner view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    All,
    Partner(Uuid),
}

impl FromStr for Target {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        Uuid::parse_str(s).map(Self::Partner).map_err(|_| {
            DomainError::ValidationFailed(format!("target must be 'all' or a partner id, got {s:?}"))
        })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Partner(id) => write!(f, "{id}"),
        }
    }
}
