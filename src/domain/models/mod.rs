//! Domain models for the tryst system.

pub mod config;
pub mod encounter;
pub mod partner;
pub mod recommendation;

pub use config::{Config, DatabaseConfig, GenerativeConfig, LoggingConfig, ProfileConfig};
pub use encounter::{Encounter, ScoreSet};
pub use partner::{Partner, Target};
pub use recommendation::{
    AggregateStats, PatternSet, PatternStats, Patterns, RankedEntry, Recommendation, Scenario,
    Suggestion,
};
