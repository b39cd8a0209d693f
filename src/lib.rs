//! Tryst - private encounter journal with a pattern-derived recommendation
//! engine.
//!
//! The engine turns a user's encounter history into frequency statistics, a
//! predicted next-session date, a scenario/tips recommendation, and
//! natural-language insights. Two interchangeable strategies produce the
//! same output schema: a generative-text delegate and a deterministic local
//! heuristic the selector falls back to on any delegate failure.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture
//! principles:
//!
//! - **Domain Layer** (`domain`): models, errors, and port traits
//! - **Service Layer** (`services`): the engine components
//! - **Adapter Layer** (`adapters`): SQLite repositories and the
//!   generative-service client
//! - **Infrastructure Layer** (`infrastructure`): configuration loading
//! - **CLI Layer** (`cli`): command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    AggregateStats, Config, Encounter, Partner, PatternSet, Recommendation, Target,
};
pub use domain::ports::{
    EncounterRepository, GenerationRequest, GenerativeClient, GenerativeError, PartnerRepository,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{DelegateOutcome, GenerativeDelegate, RecommendationService};
