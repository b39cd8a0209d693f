//! The recommendation engine and its supporting services.

pub mod cadence;
pub mod delegate;
pub mod heuristic;
pub mod insights;
pub mod overview;
pub mod patterns;
pub mod playbook;
pub mod recommendation;
pub mod stats;

pub use delegate::{DelegateContext, DelegateOutcome, GenerativeDelegate};
pub use recommendation::RecommendationService;
