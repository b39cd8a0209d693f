//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces that infrastructure adapters implement:
//! - `EncounterRepository` / `PartnerRepository`: database operations
//! - `GenerativeClient`: external text-generation service
//!
//! These contracts keep the engine independent of specific storage and
//! transport implementations.

pub mod encounter_repository;
pub mod generative;
pub mod partner_repository;

pub use encounter_repository::EncounterRepository;
pub use generative::{GenerationRequest, GenerativeClient, GenerativeError};
pub use partner_repository::PartnerRepository;
