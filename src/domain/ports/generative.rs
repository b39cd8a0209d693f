//! Port trait for the external text-generation service.
//!
//! The engine only needs "prompt in, free-form text out". Adapters own the
//! transport, authentication, and timeout; the error taxonomy below is what
//! the delegate maps onto its fallback decision. Every variant means
//! "unavailable", never a panic or a caller-visible failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Optional system prompt framing the task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// The user prompt.
    pub prompt: String,

    /// Sampling temperature.
    pub temperature: f64,

    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

/// Ways the external service can fail. All of them resolve to the
/// heuristic fallback; none propagate to the engine's caller.
#[derive(Debug, Error)]
pub enum GenerativeError {
    #[error("no API credentials configured")]
    MissingCredentials,

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("service returned an empty completion")]
    EmptyCompletion,
}

/// Port trait for a text-generation client.
///
/// Credentials are injected at construction; implementations must not read
/// mutable global state per call. Calls are context-free: no memory of
/// prior requests.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Whether the client has credentials to attempt a call at all.
    fn is_configured(&self) -> bool;

    /// Run one completion and return the raw text.
    async fn complete(&self, request: GenerationRequest) -> Result<String, GenerativeError>;
}
