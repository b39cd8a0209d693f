//! Mock generative client for testing.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{GenerationRequest, GenerativeClient, GenerativeError};

/// Scriptable in-memory client. Responses are popped in FIFO order; every
/// prompt is recorded for assertions.
#[derive(Default)]
pub struct MockGenerativeClient {
    configured: bool,
    responses: Mutex<VecDeque<Result<String, GenerativeError>>>,
    prompts: Mutex<Vec<GenerationRequest>>,
}

impl MockGenerativeClient {
    /// A configured client with no scripted responses (every call fails
    /// with a transport error).
    pub fn new() -> Self {
        Self {
            configured: true,
            ..Self::default()
        }
    }

    /// A client with no credentials at all.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Queue a successful completion.
    pub fn push_completion(&self, text: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue a failure.
    pub fn push_error(&self, error: GenerativeError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// All requests seen so far, in call order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.prompts.lock().unwrap().clone()
    }

    /// The most recent request, if any call was made.
    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl GenerativeClient for MockGenerativeClient {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(&self, request: GenerationRequest) -> Result<String, GenerativeError> {
        self.prompts.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerativeError::Transport("no scripted response".to_string())))
    }
}
