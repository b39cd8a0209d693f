//! Generative text service adapters.

pub mod anthropic;
pub mod mock;

pub use anthropic::AnthropicGenerativeClient;
pub use mock::MockGenerativeClient;
