//! Chat-completion client for the AI Pipe OpenAI-compatible endpoint.

pub mod client;

pub use client::{CompletionClient, CompletionConfig};

/// Fixed chat-completion endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://aipipe.org/openai/v1/chat/completions";

/// Model identifier sent with every request.
pub const MODEL: &str = "gpt-3.5-turbo";

/// Upper bound on generated tokens.
pub const MAX_TOKENS: u32 = 150;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
