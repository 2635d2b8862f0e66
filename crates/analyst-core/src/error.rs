//! Centralized error types for Analyst.

use thiserror::Error;

/// Startup configuration errors. These are fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing AIPIPE_TOKEN: set it in the environment or in .env")]
    MissingToken,

    #[error("Invalid endpoint '{0}'")]
    InvalidEndpoint(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Errors produced by a single chat-completion call.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Failed to reach AI Pipe: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("AI Pipe Error {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Malformed AI Pipe response: {0}")]
    MalformedResponse(String),
}

/// Errors from one analyze request, caught at the handler boundary.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Uploaded file is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}

impl AnalyzeError {
    /// Create an upload error.
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }
}
