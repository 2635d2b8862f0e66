//! Analyst Core Library
//!
//! Analysis results, prompt construction and the chat-completion client.

pub mod analysis;
pub mod completion;
pub mod error;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analysis::model::AnalysisResult;
pub use completion::{CompletionClient, CompletionConfig};
pub use error::{AnalyzeError, CompletionError, ConfigError};
