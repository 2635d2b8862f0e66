//! Application state.

use analyst_core::CompletionClient;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<CompletionClient>,
}

impl AppState {
    pub fn new(client: Arc<CompletionClient>) -> Self {
        Self { client }
    }
}
