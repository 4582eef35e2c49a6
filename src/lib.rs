pub mod api;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod llm;
pub mod model;
pub mod pipeline;
pub mod ui;
pub mod validate;

use std::sync::Arc;

use fetcher::ContentFetcher;
use llm::Summarizer;

/// Collaborators shared across handlers. Both are immutable, so each request
/// runs in isolation.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn ContentFetcher>,
    pub summarizer: Arc<dyn Summarizer>,
}
