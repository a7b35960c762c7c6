//! Application state for the text2sql service.

use std::sync::Arc;

use common::config::AppConfig;

use crate::llm::{ChatModel, OpenAiChat};

/// Application state shared across handlers.
///
/// Holds the configuration and the chat client. Database handles are NOT
/// part of the state: every request builds its own from the credentials in
/// its body.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub llm: Arc<dyn ChatModel>,
}

impl AppState {
    /// Creates a new application state with a chat client built from the
    /// configured credential.
    pub fn new(config: AppConfig) -> Self {
        let llm: Arc<dyn ChatModel> = Arc::new(OpenAiChat::new(config.llm.clone()));
        Self { config, llm }
    }
}
