use std::sync::Arc;

use crate::store::PromptStore;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PromptStore>,
}

impl AppState {
    pub fn new(store: Arc<PromptStore>) -> Self {
        Self { store }
    }
}
