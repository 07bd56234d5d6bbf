//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::content::{ContentConfig, ContentStore};

/// Shared application state.
pub struct AppState {
    /// File-backed content store, opened once at startup.
    pub store: ContentStore,
}

impl AppState {
    /// Create state from environment-driven configuration.
    #[must_use]
    pub fn from_env() -> Arc<Self> {
        Self::with_config(ContentConfig::from_env())
    }

    /// Create state over an explicit configuration.
    #[must_use]
    pub fn with_config(config: ContentConfig) -> Arc<Self> {
        let store = ContentStore::open(config);
        tracing::info!(issue = store.current_issue(), "content store opened");
        Arc::new(Self { store })
    }
}
