//! Shared application state.

use std::sync::Arc;

use smsvault_storage::ProviderRegistry;

/// State threaded into request handlers.
///
/// Holds only the provider registry; the registry itself is immutable after
/// startup, so requests share it without coordination.
#[derive(Clone)]
pub struct AppState {
    /// Registered backup providers.
    pub registry: Arc<ProviderRegistry>,
}

impl AppState {
    /// Create state around a registry.
    pub fn new(registry: ProviderRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}
