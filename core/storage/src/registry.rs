//! Provider registry for dynamic provider resolution.

use std::collections::HashMap;
use std::sync::Arc;

use smsvault_common::{Config, Error, Result};

use crate::provider::BackupProvider;

/// Factory function type for creating providers.
///
/// Construction is eager: a factory builds *and authenticates* its provider,
/// so resolution fails immediately when credentials are unavailable.
pub type ProviderFactory = Box<dyn Fn() -> Result<Arc<dyn BackupProvider>> + Send + Sync>;

/// Registry for backup provider factories.
///
/// Maps recognized provider names to constructors. Each resolution runs the
/// factory again — providers are never shared or cached across requests.
pub struct ProviderRegistry {
    factories: HashMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a provider factory.
    ///
    /// # Errors
    /// - Returns error if name is already registered
    pub fn register(&mut self, name: impl Into<String>, factory: ProviderFactory) -> Result<()> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(Error::AlreadyExists(format!(
                "Provider '{}' is already registered",
                name
            )));
        }
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Resolve a provider by name, constructing and authenticating it.
    ///
    /// # Errors
    /// - `Error::UnsupportedProvider` if no factory is registered for `name`
    /// - Whatever the factory fails with (typically `Error::Authentication`)
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn BackupProvider>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| Error::UnsupportedProvider(name.to_string()))?;
        factory()
    }

    /// Get list of registered provider names.
    pub fn providers(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    /// Check if a provider is registered.
    pub fn has_provider(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a registry with the default providers.
pub fn create_default_registry(config: &Config) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();

    let gdrive_config = crate::gdrive::GDriveConfig::from_config(config);
    registry
        .register(
            "google",
            Box::new(move || {
                let provider = crate::gdrive::GDriveProvider::new(gdrive_config.clone())?;
                Ok(Arc::new(provider) as Arc<dyn BackupProvider>)
            }),
        )
        .expect("Failed to register google provider");

    registry
}
