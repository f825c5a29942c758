//! In-memory backup provider for testing.

use async_trait::async_trait;

use smsvault_common::{Error, Result};

use crate::backup::select_latest_backup;
use crate::provider::BackupProvider;

/// In-memory backup provider.
///
/// Useful for testing and development: holds a fixed set of named files and
/// applies the same filename-timestamp selection as the real providers.
/// All data is lost on drop.
pub struct MemoryProvider {
    files: Vec<(String, Vec<u8>)>,
}

impl MemoryProvider {
    /// Create a new provider with no files.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Add a named file, preserving insertion order.
    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.files.push((name.into(), content.into()));
        self
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackupProvider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_latest_backup(&self) -> Result<Vec<u8>> {
        if self.files.is_empty() {
            return Err(Error::NotFound("No SMS backup files found".to_string()));
        }

        let latest = select_latest_backup(&self.files, |(name, _)| name.as_str())
            .ok_or_else(|| {
                Error::NotFound("No SMS backup files with a valid timestamp found".to_string())
            })?;

        Ok(latest.1.clone())
    }
}
