//! Backup provider trait definition.

use async_trait::async_trait;

use smsvault_common::Result;

/// Capability interface for one cloud storage backend.
///
/// Implementations authenticate eagerly in their constructor; a constructed
/// provider holds whatever credentials it needs for the lifetime of one
/// request. Nothing is cached across requests — the registry builds a fresh
/// provider per resolution.
#[async_trait]
pub trait BackupProvider: Send + Sync {
    /// Get the provider name (e.g., "google", "memory").
    fn name(&self) -> &str;

    /// Locate the most recent SMS backup and return its raw bytes.
    ///
    /// Recency is decided by the 14-digit timestamp embedded in the backup
    /// filename (`sms-YYYYMMDDHHMMSS.xml`), not by provider metadata: the
    /// producing device stamps the authoritative capture time into the name,
    /// while provider creation time only reflects upload order.
    ///
    /// # Errors
    /// - `Error::NotFound` if no file with a valid backup name exists
    /// - `Error::Authentication` if credentials are missing or rejected
    /// - `Error::Network` on transport or provider API faults
    async fn fetch_latest_backup(&self) -> Result<Vec<u8>>;
}
