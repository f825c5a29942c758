//! Google Drive backup provider implementation.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use smsvault_common::{Config, Environment, Error, Result};

use crate::backup::select_latest_backup;
use crate::provider::BackupProvider;

use super::auth::{self, AuthManager, TokenManager, GOOGLE_TOKEN_URL};
use super::client::{DriveClient, DRIVE_API_BASE};

/// Google Drive provider configuration.
///
/// Derived from the process [`Config`]; the endpoint fields default to the
/// real Google endpoints and exist so tests can point the provider at a mock
/// backend.
#[derive(Debug, Clone)]
pub struct GDriveConfig {
    /// Deployment mode.
    pub environment: Environment,
    /// Path of the credentials file.
    pub credentials_path: PathBuf,
    /// Credentials JSON captured at startup (production only).
    pub credentials_json: Option<String>,
    /// Authorization scopes attached to token requests.
    pub scopes: Vec<String>,
    /// Drive API base URL.
    pub api_base: String,
    /// OAuth2 token endpoint URL.
    pub token_url: String,
}

impl GDriveConfig {
    /// Build the provider configuration from the process configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            environment: config.environment,
            credentials_path: config.credentials_path.clone(),
            credentials_json: config.credentials_json.clone(),
            scopes: config.scopes.clone(),
            api_base: DRIVE_API_BASE.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
        }
    }
}

/// Google Drive backup provider.
///
/// Construction is eager: credentials are materialized and loaded before the
/// provider exists, so an unauthenticated provider is unrepresentable.
pub struct GDriveProvider {
    client: DriveClient,
}

impl GDriveProvider {
    /// Create a new Google Drive provider.
    ///
    /// # Errors
    /// - `Error::Authentication` if credentials cannot be established
    pub fn new(config: GDriveConfig) -> Result<Self> {
        let credentials = auth::load_credentials(
            config.environment,
            &config.credentials_path,
            config.credentials_json.as_deref(),
        )?;

        let auth_manager = AuthManager::new(&credentials, &config.token_url, config.scopes)?;
        let token_manager = Arc::new(TokenManager::new(auth_manager));
        let client = DriveClient::new(token_manager, config.api_base);

        Ok(Self { client })
    }
}

#[async_trait]
impl BackupProvider for GDriveProvider {
    fn name(&self) -> &str {
        "google"
    }

    async fn fetch_latest_backup(&self) -> Result<Vec<u8>> {
        let files = self.client.list_backup_files().await.map_err(|e| {
            tracing::error!("Error listing SMS backups: {}", e);
            e
        })?;

        if files.is_empty() {
            tracing::warn!("No SMS backup files found");
            return Err(Error::NotFound("No SMS backup files found".to_string()));
        }

        let latest = select_latest_backup(&files, |f| f.name.as_str()).ok_or_else(|| {
            tracing::warn!("No SMS backup files with a valid timestamp found");
            Error::NotFound("No SMS backup files with a valid timestamp found".to_string())
        })?;

        let content = self.client.download(&latest.id).await.map_err(|e| {
            tracing::error!("Error downloading SMS backup '{}': {}", latest.name, e);
            e
        })?;

        tracing::info!("Retrieved backup file: {}", latest.name);
        Ok(content)
    }
}
