//! Credentials handling and OAuth2 token management for Google Drive.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use oauth2::{
    basic::BasicClient, reqwest::async_http_client, AuthUrl, ClientId, ClientSecret, RefreshToken,
    Scope, TokenResponse, TokenUrl,
};
use serde::{Deserialize, Serialize};

use smsvault_common::{Environment, Error, Result};

/// OAuth2 authorization endpoint. Unused by the refresh flow but required to
/// construct the client.
const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
/// OAuth2 token endpoint.
pub(crate) const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Content of the credentials file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    /// OAuth2 client ID.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
    /// Long-lived refresh token used to mint access tokens.
    pub refresh_token: String,
}

/// An access token with expiration tracking.
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// Bearer token for API requests.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Check if the token is expired or about to expire.
    pub fn is_expired(&self) -> bool {
        // Consider expired if less than 5 minutes remaining
        self.expires_at < Utc::now() + Duration::minutes(5)
    }
}

/// Load credentials from the configured file, materializing it first when
/// running in production.
///
/// In production the credentials JSON captured from the environment at
/// startup is written to `credentials_path` (creating parent directories) so
/// that ephemeral deployments converge on the same file a development setup
/// would carry. The write is idempotent.
///
/// # Errors
/// - `Error::Authentication` on any failure: missing JSON blob in production,
///   unwritable path, absent file, or malformed credentials.
pub fn load_credentials(
    environment: Environment,
    credentials_path: &Path,
    credentials_json: Option<&str>,
) -> Result<StoredCredentials> {
    if environment == Environment::Production {
        tracing::info!("Using production credentials from environment");

        let Some(json) = credentials_json else {
            tracing::error!("Production mode but no credentials JSON was provided");
            return Err(Error::Authentication(
                "Credentials JSON not found in environment".to_string(),
            ));
        };

        if let Some(parent) = credentials_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                tracing::error!("Failed to create credentials directory: {}", e);
                Error::Authentication(format!("Failed to create credentials directory: {}", e))
            })?;
        }

        std::fs::write(credentials_path, json).map_err(|e| {
            tracing::error!("Failed to write credentials file: {}", e);
            Error::Authentication(format!("Failed to write credentials file: {}", e))
        })?;
        tracing::info!(
            "Wrote credentials to {}",
            credentials_path.display()
        );
    }

    // The file must exist regardless of environment.
    if !credentials_path.exists() {
        tracing::error!(
            "Credentials file not found: {}",
            credentials_path.display()
        );
        return Err(Error::Authentication(format!(
            "Credentials file not found: {}",
            credentials_path.display()
        )));
    }

    let raw = std::fs::read_to_string(credentials_path)
        .map_err(|e| Error::Authentication(format!("Failed to read credentials file: {}", e)))?;

    serde_json::from_str(&raw)
        .map_err(|e| Error::Authentication(format!("Malformed credentials file: {}", e)))
}

/// OAuth2 authentication manager for Google Drive.
///
/// Only the refresh-token grant is used: the service owns pre-authorized
/// credentials and never drives an interactive consent flow.
pub struct AuthManager {
    client: BasicClient,
    refresh_token: RefreshToken,
    scopes: Vec<String>,
}

impl AuthManager {
    /// Create a new authentication manager from stored credentials.
    pub fn new(
        credentials: &StoredCredentials,
        token_url: &str,
        scopes: Vec<String>,
    ) -> Result<Self> {
        let client = BasicClient::new(
            ClientId::new(credentials.client_id.clone()),
            Some(ClientSecret::new(credentials.client_secret.clone())),
            AuthUrl::new(GOOGLE_AUTH_URL.to_string())
                .map_err(|e| Error::Authentication(format!("Invalid auth URL: {}", e)))?,
            Some(
                TokenUrl::new(token_url.to_string())
                    .map_err(|e| Error::Authentication(format!("Invalid token URL: {}", e)))?,
            ),
        );

        Ok(Self {
            client,
            refresh_token: RefreshToken::new(credentials.refresh_token.clone()),
            scopes,
        })
    }

    /// Exchange the refresh token for a fresh access token.
    ///
    /// # Errors
    /// - Invalid or revoked refresh token
    /// - Network errors reaching the token endpoint
    pub async fn refresh_access_token(&self) -> Result<AccessToken> {
        let token_result = self
            .client
            .exchange_refresh_token(&self.refresh_token)
            .add_scopes(self.scopes.iter().map(|s| Scope::new(s.clone())))
            .request_async(async_http_client)
            .await
            .map_err(|e| Error::Authentication(format!("Token exchange failed: {}", e)))?;

        let expires_in = token_result
            .expires_in()
            .unwrap_or_else(|| std::time::Duration::from_secs(3600));
        let expires_at =
            Utc::now() + Duration::from_std(expires_in).unwrap_or_else(|_| Duration::hours(1));

        Ok(AccessToken {
            token: token_result.access_token().secret().clone(),
            expires_at,
        })
    }
}

/// Token manager that fetches an access token on first use and refreshes it
/// when it expires.
///
/// Its cache lives only as long as the owning provider — one request — so no
/// token material survives across requests.
pub struct TokenManager {
    auth_manager: AuthManager,
    token: tokio::sync::RwLock<Option<AccessToken>>,
}

impl TokenManager {
    /// Create a new token manager with no token fetched yet.
    pub fn new(auth_manager: AuthManager) -> Self {
        Self {
            auth_manager,
            token: tokio::sync::RwLock::new(None),
        }
    }

    /// Get a valid access token, fetching or refreshing if necessary.
    pub async fn get_access_token(&self) -> Result<String> {
        let token = self.token.read().await;
        if let Some(token) = token.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }
        drop(token);

        let mut token = self.token.write().await;

        // Double-check after acquiring write lock
        if let Some(token) = token.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        tracing::debug!("Fetching access token via refresh exchange");
        let fresh = self.auth_manager.refresh_access_token().await?;
        let value = fresh.token.clone();
        *token = Some(fresh);

        Ok(value)
    }
}
