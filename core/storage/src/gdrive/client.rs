//! Google Drive API client.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};

use smsvault_common::{Error, Result};

use super::auth::TokenManager;

/// Google Drive API base URL.
pub(crate) const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Containment query matching candidate backup names. Exact filename
/// validation happens later against the embedded timestamp.
const BACKUP_LIST_QUERY: &str = "name contains 'sms-' and name contains '.xml' and trashed = false";

/// Candidate window for the listing, ordered by provider creation time
/// descending. Backups newer by filename but pushed past this window by ten
/// later uploads would be missed; that matches the documented source
/// behavior.
const BACKUP_LIST_PAGE_SIZE: &str = "10";

/// Google Drive file metadata from the files API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    /// File ID.
    pub id: String,
    /// File name.
    pub name: String,
    /// Created time as reported by the provider (upload time, not capture
    /// time).
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
}

/// Response from listing files.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileListResponse {
    #[serde(default)]
    files: Vec<DriveFile>,
}

/// Google Drive API client.
pub struct DriveClient {
    http: Client,
    token_manager: Arc<TokenManager>,
    api_base: String,
}

impl DriveClient {
    /// Create a new Drive client against the given API base URL.
    pub fn new(token_manager: Arc<TokenManager>, api_base: impl Into<String>) -> Self {
        let http = Client::builder()
            .user_agent("SmsVault/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            token_manager,
            api_base: api_base.into(),
        }
    }

    /// Get authorization header.
    async fn auth_header(&self) -> Result<String> {
        let token = self.token_manager.get_access_token().await?;
        Ok(format!("Bearer {}", token))
    }

    /// List candidate backup files, newest upload first, capped at one
    /// bounded page.
    pub async fn list_backup_files(&self) -> Result<Vec<DriveFile>> {
        let url = format!("{}/files", self.api_base);
        let auth = self.auth_header().await?;

        let response = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, auth)
            .query(&[
                ("q", BACKUP_LIST_QUERY),
                ("fields", "files(id,name,createdTime)"),
                ("orderBy", "createdTime desc"),
                ("pageSize", BACKUP_LIST_PAGE_SIZE),
            ])
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to list backup files: {}", e)))?;

        let list_response: FileListResponse = self.handle_response(response).await?;
        Ok(list_response.files)
    }

    /// Download file content.
    pub async fn download(&self, file_id: &str) -> Result<Vec<u8>> {
        let url = format!("{}/files/{}", self.api_base, file_id);
        let auth = self.auth_header().await?;

        let response = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, auth)
            .query(&[("alt", "media")])
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to download file: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Network(format!(
                "Download failed: {} - {}",
                status, body
            )));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| Error::Network(format!("Failed to read download response: {}", e)))
    }

    /// Handle API response with error checking.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| Error::Network(format!("Failed to parse response: {}", e)))
        } else if status == StatusCode::NOT_FOUND {
            Err(Error::NotFound("Resource not found".to_string()))
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(Error::Authentication(
                "Invalid or expired token".to_string(),
            ))
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Error::Network(format!("API error: {} - {}", status, body)))
        }
    }
}
