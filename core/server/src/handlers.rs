//! Request handlers.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use smsvault_common::{Error, SmsRecord};
use smsvault_parser::parse_sms_xml;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters of the latest-SMS endpoint.
#[derive(Debug, Deserialize)]
pub struct LatestQuery {
    /// Backup provider name.
    #[serde(default)]
    pub provider: Option<String>,
}

/// Response body of the latest-SMS endpoint.
#[derive(Debug, Serialize)]
pub struct LatestSmsResponse {
    /// Parsed messages in document order.
    pub sms_messages: Vec<SmsRecord>,
}

/// Fetch the latest SMS backup for a given provider.
///
/// Resolves the provider (constructing and authenticating it), fetches the
/// latest backup's bytes, parses them, and returns the records. All failure
/// mapping lives in [`ApiError`].
pub async fn get_latest_sms(
    State(state): State<AppState>,
    Query(query): Query<LatestQuery>,
) -> Result<Json<LatestSmsResponse>, ApiError> {
    let provider_name = query
        .provider
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::InvalidInput("Provider parameter is required".to_string()))?;

    let provider = state.registry.resolve(provider_name)?;
    let content = provider.fetch_latest_backup().await?;
    let sms_messages = parse_sms_xml(&content)?;

    tracing::info!(
        "Returning {} SMS messages from provider '{}'",
        sms_messages.len(),
        provider_name
    );

    Ok(Json(LatestSmsResponse { sms_messages }))
}
