//! Google Drive provider tests against a mock Drive backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use smsvault_common::{Environment, Error};
use smsvault_storage::gdrive::{GDriveConfig, GDriveProvider};
use smsvault_storage::BackupProvider;

const MOCK_ACCESS_TOKEN: &str = "mock-access-token";

/// Shared state of the mock Drive backend.
#[derive(Clone)]
struct MockDrive {
    /// Listing returned by the files endpoint, newest upload first.
    files: Arc<Vec<serde_json::Value>>,
    /// Download bodies keyed by file ID.
    bodies: Arc<HashMap<String, Vec<u8>>>,
    /// Number of token exchanges performed.
    token_exchanges: Arc<AtomicUsize>,
}

async fn token_endpoint(State(state): State<MockDrive>) -> Json<serde_json::Value> {
    state.token_exchanges.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "access_token": MOCK_ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3600
    }))
}

async fn list_endpoint(
    State(state): State<MockDrive>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "no token"})));
    }

    // The client must constrain the candidate set the way the real service
    // does: name containment plus a bounded, upload-time-ordered page.
    let query = params.get("q").cloned().unwrap_or_default();
    if !query.contains("sms-")
        || !query.contains(".xml")
        || params.get("orderBy").map(String::as_str) != Some("createdTime desc")
        || params.get("pageSize").map(String::as_str) != Some("10")
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "unexpected listing query"})),
        );
    }

    (
        StatusCode::OK,
        Json(json!({ "files": state.files.as_ref() })),
    )
}

async fn download_endpoint(
    State(state): State<MockDrive>,
    headers: HeaderMap,
    Path(file_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Vec::new());
    }
    if params.get("alt").map(String::as_str) != Some("media") {
        return (StatusCode::BAD_REQUEST, Vec::new());
    }

    match state.bodies.get(&file_id) {
        Some(body) => (StatusCode::OK, body.clone()),
        None => (StatusCode::NOT_FOUND, Vec::new()),
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", MOCK_ACCESS_TOKEN))
        .unwrap_or(false)
}

/// Spawn the mock backend and return its base URL plus the exchange counter.
async fn spawn_mock_drive(
    files: Vec<serde_json::Value>,
    bodies: HashMap<String, Vec<u8>>,
) -> (String, Arc<AtomicUsize>) {
    let token_exchanges = Arc::new(AtomicUsize::new(0));
    let state = MockDrive {
        files: Arc::new(files),
        bodies: Arc::new(bodies),
        token_exchanges: token_exchanges.clone(),
    };

    let app = Router::new()
        .route("/token", post(token_endpoint))
        .route("/drive/files", get(list_endpoint))
        .route("/drive/files/{id}", get(download_endpoint))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    (format!("http://{}", addr), token_exchanges)
}

/// Build a provider configuration pointing at the mock backend, with a
/// credentials file in a scratch directory.
fn provider_config(base_url: &str, dir: &tempfile::TempDir) -> GDriveConfig {
    let credentials_path = dir.path().join("credentials.json");
    std::fs::write(
        &credentials_path,
        r#"{"client_id":"id","client_secret":"secret","refresh_token":"refresh"}"#,
    )
    .expect("write credentials");

    GDriveConfig {
        environment: Environment::Development,
        credentials_path,
        credentials_json: None,
        scopes: smsvault_common::config::default_scopes(),
        api_base: format!("{}/drive", base_url),
        token_url: format!("{}/token", base_url),
    }
}

fn file_entry(id: &str, name: &str, created: &str) -> serde_json::Value {
    json!({ "id": id, "name": name, "createdTime": created })
}

#[tokio::test]
async fn fetches_latest_backup_by_filename_timestamp() {
    // Upload order (createdTime) disagrees with capture order (filename):
    // the January capture was uploaded last and is listed first.
    let files = vec![
        file_entry("f-jan", "sms-20230101120000.xml", "2023-07-01T10:00:00Z"),
        file_entry("f-jun", "sms-20230601080000.xml", "2023-06-01T09:00:00Z"),
        file_entry("f-notes", "notes.txt", "2023-05-01T08:00:00Z"),
    ];
    let mut bodies = HashMap::new();
    bodies.insert("f-jan".to_string(), b"<smses/>".to_vec());
    bodies.insert(
        "f-jun".to_string(),
        b"<smses><sms address=\"a\" /></smses>".to_vec(),
    );

    let (base_url, _) = spawn_mock_drive(files, bodies).await;
    let dir = tempfile::tempdir().unwrap();
    let provider = GDriveProvider::new(provider_config(&base_url, &dir)).unwrap();

    let content = provider.fetch_latest_backup().await.unwrap();
    assert_eq!(content, b"<smses><sms address=\"a\" /></smses>");
}

#[tokio::test]
async fn empty_listing_is_not_found() {
    let (base_url, _) = spawn_mock_drive(Vec::new(), HashMap::new()).await;
    let dir = tempfile::tempdir().unwrap();
    let provider = GDriveProvider::new(provider_config(&base_url, &dir)).unwrap();

    let result = provider.fetch_latest_backup().await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn listing_without_valid_names_is_not_found() {
    let files = vec![
        file_entry("f-1", "notes.txt", "2023-07-01T10:00:00Z"),
        file_entry("f-2", "sms-partial.xml", "2023-06-01T09:00:00Z"),
    ];

    let (base_url, _) = spawn_mock_drive(files, HashMap::new()).await;
    let dir = tempfile::tempdir().unwrap();
    let provider = GDriveProvider::new(provider_config(&base_url, &dir)).unwrap();

    let result = provider.fetch_latest_backup().await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn each_provider_instance_authenticates_independently() {
    let files = vec![file_entry(
        "f-1",
        "sms-20230601080000.xml",
        "2023-06-01T09:00:00Z",
    )];
    let mut bodies = HashMap::new();
    bodies.insert("f-1".to_string(), b"<smses/>".to_vec());

    let (base_url, token_exchanges) = spawn_mock_drive(files, bodies).await;
    let dir = tempfile::tempdir().unwrap();
    let config = provider_config(&base_url, &dir);

    for _ in 0..2 {
        let provider = GDriveProvider::new(config.clone()).unwrap();
        provider.fetch_latest_backup().await.unwrap();
    }

    // No token is shared across instances: two requests, two exchanges.
    assert_eq!(token_exchanges.load(Ordering::SeqCst), 2);
}
