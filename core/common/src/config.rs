//! Process configuration, read from the environment once at startup.
//!
//! Provider clients receive an explicit [`Config`] instead of reading
//! environment variables ad hoc; after startup the configuration is
//! read-only.

use std::env;
use std::path::PathBuf;

/// Environment variable naming the deployment mode (`PROD` for production).
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";
/// Environment variable overriding the credentials file path.
pub const CREDENTIALS_PATH_VAR: &str = "GOOGLE_CREDENTIALS_PATH";
/// Environment variable carrying the credentials JSON blob (production only).
pub const CREDENTIALS_JSON_VAR: &str = "GOOGLE_CREDENTIALS_JSON";

/// Default location of the credentials file when no override is set.
const DEFAULT_CREDENTIALS_PATH: &str = "credentials/google-drive.json";

/// Authorization scopes requested from the provider. The service only ever
/// reads backups, so a read-only scope is sufficient.
const DEFAULT_DRIVE_SCOPES: &[&str] = &["https://www.googleapis.com/auth/drive.readonly"];

/// Deployment mode of the running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production deployment: credentials are materialized from the
    /// environment before use.
    Production,
    /// Local development: the credentials file is expected to pre-exist.
    Development,
}

/// Read-only process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment mode.
    pub environment: Environment,
    /// Filesystem path of the provider credentials file.
    pub credentials_path: PathBuf,
    /// Credentials JSON captured from the environment at startup, if present.
    /// Only consulted in production.
    pub credentials_json: Option<String>,
    /// Authorization scopes attached to provider token requests.
    pub scopes: Vec<String>,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// This is the only place environment variables are consulted; the
    /// resulting struct is threaded into provider constructors.
    pub fn from_env() -> Self {
        let environment = match env::var(ENVIRONMENT_VAR).as_deref() {
            Ok("PROD") => Environment::Production,
            _ => Environment::Development,
        };

        let credentials_path = env::var(CREDENTIALS_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CREDENTIALS_PATH));

        let credentials_json = env::var(CREDENTIALS_JSON_VAR).ok();

        Self {
            environment,
            credentials_path,
            credentials_json,
            scopes: default_scopes(),
        }
    }

    /// True when running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

/// The fixed scope set used when none is configured explicitly.
pub fn default_scopes() -> Vec<String> {
    DEFAULT_DRIVE_SCOPES.iter().map(|s| s.to_string()).collect()
}
