//! Google Drive backup provider for SmsVault.
//!
//! This module provides a backup backend using Google Drive with:
//! - Credentials loaded from a configured file, materialized from the
//!   environment in production deployments
//! - OAuth2 refresh-token exchange scoped to read-only Drive access
//! - Latest-backup selection by filename-embedded timestamp

pub mod auth;
pub mod client;
pub mod provider;

pub use auth::{AuthManager, StoredCredentials, TokenManager};
pub use client::{DriveClient, DriveFile};
pub use provider::{GDriveConfig, GDriveProvider};
