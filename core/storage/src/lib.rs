//! Backup provider abstraction for SmsVault.
//!
//! This module provides a trait-based interface for cloud storage backends
//! holding SMS backups (Google Drive today, others by registration) and a
//! provider registry for dynamic provider resolution.
//!
//! # Design Principles
//! - Provider isolation: no provider-specific logic in the parser or server
//! - Eager authentication: constructing a provider establishes credentials
//! - Unified error semantics: consistent error types across providers

pub mod backup;
pub mod gdrive;
pub mod memory;
pub mod provider;
pub mod registry;

pub use backup::{parse_backup_timestamp, select_latest_backup};
pub use memory::MemoryProvider;
pub use provider::BackupProvider;
pub use registry::{create_default_registry, ProviderFactory, ProviderRegistry};
