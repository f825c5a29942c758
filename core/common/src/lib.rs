//! Common utilities and types shared across SmsVault modules.
//!
//! This module provides foundational types that are used throughout the codebase,
//! ensuring consistency and type safety.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, Environment};
pub use error::{Error, Result};
pub use types::SmsRecord;
