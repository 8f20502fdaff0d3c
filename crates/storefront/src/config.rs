//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPEASE_DATA_DIR` - Directory for the durable store mirrors (default: `.shopease`)
//! - `SHOPEASE_STORAGE` - Storage backend: `file`, `memory` or `none` (default: `file`)
//! - `SHOPEASE_LOG_FORMAT` - Log output: `pretty` or `json` (default: `pretty`)
//! - `RUST_LOG` - Log filter, read by the binary's tracing subscriber

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".shopease";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the store mirrors are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// One JSON file per store under the data directory.
    #[default]
    File,
    /// In memory only; everything is lost on exit.
    Memory,
    /// No durable storage: stores always start empty.
    None,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            "none" => Ok(Self::None),
            other => Err(format!("unknown storage backend '{other}' (expected file, memory or none)")),
        }
    }
}

/// Log line format for the binary's subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}' (expected pretty or json)")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory the file backend writes to
    pub data_dir: PathBuf,
    /// Storage backend for the store mirrors
    pub storage: StorageBackend,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage: StorageBackend::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unsupported value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unsupported value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("SHOPEASE_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let storage = parse_optional(&lookup, "SHOPEASE_STORAGE")?.unwrap_or_default();
        let log_format = parse_optional(&lookup, "SHOPEASE_LOG_FORMAT")?.unwrap_or_default();

        Ok(Self {
            data_dir,
            storage,
            log_format,
        })
    }

    /// Replace the data directory (e.g. from a command-line flag).
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, treating unset and empty the same.
fn parse_optional<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr<Err = String>,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .parse()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e)),
        _ => Ok(None),
    }
}
