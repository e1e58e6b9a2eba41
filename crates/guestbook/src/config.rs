use std::{env, fmt, path::PathBuf, str::FromStr};

use thiserror::Error;

/// Default request body limit; inline `data:` images are sent as JSON.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Storage backend for guest records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// Process memory; guests are lost on restart.
    Memory,
    /// Single JSON document on disk.
    #[default]
    File,
    /// SQLite database (requires the `sqlite` feature).
    Sqlite,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::File => "file",
            StorageBackend::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "inmemory" => Ok(StorageBackend::Memory),
            "file" | "json" => Ok(StorageBackend::File),
            "sqlite" => Ok(StorageBackend::Sqlite),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown storage backend {0:?} (expected memory, file or sqlite)")]
    UnknownBackend(String),
    #[error("Storage backend {0} is not compiled into this binary")]
    BackendUnavailable(StorageBackend),
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Storage backend (default: file)
    pub storage_backend: StorageBackend,
    /// Path to the JSON guests file (default: "guests.json")
    pub guests_file: PathBuf,
    /// Path to SQLite database file (default: "guests.db")
    pub sqlite_path: String,
    /// Directory for out-of-band image blobs; `None` keeps images inline.
    pub blob_dir: Option<PathBuf>,
    /// Prefix for blob URLs handed back to clients (default: empty, relative URLs)
    pub public_base_url: String,
    /// Maximum request body size in bytes (default: 10 MiB)
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::default(),
            guests_file: PathBuf::from("guests.json"),
            sqlite_path: "guests.db".to_string(),
            blob_dir: None,
            public_base_url: String::new(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `STORAGE_BACKEND` - `memory`, `file` or `sqlite` (default: file)
    /// - `GUESTS_FILE` - JSON guests file path (default: "guests.json")
    /// - `SQLITE_PATH` - SQLite database path (default: "guests.db")
    /// - `BLOB_DIR` - enables out-of-band image storage in this directory
    /// - `PUBLIC_BASE_URL` - prefix for image URLs (default: empty)
    /// - `MAX_UPLOAD_BYTES` - request body limit (default: 10 MiB)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => defaults.storage_backend,
        };

        if storage_backend == StorageBackend::Sqlite && !cfg!(feature = "sqlite") {
            return Err(ConfigError::BackendUnavailable(storage_backend));
        }

        let max_upload_bytes = match var("MAX_UPLOAD_BYTES") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidNumber {
                    var: "MAX_UPLOAD_BYTES",
                    value,
                })?,
            None => defaults.max_upload_bytes,
        };

        Ok(Self {
            storage_backend,
            guests_file: var("GUESTS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.guests_file),
            sqlite_path: var("SQLITE_PATH").unwrap_or(defaults.sqlite_path),
            blob_dir: var("BLOB_DIR").map(PathBuf::from),
            public_base_url: var("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.public_base_url),
            max_upload_bytes,
        })
    }
}
