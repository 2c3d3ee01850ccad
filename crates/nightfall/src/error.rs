//! Error types for the file-backed edges of the engine.
//!
//! The engine core never fails: invalid preferences are deleted, unreadable
//! stylesheets are skipped, missing elements are ignored. Errors only surface
//! where the engine touches the filesystem (preference files and config files)
//! or when a caller asks a stylesheet for rules it cannot read.

use std::io;
use std::path::PathBuf;

/// Error returned when a stylesheet's rules cannot be enumerated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StylesheetError {
    /// The sheet is loaded but its rule list is not readable
    /// (for example a cross-origin sheet).
    #[error("cannot read rules of stylesheet {}", href.as_deref().unwrap_or("<inline>"))]
    Inaccessible {
        /// Where the sheet was loaded from, if known.
        href: Option<String>,
    },
}

/// Errors raised by persistent [`Storage`](crate::store::Storage) backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("storage file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while loading an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The YAML content is malformed or has fields of the wrong type.
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
