//! Error types for config loading.

use std::path::PathBuf;

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while finding, loading or watching configs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML config.
    #[error("Failed to parse TOML config '{path}': {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Malformed JSON config.
    #[error("Failed to parse JSON config '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The config file extension is neither `.toml` nor `.json`.
    #[error("Unsupported config format '{path}': expected a .toml or .json file")]
    UnsupportedFormat { path: PathBuf },

    /// No config file was found.
    #[error("Could not find Snow config file in '{root}'")]
    ConfigNotFound { root: PathBuf },

    /// The config was read but is not usable.
    #[error(transparent)]
    Config(#[from] snowcss_core::Error),

    /// Hot-reload error.
    #[cfg(feature = "hot-reload")]
    #[error("Hot-reload error: {0}")]
    HotReload(String),
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
