//! Error types for the token compiler core.
//!
//! Problems inside stylesheets are reported as [`Diagnostics`](crate::diagnostics::Diagnostics),
//! never as errors. This type only covers configuration that cannot be used at all.

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a token configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A config field holds a value that cannot be used.
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfig { field: String, message: String },
}

impl Error {
    /// Create an invalid config error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}
