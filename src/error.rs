use std::io;
use thiserror::Error;

/// Custom error type for quota-notify
#[derive(Error, Debug)]
pub enum QuotaError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Volume enumeration failed: {0}")]
    Volume(String),

    #[error("Notification failed: {0}")]
    Notification(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for quota-notify
pub type Result<T> = std::result::Result<T, QuotaError>;

impl QuotaError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        QuotaError::Config(msg.into())
    }

    /// Create a registry error
    pub fn registry<S: Into<String>>(msg: S) -> Self {
        QuotaError::Registry(msg.into())
    }

    pub fn volume<S: Into<String>>(msg: S) -> Self {
        QuotaError::Volume(msg.into())
    }

    pub fn notification<S: Into<String>>(msg: S) -> Self {
        QuotaError::Notification(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        QuotaError::Other(msg.into())
    }
}
