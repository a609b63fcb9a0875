//! Error types shared across the crate.

use thiserror::Error;

/// Failures of the contact-form relay.
///
/// Every variant maps to the same push failure in the git workflow; they stay
/// distinct for the log.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The request never completed (DNS, connect, TLS, reset).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay answered with a body that is not JSON.
    #[error("relay returned a non-JSON body (status {status})")]
    InvalidBody { status: u16 },

    /// The relay answered but did not acknowledge the submission.
    #[error("relay rejected the submission: {0}")]
    Rejected(String),

    /// No endpoint configured.
    #[error("relay endpoint is not configured")]
    MissingEndpoint,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to access theme store: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse theme store: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),
}
