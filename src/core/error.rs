//! Error types for policy loading, request parsing and server configuration

use thiserror::Error;

/// Policy engine errors
#[derive(Error, Debug)]
pub enum PolicyError {
    /// Policy or request JSON is malformed or has the wrong shape
    #[error("Invalid policy document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// Request is missing a principal, action or resource
    #[error("Missing required parameters: {0}")]
    MissingParameters(#[from] validator::ValidationErrors),

    /// Configuration file is not valid TOML for `ServerConfig`
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Host and port do not form a socket address
    #[error("Invalid bind address: {0}")]
    InvalidAddress(#[from] std::net::AddrParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Policy engine result type
pub type Result<T> = std::result::Result<T, PolicyError>;
