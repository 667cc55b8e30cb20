//! Server configuration
//!
//! Every key is optional in the TOML file; missing keys fall back to the defaults.
//!
//! ```toml
//! host = "0.0.0.0"
//! port = 8080
//! cache_capacity = 4096
//! max_body_bytes = 1048576
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Configuration for the HTTP policy server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Port number
    pub port: u16,

    /// Maximum cached decisions (0 disables the cache)
    pub cache_capacity: usize,

    /// Largest accepted request body
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_CACHE_CAPACITY: usize = 1024;
    pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Address the server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
            cache_capacity: Self::DEFAULT_CACHE_CAPACITY,
            max_body_bytes: Self::DEFAULT_MAX_BODY_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PolicyError;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServerConfig::from_toml_str("port = 8080\n").unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, ServerConfig::DEFAULT_HOST);
        assert_eq!(config.cache_capacity, ServerConfig::DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn test_full_toml() {
        let config = ServerConfig::from_toml_str(
            r#"
            host = "0.0.0.0"
            port = 9000
            cache_capacity = 0
            max_body_bytes = 4096
            "#,
        )
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.cache_capacity, 0);
        assert_eq!(config.max_body_bytes, 4096);
    }

    #[test]
    fn test_invalid_toml() {
        let result = ServerConfig::from_toml_str("port = \"not a number\"");
        assert!(matches!(result, Err(PolicyError::Config(_))));
    }

    #[test]
    fn test_invalid_host() {
        let config = ServerConfig {
            host: "not an address".to_string(),
            ..ServerConfig::default()
        };
        assert!(matches!(
            config.socket_addr(),
            Err(PolicyError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 4000").unwrap();
        writeln!(file, "cache_capacity = 16").unwrap();

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.cache_capacity, 16);
    }

    #[test]
    fn test_load_missing_file() {
        let result = ServerConfig::load("/nonexistent/policy-engine.toml");
        assert!(matches!(result, Err(PolicyError::Io(_))));
    }
}
