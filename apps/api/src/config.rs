//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// HTTP API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind
    pub http_host: String,

    /// HTTP port
    pub http_port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// Single allowed CORS origin; any origin when unset
    pub cors_allowed_origin: Option<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            http_host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./market.db".to_string())
                .into(),

            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,

            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|origin| !origin.trim().is_empty()),
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Socket address to listen on.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.http_host, self.http_port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("HTTP_HOST".to_string()))
    }

    /// CORS policy: the configured origin, or any origin.
    pub fn cors_layer(&self) -> Result<CorsLayer, ConfigError> {
        let origin = match &self.cors_allowed_origin {
            Some(origin) => AllowOrigin::exact(
                HeaderValue::from_str(origin)
                    .map_err(|_| ConfigError::InvalidValue("CORS_ALLOWED_ORIGIN".to_string()))?,
            ),
            None => AllowOrigin::any(),
        };

        Ok(CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ApiConfig {
        ApiConfig {
            http_host: "127.0.0.1".to_string(),
            http_port: 5000,
            database_path: "./market.db".into(),
            db_max_connections: 5,
            cors_allowed_origin: None,
        }
    }

    #[test]
    fn test_bind_addr() {
        assert_eq!(config().bind_addr().unwrap().port(), 5000);

        let bad = ApiConfig {
            http_host: "not a host".to_string(),
            ..config()
        };
        assert!(bad.bind_addr().is_err());
    }

    #[test]
    fn test_cors_origin() {
        assert!(config().cors_layer().is_ok());

        let with_origin = ApiConfig {
            cors_allowed_origin: Some("http://localhost:3000".to_string()),
            ..config()
        };
        assert!(with_origin.cors_layer().is_ok());

        let bad = ApiConfig {
            cors_allowed_origin: Some("bad\norigin".to_string()),
            ..config()
        };
        assert!(bad.cors_layer().is_err());
    }
}
