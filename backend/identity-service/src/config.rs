/// Configuration management for Identity Service
///
/// Loads configuration from environment variables with development
/// defaults. This service is the internet-facing edge: it also carries
/// the base URLs of the internal services it forwards to.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Peer service endpoints
    pub peers: PeerConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Peer service endpoints and outbound call policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerConfig {
    /// Base URL of content-service (post/comment forwards)
    pub content_service_url: String,
    /// Base URL of reaction-service (reaction and admin forwards)
    pub reaction_service_url: String,
    /// Timeout applied to every outbound cross-service call, in seconds
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            app: AppConfig {
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                host: std::env::var("IDENTITY_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("IDENTITY_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8081),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/orbit_identity".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            peers: PeerConfig {
                content_service_url: std::env::var("CONTENT_SERVICE_URL")
                    .unwrap_or_else(|_| "http://localhost:8082".to_string()),
                reaction_service_url: std::env::var("REACTION_SERVICE_URL")
                    .unwrap_or_else(|_| "http://localhost:8083".to_string()),
                request_timeout_secs: std::env::var("HTTP_CLIENT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5),
            },
        })
    }
}
