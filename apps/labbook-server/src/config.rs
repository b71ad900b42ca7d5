//! Server configuration.
//!
//! Environment variables:
//!
//! ```bash
//! # Admin allow-list: JSON array of external user ids
//! LABBOOK_ADMIN_USER_IDS='["github|12345"]'
//!
//! # CORS origin allow-list, comma separated
//! LABBOOK_CORS_ORIGINS='http://localhost:3000,http://localhost:5173'
//!
//! # GitHub API base (override for tests / proxies)
//! LABBOOK_GITHUB_API_BASE='https://api.github.com'
//! ```
//!
//! The allow-list is injected configuration, carried on the server
//! value and passed to identity resolution per request, never a
//! process-wide singleton.

use std::env;
use thiserror::Error;

const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:5173"];
const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// External user ids allowed to use the `admin|` identity tag.
    pub admin_user_ids: Vec<String>,
    /// Origins allowed by CORS (credentials enabled).
    pub cors_origins: Vec<String>,
    /// Base URL of the GitHub API used for token verification.
    pub github_api_base: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("LABBOOK_ADMIN_USER_IDS must be a JSON array of strings: {0}")]
    InvalidAdminUserIds(String),
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            admin_user_ids: vec![],
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            github_api_base: DEFAULT_GITHUB_API_BASE.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let admin_user_ids = match env::var("LABBOOK_ADMIN_USER_IDS") {
            Ok(raw) => serde_json::from_str::<Vec<String>>(&raw)
                .map_err(|e| ConfigError::InvalidAdminUserIds(e.to_string()))?,
            Err(_) => vec![],
        };

        let cors_origins = match env::var("LABBOOK_CORS_ORIGINS") {
            Ok(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        let github_api_base = env::var("LABBOOK_GITHUB_API_BASE")
            .unwrap_or_else(|_| DEFAULT_GITHUB_API_BASE.to_string());

        Ok(Self {
            admin_user_ids,
            cors_origins,
            github_api_base,
        })
    }
}
