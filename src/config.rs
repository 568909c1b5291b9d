//! Configuration management for the dashboard.
//!
//! Values come from environment variables and an optional `.env` file in the
//! local data directory. The three application secrets (client id, client
//! secret, redirect URI) are mandatory; every other value has a default.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{collections::HashMap, env, fmt, path::PathBuf};

pub const ENV_CLIENT_ID: &str = "SPOTIFY_API_AUTH_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_API_AUTH_CLIENT_SECRET";
pub const ENV_REDIRECT_URI: &str = "SPOTIFY_API_REDIRECT_URI";
pub const ENV_SCOPE: &str = "SPOTIFY_API_AUTH_SCOPE";
pub const ENV_AUTH_URL: &str = "SPOTIFY_API_AUTH_URL";
pub const ENV_TOKEN_URL: &str = "SPOTIFY_API_TOKEN_URL";
pub const ENV_API_URL: &str = "SPOTIFY_API_URL";
pub const ENV_SERVER_ADDRESS: &str = "SERVER_ADDRESS";

pub const DEFAULT_SCOPE: &str = "user-top-read";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A mandatory variable is unset or blank.
    Missing(&'static str),
    /// The `.env` file exists but could not be read.
    EnvFile(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{} must be set", name),
            ConfigError::EnvFile(e) => write!(f, "cannot load .env file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime configuration of the dashboard.
///
/// Built once at startup and shared read-only with every request handler.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_address: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first absent secret.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a configuration from an explicit set of variables.
    ///
    /// Used by tests and by anything that does not want to touch the
    /// process environment.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| vars.get(name).cloned())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let optional = |name: &str, default: &str| -> String {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            client_id: required(ENV_CLIENT_ID)?,
            client_secret: required(ENV_CLIENT_SECRET)?,
            redirect_uri: required(ENV_REDIRECT_URI)?,
            scope: optional(ENV_SCOPE, DEFAULT_SCOPE),
            auth_url: optional(ENV_AUTH_URL, DEFAULT_AUTH_URL),
            token_url: optional(ENV_TOKEN_URL, DEFAULT_TOKEN_URL),
            api_url: optional(ENV_API_URL, DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            server_address: optional(ENV_SERVER_ADDRESS, DEFAULT_SERVER_ADDRESS),
        })
    }
}

/// Returns the application's directory inside the local data directory.
///
/// - Linux: `~/.local/share/sporldash`
/// - macOS: `~/Library/Application Support/sporldash`
/// - Windows: `%LOCALAPPDATA%/sporldash`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporldash");
    path
}

/// Loads environment variables from the `.env` file in the data directory.
///
/// A missing file is not an error: the variables may just as well come from
/// the real environment. Variables that are already set are never
/// overwritten.
///
/// # Errors
///
/// Returns [`ConfigError::EnvFile`] if the data directory cannot be created
/// or the file exists but cannot be parsed.
pub async fn load_env() -> Result<(), ConfigError> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| ConfigError::EnvFile(e.to_string()))?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| ConfigError::EnvFile(e.to_string()))?;
    Ok(())
}
