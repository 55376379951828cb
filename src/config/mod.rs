//! Configuration management
//!
//! Configuration is loaded from:
//! - config.yml file (optional)
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults, so the service
//! starts against a local SQLite file on port 5000 with no configuration at all.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Static landing page configuration
    #[serde(default)]
    pub static_files: StaticConfig,
    /// Bootstrap admin account
    #[serde(default)]
    pub admin: AdminConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin, `*` allows any
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_origin() -> String {
    "*".to_string()
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database driver (sqlite or mysql)
    #[serde(default)]
    pub driver: DatabaseDriver,
    /// Database connection URL
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: DatabaseDriver::default(),
            url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "data/portfolio.db".to_string()
}

/// Database driver type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    /// SQLite (default)
    #[default]
    Sqlite,
    /// MySQL
    Mysql,
}

/// Static file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticConfig {
    /// Directory holding the landing page and its assets
    #[serde(default = "default_static_path")]
    pub path: PathBuf,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            path: default_static_path(),
        }
    }
}

fn default_static_path() -> PathBuf {
    PathBuf::from("public")
}

/// Admin account created at startup when both username and password are set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl AdminConfig {
    /// Credentials for the bootstrap admin, if fully configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some((username, password))
            }
            _ => None,
        }
    }
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist or is empty, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: format_yaml_error(&e),
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - PORTFOLIO_SERVER_HOST
    /// - PORTFOLIO_SERVER_PORT (or PORT)
    /// - PORTFOLIO_SERVER_CORS_ORIGIN
    /// - PORTFOLIO_DATABASE_DRIVER
    /// - PORTFOLIO_DATABASE_URL (or DATABASE_URL)
    /// - PORTFOLIO_STATIC_PATH
    /// - PORTFOLIO_ADMIN_USERNAME / PORTFOLIO_ADMIN_PASSWORD / PORTFOLIO_ADMIN_EMAIL
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        // Server configuration
        if let Ok(host) = std::env::var("PORTFOLIO_SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_with_fallback("PORTFOLIO_SERVER_PORT", "PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("PORTFOLIO_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        // Database configuration
        if let Ok(driver) = std::env::var("PORTFOLIO_DATABASE_DRIVER") {
            match driver.to_lowercase().as_str() {
                "sqlite" => self.database.driver = DatabaseDriver::Sqlite,
                "mysql" => self.database.driver = DatabaseDriver::Mysql,
                _ => {} // Ignore invalid values
            }
        }
        if let Some(url) = env_with_fallback("PORTFOLIO_DATABASE_URL", "DATABASE_URL") {
            self.database.url = url;
        }

        if let Ok(path) = std::env::var("PORTFOLIO_STATIC_PATH") {
            self.static_files.path = PathBuf::from(path);
        }

        // Admin bootstrap
        if let Ok(username) = std::env::var("PORTFOLIO_ADMIN_USERNAME") {
            self.admin.username = Some(username);
        }
        if let Ok(password) = std::env::var("PORTFOLIO_ADMIN_PASSWORD") {
            self.admin.password = Some(password);
        }
        if let Ok(email) = std::env::var("PORTFOLIO_ADMIN_EMAIL") {
            self.admin.email = Some(email);
        }
    }
}

/// Read `primary`, falling back to the unprefixed `fallback` variable
fn env_with_fallback(primary: &str, fallback: &str) -> Option<String> {
    std::env::var(primary)
        .or_else(|_| std::env::var(fallback))
        .ok()
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
