//! Configuration module for the PoetryWorld data layer.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite content store file
    pub db_path: PathBuf,
    /// Email address designating the admin account, if any
    pub admin_email: Option<String>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("POETRY_DB_PATH")
            .unwrap_or_else(|_| "./data/poetryworld.sqlite".to_string())
            .into();

        let admin_email = env::var("POETRY_ADMIN_EMAIL").ok();

        let log_level = env::var("POETRY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            db_path,
            admin_email,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("POETRY_DB_PATH");
        env::remove_var("POETRY_ADMIN_EMAIL");
        env::remove_var("POETRY_LOG_LEVEL");

        let config = Config::from_env();

        assert_eq!(config.db_path, PathBuf::from("./data/poetryworld.sqlite"));
        assert!(config.admin_email.is_none());
        assert_eq!(config.log_level, "info");
    }
}
