//! Configuration module for the widget service.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::AppError;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the learning backend (chat, recommendations, events)
    pub api_base_url: String,
    /// Path to SQLite database file holding the persisted user history
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
    /// User the widget acts for
    pub user_id: String,
    /// Number of recommendations requested from the backend
    pub recommendation_limit: usize,
    /// Optional client-side timeout for backend calls (none by default)
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("LEARNHUB_API_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
            .trim_end_matches('/')
            .to_string();

        let db_path = env::var("LEARNHUB_DB_PATH")
            .unwrap_or_else(|_| "./data/widget.sqlite".to_string())
            .into();

        let bind_addr = env::var("LEARNHUB_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|_| AppError::Validation("Invalid LEARNHUB_BIND_ADDR format".to_string()))?;

        let log_level = env::var("LEARNHUB_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("LEARNHUB_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("text") | Err(_) => LogFormat::Text,
            Ok(other) => {
                return Err(AppError::Validation(format!(
                    "Invalid LEARNHUB_LOG_FORMAT '{}' (expected text or json)",
                    other
                )))
            }
        };

        let user_id = env::var("LEARNHUB_USER_ID")
            .ok()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| "u1".to_string());

        let recommendation_limit = match env::var("LEARNHUB_RECOMMENDATION_LIMIT") {
            Ok(raw) => raw.parse().map_err(|_| {
                AppError::Validation("Invalid LEARNHUB_RECOMMENDATION_LIMIT".to_string())
            })?,
            Err(_) => 12,
        };

        let request_timeout = match env::var("LEARNHUB_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    AppError::Validation("Invalid LEARNHUB_REQUEST_TIMEOUT_SECS".to_string())
                })?;
                if secs == 0 {
                    return Err(AppError::Validation(
                        "LEARNHUB_REQUEST_TIMEOUT_SECS must be greater than 0".to_string(),
                    ));
                }
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Ok(Self {
            api_base_url,
            db_path,
            bind_addr,
            log_level,
            log_format,
            user_id,
            recommendation_limit,
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    // Tests in this module mutate process-wide environment variables.
    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const VARS: [&str; 8] = [
        "LEARNHUB_API_BASE_URL",
        "LEARNHUB_DB_PATH",
        "LEARNHUB_BIND_ADDR",
        "LEARNHUB_LOG_LEVEL",
        "LEARNHUB_LOG_FORMAT",
        "LEARNHUB_USER_ID",
        "LEARNHUB_RECOMMENDATION_LIMIT",
        "LEARNHUB_REQUEST_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.api_base_url, "http://127.0.0.1:5000");
        assert_eq!(config.db_path, PathBuf::from("./data/widget.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.user_id, "u1");
        assert_eq!(config.recommendation_limit, 12);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("LEARNHUB_API_BASE_URL", "http://backend:9000/");
        env::set_var("LEARNHUB_LOG_FORMAT", "json");
        env::set_var("LEARNHUB_USER_ID", "alice");
        env::set_var("LEARNHUB_REQUEST_TIMEOUT_SECS", "15");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.api_base_url, "http://backend:9000");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.user_id, "alice");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_invalid_bind_addr_is_reported() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("LEARNHUB_BIND_ADDR", "not-an-address");

        let result = Config::from_env();
        clear_env();

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_zero_request_timeout_is_rejected() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("LEARNHUB_REQUEST_TIMEOUT_SECS", "0");

        let result = Config::from_env();
        clear_env();

        match result {
            Err(AppError::Validation(message)) => assert!(message.contains("greater than 0")),
            other => panic!("expected a validation error, got {:?}", other.map(|_| ())),
        }
    }
}
