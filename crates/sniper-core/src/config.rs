use std::path::PathBuf;

use thiserror::Error;

use crate::app_config::{AppConfig, Environment};

/// Errors raised while resolving configuration or parsing user input.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("unknown phone model: {0}")]
    UnknownPhoneModel(String),
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The core parsing logic is decoupled from the real environment so it can be
/// tested with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("SNIPER_ENV", "development"));
    let log_level = or_default("SNIPER_LOG_LEVEL", "info");
    let db_path = PathBuf::from(or_default("SNIPER_DB_PATH", "./sniper.db"));
    let db_max_connections = parse_u32("SNIPER_DB_MAX_CONNECTIONS", "5")?;
    let db_acquire_timeout_secs = parse_u64("SNIPER_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let gemini_api_key = lookup("GEMINI_API_KEY").ok();
    let gemini_base_url = or_default(
        "SNIPER_GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com",
    );
    let gemini_request_timeout_secs = parse_u64("SNIPER_GEMINI_REQUEST_TIMEOUT_SECS", "60")?;
    let gemini_max_retries = parse_u32("SNIPER_GEMINI_MAX_RETRIES", "2")?;
    let gemini_backoff_base_ms = parse_u64("SNIPER_GEMINI_BACKOFF_BASE_MS", "1000")?;

    let cloud_request_timeout_secs = parse_u64("SNIPER_CLOUD_REQUEST_TIMEOUT_SECS", "15")?;

    Ok(AppConfig {
        env,
        log_level,
        db_path,
        db_max_connections,
        db_acquire_timeout_secs,
        gemini_api_key,
        gemini_base_url,
        gemini_request_timeout_secs,
        gemini_max_retries,
        gemini_backoff_base_ms,
        cloud_request_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
