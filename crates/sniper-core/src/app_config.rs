//! Application configuration resolved from the environment.

use std::path::PathBuf;

/// Deployment environment, selected via `SNIPER_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

/// All runtime configuration for the scanner, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Path of the on-device sqlite file.
    pub db_path: PathBuf,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// API key for the generative analysis service. Optional at load time;
    /// scan and negotiate commands fail with a clear error when unset.
    pub gemini_api_key: Option<String>,
    /// Base URL of the analysis service; overridable for tests.
    pub gemini_base_url: String,
    pub gemini_request_timeout_secs: u64,
    pub gemini_max_retries: u32,
    pub gemini_backoff_base_ms: u64,
    /// Timeout for best-effort remote mirror writes.
    pub cloud_request_timeout_secs: u64,
}
