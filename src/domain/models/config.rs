use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Main configuration structure for tryst
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Local profile (owner identity)
    #[serde(default)]
    pub profile: ProfileConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Generative text service configuration
    #[serde(default)]
    pub generative: GenerativeConfig,
}

/// Local profile configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProfileConfig {
    /// Owner identity every repository query is scoped to.
    /// Generated by `tryst init`; may be overridden per command.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Uuid>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".tryst/tryst.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Generative text service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GenerativeConfig {
    /// Enable the generative strategy. When false every recommendation
    /// comes from the deterministic heuristic.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// API key (can also be set via ANTHROPIC_API_KEY env var)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL for API (for testing/proxies)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature. High by design: the delegate favors variety
    /// over determinism.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Max tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds. A timed-out call is treated exactly
    /// like an unavailable service.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How many history entries the prompt embeds, newest first
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

const fn default_enabled() -> bool {
    true
}

fn default_model() -> String {
    "claude-sonnet-4-5-20250929".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

const fn default_temperature() -> f64 {
    0.9
}

const fn default_max_tokens() -> u32 {
    3000
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_history_limit() -> usize {
    10
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            history_limit: default_history_limit(),
        }
    }
}
