//! Application configuration structs
//!
//! Loads configuration from environment variables.

use serde::Deserialize;
use std::env;

use ticket_core::Snowflake;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub bot: BotConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Bot behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    pub token: String,
    #[serde(default = "default_prefix")]
    pub default_prefix: String,
    /// The bot's own user id; when set, created ticket channels carry an
    /// overwrite granting the bot management of the channel
    #[serde(default)]
    pub bot_user_id: Option<Snowflake>,
    /// Seconds during which a repeated identical action from the same actor
    /// in the same channel is dropped as a duplicate
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: u64,
    /// Seconds a pending prompt (e.g. awaiting a reject reason) stays valid
    #[serde(default = "default_prompt_timeout_seconds")]
    pub prompt_timeout_seconds: u64,
    /// Attempts made to create the ticket channel before giving up
    #[serde(default = "default_channel_create_retries")]
    pub channel_create_retries: u32,
    /// Seconds between reconcile sweeps over open ticket bindings
    #[serde(default = "default_reconcile_interval_seconds")]
    pub reconcile_interval_seconds: u64,
}

// Default value functions
fn default_app_name() -> String {
    "ticket-bot".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_prefix() -> String {
    ".".to_string()
}

fn default_cooldown_seconds() -> u64 {
    3
}

fn default_prompt_timeout_seconds() -> u64 {
    60
}

fn default_channel_create_retries() -> u32 {
    3
}

fn default_reconcile_interval_seconds() -> u64 {
    300 // 5 minutes
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            bot: BotConfig {
                token: env::var("BOT_TOKEN").map_err(|_| ConfigError::MissingVar("BOT_TOKEN"))?,
                default_prefix: env::var("BOT_DEFAULT_PREFIX")
                    .unwrap_or_else(|_| default_prefix()),
                bot_user_id: env::var("BOT_USER_ID").ok().and_then(|s| s.parse().ok()),
                cooldown_seconds: env::var("BOT_COOLDOWN_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_cooldown_seconds),
                prompt_timeout_seconds: env::var("BOT_PROMPT_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_prompt_timeout_seconds),
                channel_create_retries: env::var("BOT_CHANNEL_CREATE_RETRIES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_channel_create_retries),
                reconcile_interval_seconds: env::var("BOT_RECONCILE_INTERVAL_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_reconcile_interval_seconds),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
