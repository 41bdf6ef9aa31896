//! Configuration types for the homework bot
//!
//! Tokens are read from the environment, everything else from an optional
//! JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable holding the review API OAuth token
pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
/// Environment variable holding the Telegram bot token
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
/// Environment variable holding the target chat id
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Reject settings the poll loop cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.api.endpoint.trim().is_empty() {
            return Err(crate::HomeworkBotError::Config(
                "api.endpoint must not be empty".to_string(),
            ));
        }
        if self.polling.retry_period_seconds == 0 {
            return Err(crate::HomeworkBotError::Config(
                "polling.retry_period_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Review API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// How far back the first poll looks, in seconds
    #[serde(default = "default_initial_lookback")]
    pub initial_lookback_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            initial_lookback_seconds: default_initial_lookback(),
        }
    }
}

/// Poll loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_retry_period")]
    pub retry_period_seconds: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            retry_period_seconds: default_retry_period(),
        }
    }
}

/// Telegram Bot API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_telegram_api_url(),
        }
    }
}

/// Log sink settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
    #[serde(default = "default_true")]
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            file_prefix: default_log_file_prefix(),
            max_files: default_max_log_files(),
            stdout: true,
        }
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_initial_lookback() -> u64 {
    24 * 60 * 60
}

fn default_retry_period() -> u64 {
    600
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_log_directory() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_file_prefix() -> String {
    "homework-bot".to_string()
}

fn default_max_log_files() -> usize {
    7
}

fn default_true() -> bool {
    true
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::HomeworkBotError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}

/// The three secrets the bot cannot run without
#[derive(Clone)]
pub struct Secrets {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish_non_exhaustive()
    }
}

impl Secrets {
    /// Read the secrets from the process environment
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the secrets through an arbitrary lookup, reporting every missing name at once
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut fetch = |name: &str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(name.to_string());
                String::new()
            }
        };

        let practicum_token = fetch(PRACTICUM_TOKEN_VAR);
        let telegram_token = fetch(TELEGRAM_TOKEN_VAR);
        let telegram_chat_id = fetch(TELEGRAM_CHAT_ID_VAR);

        if !missing.is_empty() {
            return Err(crate::HomeworkBotError::ConfigMissing(missing));
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
        })
    }
}
