//! Bot configuration: Telegram connection, completion endpoint, delivery limits, logging. Loaded once from env.

use anyhow::{Context, Result};
use completion_client::{CompletionOptions, DEFAULT_BASE_URL, DEFAULT_MODEL};
use delivery::{DeliveryConfig, MAX_CHUNK_SIZE};
use essay_telegram::TelegramConfig;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_LOG_FILE: &str = "logs/essay-bot.log";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything the bot needs at startup. Built once and passed by reference.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN or TELEGRAM_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
    /// DEEPSEEK_API_KEY or OPENAI_API_KEY
    pub api_key: String,
    /// COMPLETION_BASE_URL
    pub completion_base_url: String,
    /// MODEL
    pub model: String,
    /// TEMPERATURE
    pub temperature: f32,
    /// COMPLETION_TIMEOUT_SECS
    pub completion_timeout_secs: u64,
    /// MAX_CHUNK_SIZE
    pub max_chunk_size: usize,
}

/// First non-empty value among `names`.
fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|v| !v.trim().is_empty())
}

/// Parses `name` if set; unset means `default`, unparsable is an error.
fn env_parse<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} has an invalid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}

impl BotConfig {
    /// Loads from env. `token` overrides BOT_TOKEN if provided.
    /// Fails when either credential is missing or a numeric variable does not parse.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = token
            .filter(|t| !t.trim().is_empty())
            .or_else(|| first_env(&["BOT_TOKEN", "TELEGRAM_TOKEN"]));
        let api_key = first_env(&["DEEPSEEK_API_KEY", "OPENAI_API_KEY"]);

        let (bot_token, api_key) = match (bot_token, api_key) {
            (Some(bot_token), Some(api_key)) => (bot_token, api_key),
            (bot_token, api_key) => {
                let mut missing = Vec::new();
                if bot_token.is_none() {
                    missing.push("BOT_TOKEN (or TELEGRAM_TOKEN)");
                }
                if api_key.is_none() {
                    missing.push("DEEPSEEK_API_KEY (or OPENAI_API_KEY)");
                }
                anyhow::bail!("{} not set", missing.join(", "));
            }
        };

        Ok(Self {
            bot_token,
            telegram_api_url: first_env(&["TELEGRAM_API_URL", "TELOXIDE_API_URL"]),
            log_file: Self::log_file_from_env(),
            api_key,
            completion_base_url: first_env(&["COMPLETION_BASE_URL"])
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: first_env(&["MODEL"]).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: env_parse("TEMPERATURE", DEFAULT_TEMPERATURE)?,
            completion_timeout_secs: env_parse("COMPLETION_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            max_chunk_size: env_parse("MAX_CHUNK_SIZE", MAX_CHUNK_SIZE)?,
        })
    }

    /// LOG_FILE or the default path. Readable before the rest of the config so startup errors get logged.
    pub fn log_file_from_env() -> String {
        first_env(&["LOG_FILE"]).unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
    }

    /// Validates URLs and numeric ranges.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            reqwest::Url::parse(url_str).with_context(|| {
                format!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                )
            })?;
        }
        reqwest::Url::parse(&self.completion_base_url).with_context(|| {
            format!(
                "COMPLETION_BASE_URL is not a valid URL: {}",
                self.completion_base_url
            )
        })?;
        if !(0.0..=2.0).contains(&self.temperature) {
            anyhow::bail!("TEMPERATURE must be in [0, 2], got {}", self.temperature);
        }
        if self.completion_timeout_secs == 0 {
            anyhow::bail!("COMPLETION_TIMEOUT_SECS must be greater than 0");
        }
        if self.max_chunk_size == 0 {
            anyhow::bail!("MAX_CHUNK_SIZE must be greater than 0");
        }
        Ok(())
    }

    pub fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            timeout: Duration::from_secs(self.completion_timeout_secs),
        }
    }

    pub fn delivery_config(&self) -> DeliveryConfig {
        DeliveryConfig {
            max_chunk_size: self.max_chunk_size,
            ..DeliveryConfig::default()
        }
    }

    pub fn telegram_config(&self) -> TelegramConfig {
        TelegramConfig {
            bot_token: self.bot_token.clone(),
            telegram_api_url: self.telegram_api_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "BOT_TOKEN",
        "TELEGRAM_TOKEN",
        "DEEPSEEK_API_KEY",
        "OPENAI_API_KEY",
        "TELEGRAM_API_URL",
        "TELOXIDE_API_URL",
        "LOG_FILE",
        "COMPLETION_BASE_URL",
        "MODEL",
        "TEMPERATURE",
        "COMPLETION_TIMEOUT_SECS",
        "MAX_CHUNK_SIZE",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_load_config_with_defaults() {
        clear_env();
        env::set_var("BOT_TOKEN", "test_token");
        env::set_var("DEEPSEEK_API_KEY", "test_key");

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.bot_token, "test_token");
        assert_eq!(config.api_key, "test_key");
        assert!(config.telegram_api_url.is_none());
        assert_eq!(config.log_file, "logs/essay-bot.log");
        assert_eq!(config.completion_base_url, "https://api.deepseek.com/v1");
        assert_eq!(config.model, "deepseek-chat");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.completion_timeout_secs, 30);
        assert_eq!(config.max_chunk_size, 4000);
        assert!(config.validate().is_ok());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_config_with_custom_values() {
        clear_env();
        env::set_var("TELEGRAM_TOKEN", "legacy_token");
        env::set_var("OPENAI_API_KEY", "openai_key");
        env::set_var("COMPLETION_BASE_URL", "http://localhost:11434/v1");
        env::set_var("MODEL", "llama3");
        env::set_var("TEMPERATURE", "1.2");
        env::set_var("COMPLETION_TIMEOUT_SECS", "90");
        env::set_var("MAX_CHUNK_SIZE", "1000");
        env::set_var("LOG_FILE", "/tmp/essay.log");

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.bot_token, "legacy_token");
        assert_eq!(config.api_key, "openai_key");
        assert_eq!(config.model, "llama3");
        assert_eq!(config.temperature, 1.2);
        assert_eq!(config.log_file, "/tmp/essay.log");
        let options = config.completion_options();
        assert_eq!(options.timeout, Duration::from_secs(90));
        assert_eq!(options.model, "llama3");
        assert_eq!(config.delivery_config().max_chunk_size, 1000);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_config_with_override_token() {
        clear_env();
        env::set_var("BOT_TOKEN", "env_token");
        env::set_var("DEEPSEEK_API_KEY", "test_key");

        let config = BotConfig::load(Some("override_token".to_string())).unwrap();

        assert_eq!(config.bot_token, "override_token");
        assert_eq!(config.telegram_config().bot_token, "override_token");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_credentials_are_fatal() {
        clear_env();
        let err = BotConfig::load(None).unwrap_err().to_string();
        assert!(err.contains("BOT_TOKEN"));
        assert!(err.contains("DEEPSEEK_API_KEY"));

        env::set_var("BOT_TOKEN", "test_token");
        let err = BotConfig::load(None).unwrap_err().to_string();
        assert!(!err.contains("BOT_TOKEN"));
        assert!(err.contains("DEEPSEEK_API_KEY"));

        env::set_var("DEEPSEEK_API_KEY", "  ");
        assert!(BotConfig::load(None).is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_unparsable_number_is_error() {
        clear_env();
        env::set_var("BOT_TOKEN", "test_token");
        env::set_var("DEEPSEEK_API_KEY", "test_key");
        env::set_var("TEMPERATURE", "warm");

        assert!(BotConfig::load(None).is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_validate_rejects_bad_values() {
        clear_env();
        env::set_var("BOT_TOKEN", "test_token");
        env::set_var("DEEPSEEK_API_KEY", "test_key");
        let base = BotConfig::load(None).unwrap();
        clear_env();

        let mut config = base.clone();
        config.telegram_api_url = Some("not-a-valid-url".to_string());
        assert!(config.validate().is_err());

        let mut config = base.clone();
        config.temperature = 2.5;
        assert!(config.validate().is_err());

        let mut config = base.clone();
        config.completion_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = base.clone();
        config.max_chunk_size = 0;
        assert!(config.validate().is_err());

        let mut config = base;
        config.completion_base_url = "deepseek".to_string();
        assert!(config.validate().is_err());
    }
}
