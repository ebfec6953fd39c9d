//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::conversation::ConversationSettings;
use crate::application::errors::ConfigError;
use crate::infrastructure::api::DEFAULT_BASE_URL;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub telegram: TelegramConfig,
    pub api: ApiConfig,
    pub payment: PaymentConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TelegramConfig {
    pub token: Option<String>,
    /// Long-polling timeout passed to getUpdates
    pub poll_timeout_seconds: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PaymentConfig {
    /// Payment collection address shown on the payment screen
    pub upi_id: String,
    /// Preset amounts offered on the amount menu
    pub presets: Vec<u64>,
    /// Simulated verification success probability
    pub success_rate: f64,
    /// Whether "payment done" may be retried on the same transaction
    pub allow_retry: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "quick-escrow-bot".to_string(),
            },
            telegram: TelegramConfig {
                token: None,
                poll_timeout_seconds: 30,
            },
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
            },
            payment: PaymentConfig {
                upi_id: "quickescrow@upi".to_string(),
                presets: vec![100, 500, 1000],
                success_rate: 0.8,
                allow_retry: true,
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Defaults overridden by environment variables, for running without a
    /// config file
    pub fn load_env() -> Self {
        let mut config = Config::default();

        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            if !token.is_empty() {
                config.telegram.token = Some(token);
            }
        }

        if let Ok(base_url) = std::env::var("API_BASE_URL") {
            if !base_url.is_empty() {
                config.api.base_url = base_url;
            }
        }

        config
    }

    /// The bot token, or the fatal startup error its absence is
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.telegram
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingField("telegram.token (TELEGRAM_BOT_TOKEN)".into()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.require_token()?;
        if self.payment.presets.is_empty() {
            return Err(ConfigError::InvalidValue(
                "payment.presets must not be empty".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.payment.success_rate) {
            return Err(ConfigError::InvalidValue(
                "payment.success-rate must be within 0..=1".into(),
            ));
        }
        Ok(())
    }

    pub fn conversation_settings(&self) -> ConversationSettings {
        ConversationSettings {
            upi_id: self.payment.upi_id.clone(),
            presets: self.payment.presets.clone(),
            allow_retry: self.payment.allow_retry,
        }
    }
}
