//! Minimal transport config: bot token and optional API URL override.

use tracing::error;

/// Telegram connectivity settings.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Custom Bot API server, e.g. a local `telegram-bot-api` instance.
    pub telegram_api_url: Option<String>,
}

impl TelegramConfig {
    /// Builds the teloxide Bot, pointing it at `telegram_api_url` when that is a valid URL.
    pub fn build_bot(&self) -> teloxide::Bot {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match self.telegram_api_url {
            Some(ref url_str) => match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            },
            None => bot,
        }
    }
}
