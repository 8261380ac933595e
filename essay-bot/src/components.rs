//! Component factory: builds BotComponents from config. Isolates assembly logic from the runner.

use anyhow::Result;
use completion_client::{ChatCompletionClient, CompletionClient};
use delivery::DeliveryConfig;
use essay_core::Bot;
use essay_telegram::TelegramBotAdapter;
use handler_chain::HandlerChain;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::BotConfig;
use crate::handlers::{CommandHandler, EssayHandler, LoggingHandler};

/// Dependencies shared by every message handler.
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    /// Send capability handed to handlers. Tests replace it with a recording bot.
    pub bot: Arc<dyn Bot>,
    pub completion_client: Arc<dyn CompletionClient>,
    pub delivery_config: DeliveryConfig,
}

/// Builds BotComponents from a validated config.
#[instrument(skip(config))]
pub fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let teloxide_bot = config.telegram_config().build_bot();
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    let completion_client: Arc<dyn CompletionClient> = Arc::new(ChatCompletionClient::new(
        config.api_key.clone(),
        &config.completion_base_url,
        config.completion_options(),
    )?);

    info!(
        completion_base_url = %config.completion_base_url,
        model = %config.model,
        temperature = config.temperature,
        timeout_secs = config.completion_timeout_secs,
        max_chunk_size = config.max_chunk_size,
        "Components built"
    );

    Ok(BotComponents {
        teloxide_bot,
        bot,
        completion_client,
        delivery_config: config.delivery_config(),
    })
}

/// Builds the handler chain (logging → commands → essay).
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler::new()))
        .add_handler(Arc::new(CommandHandler::new(components.bot.clone())))
        .add_handler(Arc::new(EssayHandler::new(
            components.bot.clone(),
            components.completion_client.clone(),
            components.delivery_config.clone(),
        )))
}
