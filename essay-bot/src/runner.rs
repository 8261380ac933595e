use anyhow::Result;
use essay_telegram::run_repl;
use tracing::{info, instrument};

use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;

/// Main entry after logging is up: validate config, build components and chain, then run the REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;

    let components = build_bot_components(&config)?;
    let handler_chain = build_handler_chain(&components);

    info!(handlers = handler_chain.len(), "Bot started successfully");

    run_repl(components.teloxide_bot.clone(), handler_chain).await
}
