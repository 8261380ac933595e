//! REPL runner: converts teloxide messages to core::Message and passes them to the HandlerChain.

use anyhow::Result;
use essay_core::ToCoreMessage;
use handler_chain::HandlerChain;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use super::adapters::TelegramMessageWrapper;

/// Starts the long-polling REPL. Each message is converted to core::Message and handled in its own
/// spawned task, so a slow completion never blocks other chats. Chain errors are logged, not propagated.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(
            username = ?me.user.username,
            "Connected to Telegram, starting repl"
        ),
        Err(e) => error!(error = %e, "get_me failed, starting repl anyway"),
    }

    let chain = handler_chain;
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();

            match msg.text() {
                Some(text) => info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    message_len = text.len(),
                    "Received message"
                ),
                None => info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    "Received non-text message"
                ),
            }

            tokio::spawn(async move {
                if let Err(e) = chain.handle(&core_msg).await {
                    error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
                }
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}
