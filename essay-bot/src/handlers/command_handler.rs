//! Answers /start, /help and /essay. Any other command is swallowed so it never becomes an essay topic.

use async_trait::async_trait;
use essay_core::{Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, instrument};

pub const START_TEXT: &str = "📚 Essay AI Assistant Ready!\nUse /essay to begin.";
pub const HELP_TEXT: &str = "Help: Use /essay to write an essay";
pub const ESSAY_TEXT: &str = "Please send your essay topic:";

/// Replies to bot commands; plain text continues down the chain.
#[derive(Clone)]
pub struct CommandHandler {
    bot: Arc<dyn Bot>,
}

impl CommandHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }

    /// Fixed reply for a known command name.
    pub fn reply_for(command: &str) -> Option<&'static str> {
        match command {
            "start" => Some(START_TEXT),
            "help" => Some(HELP_TEXT),
            "essay" => Some(ESSAY_TEXT),
            _ => None,
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(command) = message.command() else {
            return Ok(HandlerResponse::Continue);
        };

        match Self::reply_for(command) {
            Some(text) => {
                self.bot.reply_to(message, text).await?;
                debug!(command, "Command answered");
            }
            None => debug!(command, "Unknown command ignored"),
        }
        Ok(HandlerResponse::Stop)
    }
}
