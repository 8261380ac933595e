//! Handler that logs every inbound message in before() and the chain's outcome in after().

use async_trait::async_trait;
use essay_core::{Handler, HandlerResponse, Message, Result};
use tracing::info;

/// Logs inbound messages; always continues.
#[derive(Clone, Default)]
pub struct LoggingHandler;

impl LoggingHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for LoggingHandler {
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            username = ?message.user.username,
            chat_id = message.chat.id,
            chat_type = %message.chat.chat_type,
            message_id = %message.id,
            content_len = message.content.len(),
            "step: inbound message"
        );
        Ok(true)
    }

    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        let outcome = match response {
            HandlerResponse::Continue => "unhandled",
            HandlerResponse::Ignore => "ignored",
            HandlerResponse::Stop => "stopped",
            HandlerResponse::Reply(_) => "replied",
        };
        info!(
            user_id = message.user.id,
            message_id = %message.id,
            outcome,
            "step: message done"
        );
        Ok(())
    }
}
