//! Terminal handler: treats plain text as an essay topic, asks the completion endpoint, and delivers the result.

use async_trait::async_trait;
use completion_client::CompletionClient;
use delivery::{deliver, DeliveryConfig};
use essay_core::{Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Acknowledgement sent before the (slow) completion call.
pub fn acknowledgement(topic: &str) -> String {
    format!("Generating essay about: {}\n(Please wait...)", topic)
}

/// Generates one essay per message. Upstream and delivery failures are reported to the user, never returned as errors.
#[derive(Clone)]
pub struct EssayHandler {
    bot: Arc<dyn Bot>,
    completion_client: Arc<dyn CompletionClient>,
    delivery_config: DeliveryConfig,
}

impl EssayHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        completion_client: Arc<dyn CompletionClient>,
        delivery_config: DeliveryConfig,
    ) -> Self {
        Self {
            bot,
            completion_client,
            delivery_config,
        }
    }
}

#[async_trait]
impl Handler for EssayHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let topic = message.content.as_str();
        if topic.trim().is_empty() || message.command().is_some() {
            return Ok(HandlerResponse::Ignore);
        }

        if let Err(e) = self.bot.reply_to(message, &acknowledgement(topic)).await {
            warn!(error = %e, "Failed to send acknowledgement");
        }

        let result = self.completion_client.complete(topic).await;
        let report = deliver(
            self.bot.as_ref(),
            &message.chat,
            &result,
            &self.delivery_config,
        )
        .await;

        info!(
            status = ?report.status,
            chunk_count = report.chunk_count,
            delivered = report.delivered(),
            "step: essay request done"
        );

        match result {
            Ok(text) if report.is_completed() => Ok(HandlerResponse::Reply(text)),
            _ => Ok(HandlerResponse::Stop),
        }
    }
}
