//! Bot abstraction for sending messages.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in essay-telegram.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Outbound send capability. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
}
