//! Sends a completion result to a chat: the error line, or the text chunk by chunk followed by a completion notice.

use essay_core::{Bot, Chat, CompletionError, CompletionResult};
use tracing::{debug, info, instrument, warn};

use crate::chunks::{chunk_count, chunks};

/// Largest chunk sent in one message, in chars. Telegram's own limit is 4096.
pub const MAX_CHUNK_SIZE: usize = 4000;

pub const COMPLETION_NOTICE: &str = "✅ Essay complete! Use /essay for another.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryConfig {
    pub max_chunk_size: usize,
    /// Sent after every chunk of a successful result was delivered.
    pub completion_notice: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: MAX_CHUNK_SIZE,
            completion_notice: COMPLETION_NOTICE.to_string(),
        }
    }
}

/// Result of one send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    DeliveryFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Completed,
    Failed,
}

/// Progress of a single delivery. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryState {
    Idle,
    /// Sending the chunk at this zero-based index.
    Sending(usize),
    Confirming,
    Completed,
    Failed,
}

impl DeliveryState {
    pub fn is_terminal(self) -> bool {
        matches!(self, DeliveryState::Completed | DeliveryState::Failed)
    }
}

/// What happened during one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub status: DeliveryStatus,
    /// One outcome per attempted send, in order (chunks, then the notice or the error line).
    pub outcomes: Vec<DeliveryOutcome>,
    /// Number of chunks the text was split into; 0 for a failed completion.
    pub chunk_count: usize,
}

impl DeliveryReport {
    pub fn is_completed(&self) -> bool {
        self.status == DeliveryStatus::Completed
    }

    /// Number of sends that succeeded.
    pub fn delivered(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| **o == DeliveryOutcome::Delivered)
            .count()
    }
}

/// User-facing text for a failed completion.
pub fn error_message(error: &CompletionError) -> String {
    format!("❌ Error: {}", error)
}

/// Tracks the state machine and the outcomes of one delivery.
struct Delivery<'a> {
    bot: &'a dyn Bot,
    chat: &'a Chat,
    state: DeliveryState,
    outcomes: Vec<DeliveryOutcome>,
}

impl<'a> Delivery<'a> {
    fn new(bot: &'a dyn Bot, chat: &'a Chat) -> Self {
        Self {
            bot,
            chat,
            state: DeliveryState::Idle,
            outcomes: Vec::new(),
        }
    }

    fn transition(&mut self, next: DeliveryState) {
        debug!(chat_id = self.chat.id, from = ?self.state, to = ?next, "delivery state");
        self.state = next;
    }

    /// Sends one message; on failure moves to `Failed`. Returns whether it was delivered.
    async fn send(&mut self, text: &str) -> bool {
        match self.bot.send_message(self.chat, text).await {
            Ok(()) => {
                self.outcomes.push(DeliveryOutcome::Delivered);
                true
            }
            Err(e) => {
                warn!(
                    chat_id = self.chat.id,
                    state = ?self.state,
                    error = %e,
                    "Send failed, delivery stopped"
                );
                self.outcomes.push(DeliveryOutcome::DeliveryFailed(e.to_string()));
                self.transition(DeliveryState::Failed);
                false
            }
        }
    }

    fn finish(self, chunk_count: usize) -> DeliveryReport {
        debug_assert!(self.state.is_terminal());
        let status = match self.state {
            DeliveryState::Completed => DeliveryStatus::Completed,
            _ => DeliveryStatus::Failed,
        };
        DeliveryReport {
            status,
            outcomes: self.outcomes,
            chunk_count,
        }
    }
}

/// Delivers `result` to `chat` through `bot`.
///
/// A failed completion becomes exactly one error message and a `Failed` report; it is never chunked.
/// A successful one is sent chunk by chunk, each send awaited before the next, followed by the
/// completion notice. The first failed send stops the delivery; nothing is retried or rolled back.
#[instrument(skip(bot, chat, result, config), fields(chat_id = chat.id))]
pub async fn deliver(
    bot: &dyn Bot,
    chat: &Chat,
    result: &CompletionResult,
    config: &DeliveryConfig,
) -> DeliveryReport {
    let mut delivery = Delivery::new(bot, chat);

    let text = match result {
        Ok(text) => text,
        Err(error) => {
            info!(kind = %error.kind(), "Delivering completion error");
            delivery.transition(DeliveryState::Sending(0));
            if delivery.send(&error_message(error)).await {
                delivery.transition(DeliveryState::Failed);
            }
            return delivery.finish(0);
        }
    };

    let total = chunk_count(text, config.max_chunk_size);
    info!(
        text_len = text.len(),
        chunk_count = total,
        max_chunk_size = config.max_chunk_size,
        "Delivering completion"
    );

    for (index, chunk) in chunks(text, config.max_chunk_size).enumerate() {
        delivery.transition(DeliveryState::Sending(index));
        if !delivery.send(chunk).await {
            return delivery.finish(total);
        }
        debug!(chunk_index = index, chunk_len = chunk.len(), "Chunk delivered");
    }

    delivery.transition(DeliveryState::Confirming);
    if delivery.send(&config.completion_notice).await {
        delivery.transition(DeliveryState::Completed);
    }

    info!(
        sends = delivery.outcomes.len(),
        completed = delivery.state == DeliveryState::Completed,
        "Delivery finished"
    );
    delivery.finish(total)
}
