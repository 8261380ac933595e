//! # Handler chain
//!
//! Runs a sequence of handlers for each inbound message. Every handler's `before` runs first, in order;
//! any `before` returning false stops the chain. Then `handle` runs in order until one returns Stop or Reply.
//! Finally every `after` runs in reverse order with the final response.

use essay_core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Ordered list of handlers (before in order, handle until Stop/Reply, after in reverse).
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler (runs in order; first Stop/Reply ends the handle phase).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the chain for one message. Returns the first Stop or Reply, or Continue.
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(message_id = %message.id, "step: handler_chain started");

        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            if !handler.before(message).await? {
                info!(
                    handler = %handler_name,
                    "step: handler before returned false, chain stopped"
                );
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut final_response = HandlerResponse::Continue;
        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(message).await?;
            let (response_type, reply_len) = match &response {
                HandlerResponse::Continue => ("Continue", None),
                HandlerResponse::Stop => ("Stop", None),
                HandlerResponse::Ignore => ("Ignore", None),
                HandlerResponse::Reply(s) => ("Reply", Some(s.len())),
            };
            debug!(
                handler = %handler_name,
                response_type = %response_type,
                reply_len = ?reply_len,
                "step: handler done"
            );

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => continue,
            }
        }

        for handler in self.handlers.iter().rev() {
            handler.after(message, &final_response).await?;
        }

        info!(message_id = %message.id, "step: handler_chain finished");

        Ok(final_response)
    }
}

// Integration tests live in tests/handler_chain_test.rs
