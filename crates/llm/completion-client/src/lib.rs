//! # Completion client
//!
//! Sends one essay prompt to an OpenAI-compatible chat completion endpoint and returns the generated
//! text or a typed [`CompletionError`]. Failures are values: nothing here panics or retries.
//!
//! [`CompletionClient`] is object safe so handlers can hold `Arc<dyn CompletionClient>`;
//! [`ChatCompletionClient`] is the reqwest implementation.

use async_trait::async_trait;

mod client;
mod wire;

pub use client::{ChatCompletionClient, CompletionOptions, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use essay_core::{CompletionError, CompletionResult, FailureKind};

/// Instruction template wrapped around the user's topic.
pub const ESSAY_PROMPT_PREFIX: &str = "Write a 500-word essay about: ";

/// Builds the user message sent upstream for a topic.
pub fn essay_prompt(topic: &str) -> String {
    format!("{}{}", ESSAY_PROMPT_PREFIX, topic)
}

/// Completion interface: one topic in, generated text or a typed failure out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Requests an essay about `topic`. At most one upstream attempt; never returns failures other than as `Err` values.
    async fn complete(&self, topic: &str) -> CompletionResult;
}

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_char_boundary(7) || !token.is_char_boundary(len - 4) {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}
