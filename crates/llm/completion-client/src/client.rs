//! reqwest-based [`CompletionClient`] for OpenAI-compatible `/chat/completions` endpoints.

use std::time::Duration;

use async_trait::async_trait;
use essay_core::{CompletionError, CompletionResult};
use reqwest::Client;
use tracing::{info, instrument, warn};

use crate::wire::{ChatMessage, ChatRequest, ChatResponse, ErrorBody};
use crate::{essay_prompt, mask_token, CompletionClient};

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Upstream error bodies longer than this are cut before they reach logs or users.
const ERROR_BODY_PREVIEW_LEN: usize = 300;

/// Per-request options sent with every completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub model: String,
    /// Sampling temperature in `[0, 2]`.
    pub temperature: f32,
    /// Whole-request timeout (connect + response body).
    pub timeout: Duration,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Chat completion client. Holds one pooled reqwest client configured with the request timeout.
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    client: Client,
    api_key: String,
    endpoint: String,
    options: CompletionOptions,
}

impl ChatCompletionClient {
    /// Builds a client for `{base_url}/chat/completions`.
    pub fn new(
        api_key: String,
        base_url: &str,
        options: CompletionOptions,
    ) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(options.timeout).build()?;
        let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        Ok(Self {
            client,
            api_key,
            endpoint,
            options,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn options(&self) -> &CompletionOptions {
        &self.options
    }

    fn map_transport_error(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            CompletionError::Timeout(self.options.timeout)
        } else {
            CompletionError::Network(e.to_string())
        }
    }

    async fn send(&self, content: &str) -> CompletionResult {
        let request = ChatRequest {
            model: &self.options.model,
            messages: vec![ChatMessage {
                role: "user",
                content,
            }],
            temperature: self.options.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                message: upstream_message(&body),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        // Some providers report failures such as an exhausted balance with a 2xx status.
        if parsed.choices.is_empty() {
            if let Ok(err) = serde_json::from_str::<ErrorBody>(&body) {
                return Err(CompletionError::Upstream {
                    status: status.as_u16(),
                    message: err.error.message,
                });
            }
        }

        if let Some(ref u) = parsed.usage {
            info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "Completion usage"
            );
        }

        parsed.into_content().ok_or_else(|| {
            CompletionError::MalformedResponse(
                "missing choices[0].message.content".to_string(),
            )
        })
    }
}

/// Extracts `error.message` from an API error body, else a bounded preview of the raw body.
fn upstream_message(body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ErrorBody>(body) {
        return err.error.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    match trimmed.char_indices().nth(ERROR_BODY_PREVIEW_LEN) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionClient {
    #[instrument(skip(self, topic), fields(model = %self.options.model))]
    async fn complete(&self, topic: &str) -> CompletionResult {
        let prompt = essay_prompt(topic);
        info!(
            temperature = self.options.temperature,
            timeout = ?self.options.timeout,
            api_key = %mask_token(&self.api_key),
            prompt_len = prompt.len(),
            "Completion request"
        );

        let result = self.send(&prompt).await;
        match &result {
            Ok(text) => info!(text_len = text.len(), "Completion succeeded"),
            Err(e) => warn!(kind = %e.kind(), error = %e, "Completion failed"),
        }
        result
    }
}
