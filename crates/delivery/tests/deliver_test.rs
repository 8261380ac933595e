//! Integration tests for [`delivery::deliver`].
//!
//! Uses a recording Bot that stores every sent text and can be told to fail on the Nth send.
//! Covers: single-chunk and multi-chunk delivery, the completion notice, stop-on-failure,
//! and completion errors becoming one error message.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use delivery::{
    deliver, DeliveryConfig, DeliveryOutcome, DeliveryStatus, COMPLETION_NOTICE, MAX_CHUNK_SIZE,
};
use essay_core::{Bot, Chat, CompletionError, EssayError, Result as EssayResult};

/// Records every send; fails the send whose 1-based position equals `fail_on`.
struct RecordingBot {
    fail_on: Option<usize>,
    attempts: Mutex<Vec<String>>,
}

impl RecordingBot {
    fn new() -> Self {
        Self {
            fail_on: None,
            attempts: Mutex::new(Vec::new()),
        }
    }

    fn failing_on(n: usize) -> Self {
        Self {
            fail_on: Some(n),
            attempts: Mutex::new(Vec::new()),
        }
    }

    fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> EssayResult<()> {
        let mut attempts = self.attempts.lock().unwrap();
        attempts.push(text.to_string());
        if Some(attempts.len()) == self.fail_on {
            return Err(EssayError::Bot("Bad Request: message is too long".to_string()));
        }
        Ok(())
    }
}

fn chat() -> Chat {
    Chat {
        id: 456,
        chat_type: "private".to_string(),
    }
}

fn text_of_len(len: usize) -> String {
    "The quick brown fox jumps over the lazy dog. "
        .chars()
        .cycle()
        .take(len)
        .collect()
}

/// **Test: prompt "dogs", upstream returns 120 chars → one chunk + notice, Completed.**
#[tokio::test]
async fn test_short_essay_one_chunk_and_notice() {
    let bot = RecordingBot::new();
    let essay = text_of_len(120);

    let report = deliver(&bot, &chat(), &Ok(essay.clone()), &DeliveryConfig::default()).await;

    assert_eq!(report.status, DeliveryStatus::Completed);
    assert!(report.is_completed());
    assert_eq!(report.chunk_count, 1);
    assert_eq!(bot.attempts(), vec![essay, COMPLETION_NOTICE.to_string()]);
    assert_eq!(report.delivered(), 2);
}

/// **Test: 9000 chars with max 4000 → chunks of 4000, 4000, 1000 then notice, in order.**
#[tokio::test]
async fn test_long_essay_three_chunks_in_order() {
    let bot = RecordingBot::new();
    let essay = text_of_len(9000);

    let report = deliver(&bot, &chat(), &Ok(essay.clone()), &DeliveryConfig::default()).await;

    assert_eq!(report.status, DeliveryStatus::Completed);
    assert_eq!(report.chunk_count, 3);

    let sent = bot.attempts();
    assert_eq!(sent.len(), 4);
    let lens: Vec<usize> = sent[..3].iter().map(|s| s.chars().count()).collect();
    assert_eq!(lens, vec![4000, 4000, 1000]);
    assert_eq!(sent[..3].concat(), essay);
    assert_eq!(sent[3], COMPLETION_NOTICE);
}

/// **Test: text exactly MAX_CHUNK_SIZE long is one chunk.**
#[tokio::test]
async fn test_exact_limit_is_one_chunk() {
    let bot = RecordingBot::new();
    let essay = text_of_len(MAX_CHUNK_SIZE);

    let report = deliver(&bot, &chat(), &Ok(essay.clone()), &DeliveryConfig::default()).await;

    assert_eq!(report.chunk_count, 1);
    assert_eq!(bot.attempts()[0], essay);
}

/// **Test: multi-byte text is split by chars and reassembles exactly.**
#[tokio::test]
async fn test_multibyte_text_reassembles() {
    let bot = RecordingBot::new();
    let essay: String = "Собаки 🐶 — верные друзья. ".chars().cycle().take(25).collect();
    let config = DeliveryConfig {
        max_chunk_size: 10,
        ..DeliveryConfig::default()
    };

    let report = deliver(&bot, &chat(), &Ok(essay.clone()), &config).await;

    assert!(report.is_completed());
    let sent = bot.attempts();
    assert_eq!(sent.len(), 4);
    assert_eq!(sent[..3].concat(), essay);
    assert!(sent[..3].iter().all(|s| s.chars().count() <= 10));
}

/// **Test: chunk 2 of 3 fails → chunk 1 delivered, chunk 2 attempted, chunk 3 and notice never sent.**
#[tokio::test]
async fn test_failure_stops_delivery() {
    let bot = RecordingBot::failing_on(2);
    let essay = text_of_len(9000);

    let report = deliver(&bot, &chat(), &Ok(essay.clone()), &DeliveryConfig::default()).await;

    assert_eq!(report.status, DeliveryStatus::Failed);
    assert_eq!(report.chunk_count, 3);
    let sent = bot.attempts();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], essay.chars().take(4000).collect::<String>());
    assert!(!sent.iter().any(|s| s == COMPLETION_NOTICE));
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.outcomes[0], DeliveryOutcome::Delivered);
    assert!(matches!(report.outcomes[1], DeliveryOutcome::DeliveryFailed(_)));
}

/// **Test: failure on the notice itself makes the delivery Failed even though every chunk arrived.**
#[tokio::test]
async fn test_notice_failure_is_failed() {
    let bot = RecordingBot::failing_on(2);

    let report = deliver(&bot, &chat(), &Ok(text_of_len(50)), &DeliveryConfig::default()).await;

    assert_eq!(report.status, DeliveryStatus::Failed);
    assert_eq!(report.delivered(), 1);
    assert_eq!(bot.attempts()[1], COMPLETION_NOTICE);
}

/// **Test: upstream timeout → exactly one error message, no chunking, Failed.**
#[tokio::test]
async fn test_completion_error_single_error_message() {
    let bot = RecordingBot::new();
    let result = Err(CompletionError::Timeout(Duration::from_secs(30)));

    let report = deliver(&bot, &chat(), &result, &DeliveryConfig::default()).await;

    assert_eq!(report.status, DeliveryStatus::Failed);
    assert_eq!(report.chunk_count, 0);
    assert_eq!(
        bot.attempts(),
        vec!["❌ Error: Timeout: no response within 30s".to_string()]
    );
    assert_eq!(report.outcomes, vec![DeliveryOutcome::Delivered]);
}

/// **Test: a very long error message is still sent as a single message.**
#[tokio::test]
async fn test_completion_error_never_chunked() {
    let bot = RecordingBot::new();
    let result = Err(CompletionError::MalformedResponse(text_of_len(50)));
    let config = DeliveryConfig {
        max_chunk_size: 10,
        ..DeliveryConfig::default()
    };

    let report = deliver(&bot, &chat(), &result, &config).await;

    assert_eq!(report.status, DeliveryStatus::Failed);
    assert_eq!(bot.attempts().len(), 1);
    assert!(bot.attempts()[0].starts_with("❌ Error: Malformed response: "));
}

/// **Test: error message that cannot be sent is recorded as DeliveryFailed.**
#[tokio::test]
async fn test_completion_error_send_failure() {
    let bot = RecordingBot::failing_on(1);
    let result = Err(CompletionError::Network("connection refused".to_string()));

    let report = deliver(&bot, &chat(), &result, &DeliveryConfig::default()).await;

    assert_eq!(report.status, DeliveryStatus::Failed);
    assert_eq!(report.delivered(), 0);
    assert!(matches!(report.outcomes[0], DeliveryOutcome::DeliveryFailed(_)));
}

/// **Test: a custom notice replaces the default one.**
#[tokio::test]
async fn test_custom_notice() {
    let bot = RecordingBot::new();
    let config = DeliveryConfig {
        completion_notice: "done".to_string(),
        ..DeliveryConfig::default()
    };

    deliver(&bot, &chat(), &Ok("short".to_string()), &config).await;

    assert_eq!(bot.attempts(), vec!["short".to_string(), "done".to_string()]);
}
