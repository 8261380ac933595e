//! # Delivery
//!
//! Bounded message delivery for generated text. [`chunks`] splits a text into windows of at most
//! [`MAX_CHUNK_SIZE`] chars; [`deliver`] sends a [`CompletionResult`](essay_core::CompletionResult)
//! through a [`Bot`](essay_core::Bot) strictly in order and reports what was delivered.
//!
//! State of one delivery: `Idle -> Sending(0) -> ... -> Sending(n-1) -> Confirming -> Completed`,
//! with any send failure moving straight to `Failed`.

mod chunks;
mod pipeline;

pub use chunks::{chunk_count, chunks, Chunks};
pub use pipeline::{
    deliver, error_message, DeliveryConfig, DeliveryOutcome, DeliveryReport, DeliveryState,
    DeliveryStatus, COMPLETION_NOTICE, MAX_CHUNK_SIZE,
};
