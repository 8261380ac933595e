//! # essay-core
//!
//! Core types and traits for the essay bot: [`Bot`], [`Handler`], message and user types,
//! the completion and delivery error taxonomy, and tracing initialization.
//! Transport-agnostic; used by essay-telegram, handler-chain, completion-client and delivery.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{CompletionError, CompletionResult, EssayError, FailureKind, Result};
pub use logger::init_tracing;
pub use types::{Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User};
