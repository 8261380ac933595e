//! # Essay bot application
//!
//! Wires the handler chain, completion client, delivery pipeline and Telegram transport.
//! Loads config from env and runs the REPL.

pub mod cli;
pub mod components;
pub mod config;
pub mod handlers;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::BotConfig;
pub use handlers::{CommandHandler, EssayHandler, LoggingHandler};
pub use runner::run_bot;
