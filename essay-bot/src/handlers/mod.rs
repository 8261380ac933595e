//! Handler implementations: logging, commands, essay generation.

mod command_handler;
mod essay_handler;
mod logging_handler;

pub use command_handler::{CommandHandler, ESSAY_TEXT, HELP_TEXT, START_TEXT};
pub use essay_handler::{acknowledgement, EssayHandler};
pub use logging_handler::LoggingHandler;
