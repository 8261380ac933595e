//! Binary for the essay bot.

use anyhow::Result;
use clap::Parser;
use essay_bot::{load_config, run_bot, BotConfig, Cli, Commands};
use essay_core::init_tracing;
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            init_tracing(&BotConfig::log_file_from_env())?;
            let config = load_config(token).inspect_err(|e| {
                error!(error = %e, "Startup configuration incomplete, not starting bot");
            })?;
            run_bot(config).await.inspect_err(|e| {
                error!(error = %e, "Bot stopped with error");
            })
        }
    }
}
