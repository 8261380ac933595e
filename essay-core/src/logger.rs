//! Logging setup: the tracing_subscriber fmt layer writes the same full format to the console and the log file.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Initializes the global tracing subscriber.
///
/// Output (level, target, span, all fields) is teed to stdout and `log_file_path`.
/// The level comes from `RUST_LOG` (e.g. info, debug, trace) and defaults to info.
/// Load `.env` (e.g. `dotenvy::dotenv()`) before calling, otherwise `RUST_LOG` from it is not seen.
/// Missing parent directories of the log file are created.
pub fn init_tracing(log_file_path: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(log_file_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    let file = Arc::new(file);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    use tracing_subscriber::fmt::writer::MakeWriterExt;
    let writer = io::stdout.and(file);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("essay-bot.log");
        let path_str = path.to_str().unwrap();

        // A subscriber may already be installed by another test in this process; the file must exist either way.
        let _ = init_tracing(path_str);

        assert!(path.exists());
    }
}
