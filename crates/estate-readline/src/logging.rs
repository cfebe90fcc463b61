use anyhow::Result;
use estate_interaction::EstatePaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `ESTATE_LOG=estate_core=debug`.
pub const LOG_FILTER_ENV: &str = "ESTATE_LOG";

/// Installs a daily rolling file logger under `~/.config/estate/logs/`.
///
/// Logs go to a file so they never interleave with the REPL. The returned
/// guard flushes pending lines on drop and must outlive the session.
pub fn init_logging() -> Result<WorkerGuard> {
    let dir = EstatePaths::logs_dir()?;
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::daily(&dir, "estate.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))?;

    Ok(guard)
}
