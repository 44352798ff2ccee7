use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "gre.log";

/// Installs stderr logging plus a daily-rolling file under `logs_dir`.
///
/// `RUST_LOG` overrides the default `info` level. The returned guard flushes
/// the file writer and must live until exit.
pub fn init_logging(logs_dir: &Path, quiet: bool) -> WorkerGuard {
    let default_level = if quiet { "error" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .init();

    guard
}
