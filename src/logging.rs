//! Structured logging setup: pretty console output for development, JSON
//! and rolling-file output for anything that scrapes the logs. Driven by the
//! `logging` section of the config (or `LOG_LEVEL`/`LOG_FORMAT`/`LOG_OUTPUT`).

use crate::config::get_config;
use std::sync::OnceLock;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// The non-blocking appender stops writing once its guard drops; parking the
// guard in a static keeps file logging alive for the whole process.
static APPENDER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize the logging system based on configuration
pub fn init_logging() {
    let config = get_config();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let json = config.logging.format == "json";
    let registry = tracing_subscriber::registry().with(filter);

    match config.logging.output.as_str() {
        "file" => {
            let writer = file_writer();
            if json {
                registry.with(fmt::layer().json().with_writer(writer)).init();
            } else {
                registry
                    .with(fmt::layer().with_ansi(false).with_writer(writer))
                    .init();
            }
        }
        "both" => {
            let writer = file_writer();
            if json {
                registry
                    .with(fmt::layer().json())
                    .with(fmt::layer().json().with_writer(writer))
                    .init();
            } else {
                registry
                    .with(fmt::layer().pretty())
                    .with(fmt::layer().with_ansi(false).with_writer(writer))
                    .init();
            }
        }
        _ => {
            if json {
                registry
                    .with(
                        fmt::layer()
                            .json()
                            .with_target(true)
                            .with_file(true)
                            .with_line_number(true),
                    )
                    .init();
            } else {
                registry.with(fmt::layer().pretty().with_target(true)).init();
            }
        }
    }
}

fn file_writer() -> NonBlocking {
    let config = get_config();
    let appender = tracing_appender::rolling::daily(&config.paths.log_directory, "nutridash.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = APPENDER_GUARD.set(guard);
    writer
}
