use std::path::Path;

use tracing_appender::non_blocking::NonBlocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::Layer;
use tracing_subscriber::prelude::*;

use super::filter::DebugOnlyFilter;
use super::filter::ErrorWarnFilter;
#[cfg(feature = "dev")]
use super::filter::InfoAndAboveFilter;
#[cfg(feature = "dev")]
use super::filter::InfoOnlyFilter;
use super::format::QaifFormat;
use crate::config::LoggingConfig;
use crate::error::Context;

/// Keeps the non-blocking file writers flushing; drop it last.
#[must_use = "logs stop being written once the guard is dropped"]
pub struct LogGuard {
    _guards: Vec<WorkerGuard>,
}

// Daily-rotated `<dir>/<engine>.log`, created on demand
fn rolling_writer(
    dir: &Path,
    engine_name: &str,
    guards: &mut Vec<WorkerGuard>,
) -> crate::Result<NonBlocking> {
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create logs directory: {}", dir.display()))?;

    let appender = RollingFileAppender::new(Rotation::DAILY, dir, format!("{}.log", engine_name));
    let (writer, guard) = tracing_appender::non_blocking(appender);
    guards.push(guard);
    Ok(writer)
}

/// Installs the global subscriber.
///
/// Debug and warn/error events go to separate rolling files. The terminal
/// gets warnings and errors on stderr (info and above with `dev`), since
/// stdout may carry the graph document.
pub fn setup_tracing(
    engine_name: &str,
    logging_config: &LoggingConfig,
) -> crate::Result<LogGuard> {
    let mut guards = Vec::new();
    let debug_writer = rolling_writer(&logging_config.debug_dir(), engine_name, &mut guards)?;
    let error_writer = rolling_writer(&logging_config.error_dir(), engine_name, &mut guards)?;

    let format = QaifFormat::new(engine_name);

    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .event_format(format.clone())
                .with_writer(debug_writer)
                .with_filter(DebugOnlyFilter),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .event_format(format.clone())
                .with_writer(error_writer)
                .with_filter(ErrorWarnFilter),
        );

    #[cfg(not(feature = "dev"))]
    let subscriber = subscriber.with(
        tracing_subscriber::fmt::layer()
            .event_format(format.clone())
            .with_writer(std::io::stderr)
            .with_filter(ErrorWarnFilter),
    );

    #[cfg(feature = "dev")]
    let subscriber = {
        let info_writer = rolling_writer(&logging_config.directory, engine_name, &mut guards)?;

        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(format.clone())
                    .with_writer(std::io::stderr)
                    .with_filter(InfoAndAboveFilter),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .event_format(format.clone())
                    .with_writer(info_writer)
                    .with_filter(InfoOnlyFilter),
            )
    };

    tracing::subscriber::set_global_default(subscriber).context("Error setting up logging")?;

    tracing::info!(
        "{}_logging_started::directory::{}",
        engine_name,
        logging_config.directory.display()
    );

    Ok(LogGuard { _guards: guards })
}
