//! Log sink setup: daily-rotated file plus optional stdout

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer, Registry};

use crate::config::LoggingConfig;

/// Build the rotating file appender described by `config`
pub fn file_appender(config: &LoggingConfig) -> crate::Result<RollingFileAppender> {
    std::fs::create_dir_all(&config.directory)?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(config.file_prefix.as_str())
        .filename_suffix("log")
        .max_log_files(config.max_files.max(1))
        .build(&config.directory)
        .map_err(|e| {
            crate::HomeworkBotError::Config(format!(
                "Failed to open log directory {:?}: {}",
                config.directory, e
            ))
        })
}

/// Install the global subscriber.
///
/// Every line carries timestamp, level and message. The returned guard
/// flushes the file writer on drop, so the caller keeps it alive for the
/// lifetime of the process.
pub fn init_logging(config: &LoggingConfig, level: Level) -> crate::Result<WorkerGuard> {
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender(config)?);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(false);

    let stdout_layer = config.stdout.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(false)
    });

    Registry::default()
        .with(file_layer.with_filter(LevelFilter::from_level(level)))
        .with(stdout_layer.with_filter(LevelFilter::from_level(level)))
        .try_init()
        .map_err(|e| {
            crate::HomeworkBotError::Config(format!("Failed to set global subscriber: {}", e))
        })?;

    Ok(guard)
}
