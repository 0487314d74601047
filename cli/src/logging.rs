//! Log setup for the `tasks` binary.
//!
//! Stdout is reserved for the task list (text or JSON, possibly piped into
//! another tool), so log lines only ever go to stderr or to a file.

use std::path::PathBuf;

use task_manager_core::api::LoggingConfig;
use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

const LOG_FILE_PREFIX: &str = "tasks.log";

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("invalid log filter {filter:?}: {reason}")]
    Filter { filter: String, reason: String },
    #[error("cannot create log directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("logging is enabled but both console and file output are off")]
    NoSink,
    #[error("log subscriber already installed: {0}")]
    Install(String),
}

/// `RUST_LOG` wins over the configured level when it is set and not blank.
fn log_filter(logging: &LoggingConfig, rust_log: Option<String>) -> Result<EnvFilter, LoggingError> {
    let directives = rust_log
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| logging.level.clone());
    EnvFilter::try_new(&directives).map_err(|e| LoggingError::Filter {
        filter: directives,
        reason: e.to_string(),
    })
}

fn log_dir(logging: &LoggingConfig) -> PathBuf {
    logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("task-manager"))
}

/// Daily-rolling file under the log directory. The worker guard lives for
/// the rest of the process so buffered lines are flushed on exit.
fn open_log_file(logging: &LoggingConfig) -> Result<NonBlocking, LoggingError> {
    let dir = log_dir(logging);
    std::fs::create_dir_all(&dir).map_err(|source| LoggingError::Directory {
        path: dir.clone(),
        source,
    })?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX));
    let _ = LOG_GUARD.set(guard);
    Ok(writer)
}

pub fn init_tracing(logging: &LoggingConfig) -> Result<(), LoggingError> {
    if !logging.enabled {
        return Ok(());
    }
    if !logging.console && !logging.file {
        return Err(LoggingError::NoSink);
    }

    let filter = log_filter(logging, std::env::var("RUST_LOG").ok())?;

    let file_layer = if logging.file {
        let writer = open_log_file(logging)?;
        Some(fmt::layer().with_writer(writer).with_ansi(false))
    } else {
        None
    };

    // one short run read by a human: no timestamps, colour only on a terminal
    let console_layer = logging.console.then(|| {
        fmt::layer()
            .compact()
            .without_time()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}
