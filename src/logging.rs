//! Tracing setup for the command-line client.
//!
//! Events go to stderr, leaving stdout for command output, and to a daily log
//! file under the app `logs/` directory. The appender itself deletes files
//! beyond the newest [`KEPT_LOG_FILES`]. When the log directory cannot be
//! prepared the client keeps running with stderr only.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, fmt::time::OffsetTime, prelude::*};

use crate::app_dirs::{self, AppDirError};

const LOG_FILE_PREFIX: &str = "obra-risk";
const LOG_FILE_SUFFIX: &str = "log";
/// Daily files retained in the logs directory.
pub const KEPT_LOG_FILES: usize = 10;

const DEFAULT_FILTER: &str = "info,ureq=warn,rustls=warn";
const VERBOSE_FILTER: &str = "debug,ureq=info,rustls=warn";

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Log directory unavailable: {0}")]
    LogDir(#[from] AppDirError),
    #[error("Cannot open a log file in {dir}: {source}")]
    Appender { dir: PathBuf, source: InitError },
    #[error("Tracing is already initialized: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global subscriber.
///
/// Returns the directory receiving log files, or `None` when only stderr is
/// active. `RUST_LOG` wins over the built-in filter; `verbose` lowers the
/// built-in filter to `debug`.
pub fn init(verbose: bool) -> Result<Option<PathBuf>, LoggingError> {
    let (file_layer, log_dir, file_error) = match open_log_file() {
        Ok((dir, appender)) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_timer(timer())
                .with_writer(writer);
            (Some(layer), Some(dir), None)
        }
        Err(err) => (None, None, Some(err)),
    };

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            fmt::layer()
                .with_target(false)
                .with_timer(timer())
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init()?;

    match (&log_dir, file_error) {
        (Some(dir), _) => tracing::debug!(dir = %dir.display(), "file logging enabled"),
        (None, Some(err)) => tracing::warn!(error = %err, "file logging disabled"),
        (None, None) => {}
    }
    Ok(log_dir)
}

fn open_log_file() -> Result<(PathBuf, RollingFileAppender), LoggingError> {
    let dir = app_dirs::logs_dir()?;
    let appender = build_appender(&dir)?;
    Ok((dir, appender))
}

fn build_appender(dir: &Path) -> Result<RollingFileAppender, LoggingError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(KEPT_LOG_FILES)
        .build(dir)
        .map_err(|source| LoggingError::Appender {
            dir: dir.to_path_buf(),
            source,
        })
}

fn timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

fn default_directives(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }
}
