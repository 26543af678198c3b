//! Log file setup.  The terminal belongs to the game screen, so log messages
//! go to a file instead.
use crate::config::LogConfig;
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::error::Error;
use std::path::Path;
use thiserror::Error;

/// Start logging to the file named in `config`.  Nothing is set up if the
/// configured level is `off`.
pub(crate) fn init(config: &LogConfig) -> Result<(), LoggingError> {
    if config.level == LevelFilter::Off {
        return Ok(());
    }
    let path = config.file().ok_or(LoggingError::NoPath)?;
    let file = open_log_file(&path)?;
    let logconf = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    WriteLogger::init(config.level, logconf, file)?;
    Ok(())
}

fn open_log_file(path: &Path) -> Result<fs_err::File, LoggingError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).map_err(LoggingError::Open)?;
    }
    fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(LoggingError::Open)
}

/// Render an error and all of its sources on one line, outermost first
pub(crate) fn error_chain(e: &dyn Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(src) = source {
        msg.push_str(": ");
        msg.push_str(&src.to_string());
        source = src.source();
    }
    msg
}

#[derive(Debug, Error)]
pub(crate) enum LoggingError {
    #[error("failed to determine path to local data directory for log file")]
    NoPath,
    #[error("failed to open log file")]
    Open(#[source] std::io::Error),
    #[error("failed to install logger")]
    Install(#[from] log::SetLoggerError),
}
