//! Logger setup for the executables
//!
//! Log records go to both stdout and the session's log file, each with its
//! own minimum level so that the file can keep generator detail while the
//! console stays readable. Each line is stamped with the number of seconds
//! elapsed since the session epoch, and debug/trace records additionally carry
//! their target module. Only the console output is coloured.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::{ColoredString, Colorize};
use log::{self, info, Level, Record};
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Minimum levels for each log output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoggerConfig {
    /// Most detailed level printed to stdout
    pub console_level: LevelFilter,

    /// Most detailed level written to the session log file
    pub file_level: LevelFilter,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level of at least `INFO` for the {0}, found `{1}`")]
    InvalidMinLogLevel(&'static str, LevelFilter),

    #[error("Error opening the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LoggerConfig {
    pub fn new(console_level: LevelFilter, file_level: LevelFilter) -> Self {
        Self {
            console_level,
            file_level,
        }
    }

    /// Check that neither output hides info, warning or error records.
    pub fn validate(&self) -> Result<(), LoggerInitError> {
        if self.console_level < Level::Info {
            return Err(LoggerInitError::InvalidMinLogLevel(
                "console",
                self.console_level,
            ));
        }
        if self.file_level < Level::Info {
            return Err(LoggerInitError::InvalidMinLogLevel(
                "log file",
                self.file_level,
            ));
        }

        Ok(())
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new(LevelFilter::Info, LevelFilter::Debug)
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// # Safety
///
/// - This function must only be called once, a second call will return
///   `LoggerInitError::FernInitError`.
pub fn logger_init(
    config: &LoggerConfig,
    session: &session::Session,
) -> Result<(), LoggerInitError> {
    config.validate()?;

    let log_file = fern::log_file(&session.log_file_path)
        .map_err(LoggerInitError::LogFileInitError)?;

    let console = fern::Dispatch::new()
        .format(|out, message, record| {
            let prefix = prefix(record, coloured_tag(record.level()));
            out.finish(format_args!("{} {}", prefix, message))
        })
        .level(config.console_level)
        .chain(std::io::stdout());

    let file = fern::Dispatch::new()
        .format(|out, message, record| {
            let prefix = prefix(record, level_tag(record.level()));
            out.finish(format_args!("{} {}", prefix, message))
        })
        .level(config.file_level)
        .chain(log_file);

    fern::Dispatch::new()
        .level(config.console_level.max(config.file_level))
        .chain(console)
        .chain(file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    info!("    Session epoch: {}", session.epoch);
    info!("    Console log level: {:?}", config.console_level);
    info!("    File log level: {:?}", config.file_level);
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Timestamp and level tag, plus the target for debug and trace records.
fn prefix<T: std::fmt::Display>(record: &Record, tag: T) -> String {
    let elapsed = session::get_elapsed_seconds();

    if record.level() > Level::Info {
        format!("[{:10.6} {}] {}:", elapsed, tag, record.target())
    } else {
        format!("[{:10.6} {}]", elapsed, tag)
    }
}

/// Three letter tag for a log level
fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Trace => "TRC",
        Level::Debug => "DBG",
        Level::Info => "INF",
        Level::Warn => "WRN",
        Level::Error => "ERR",
    }
}

fn coloured_tag(level: Level) -> ColoredString {
    let tag = level_tag(level);

    match level {
        Level::Trace => tag.dimmed().italic(),
        Level::Debug => tag.dimmed(),
        Level::Info => tag.normal(),
        Level::Warn => tag.yellow(),
        Level::Error => tag.red().bold(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(LoggerConfig::default().validate().is_ok());
        assert!(LoggerConfig::new(LevelFilter::Debug, LevelFilter::Trace)
            .validate()
            .is_ok());

        assert!(matches!(
            LoggerConfig::new(LevelFilter::Warn, LevelFilter::Debug).validate(),
            Err(LoggerInitError::InvalidMinLogLevel("console", LevelFilter::Warn))
        ));
        assert!(matches!(
            LoggerConfig::new(LevelFilter::Info, LevelFilter::Off).validate(),
            Err(LoggerInitError::InvalidMinLogLevel("log file", LevelFilter::Off))
        ));
    }

    #[test]
    fn test_level_tags() {
        assert_eq!(level_tag(Level::Warn), "WRN");
        assert_eq!(coloured_tag(Level::Info).to_string(), "INF");
    }
}
