//! Logging infrastructure for the scratchfs library.
//!
//! The library reports what it does through the `log` facade: probes,
//! listings, unmounts and removals at debug level, refusals at warn level.
//! This module provides a simple stderr backend for that facade with three
//! verbosity levels.

use std::env;
use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};

/// Environment variable consulted by [`init_logger`].
pub const LOG_MODE_ENV: &str = "SCRATCHFS_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use scratchfs::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Suppress all output.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Errors, warnings, info and debug messages.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "quiet", "normal", "verbose" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use scratchfs::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("quiet").unwrap(), LogLevel::Quiet);
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("invalid").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The most detailed `log` level shown at this verbosity.
    #[must_use]
    pub const fn filter(self) -> log::LevelFilter {
        match self {
            Self::Quiet => log::LevelFilter::Off,
            Self::Normal => log::LevelFilter::Warn,
            Self::Verbose => log::LevelFilter::Debug,
        }
    }
}

/// A simple stderr-based logger.
///
/// The logger implements [`log::Log`]; install it once per process with
/// [`Logger::install`] to see the library's diagnostics.
///
/// # Examples
///
/// ```
/// use scratchfs::{LogLevel, Logger};
///
/// let logger = Logger::new(LogLevel::Normal);
/// logger.warn("This might be a problem");
/// logger.debug("This will not be printed (requires Verbose)");
/// ```
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Registers this logger as the process-wide `log` backend.
    ///
    /// # Errors
    ///
    /// Returns an error if a logger has already been installed.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let filter = self.level.filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(filter);
        Ok(())
    }

    /// Logs an error message. Shown unless the level is Quiet.
    pub fn error(&self, message: &str) {
        self.write(log::Level::Error, &message);
    }

    /// Logs a warning message. Shown unless the level is Quiet.
    pub fn warn(&self, message: &str) {
        self.write(log::Level::Warn, &message);
    }

    /// Logs an informational message. Shown at Verbose only.
    pub fn info(&self, message: &str) {
        self.write(log::Level::Info, &message);
    }

    /// Logs a debug message. Shown at Verbose only.
    pub fn debug(&self, message: &str) {
        self.write(log::Level::Debug, &message);
    }

    fn write(&self, level: log::Level, message: &dyn fmt::Display) {
        if level > self.level.filter() {
            return;
        }
        let label = match level {
            log::Level::Error => "ERROR",
            log::Level::Warn => "WARN",
            log::Level::Info => "INFO",
            log::Level::Debug | log::Level::Trace => "DEBUG",
        };
        // Best effort: a closed stderr is not an error.
        let _ = writeln!(std::io::stderr(), "{label}: {message}");
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter()
    }

    fn log(&self, record: &log::Record<'_>) {
        self.write(record.level(), record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Initializes a logger based on CLI flags, the environment and
/// configuration.
///
/// The priority order is:
/// 1. CLI flags (verbose/quiet)
/// 2. `SCRATCHFS_LOG_MODE` environment variable
/// 3. The configured level
/// 4. Default (Normal)
///
/// If both `verbose` and `quiet` are true, `verbose` takes precedence. An
/// unrecognized environment value is ignored.
///
/// # Examples
///
/// ```
/// use scratchfs::{init_logger, LogLevel};
///
/// let logger = init_logger(true, false, None);
/// assert_eq!(logger.level(), LogLevel::Verbose);
///
/// let logger = init_logger(false, true, Some(LogLevel::Verbose));
/// assert_eq!(logger.level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool, configured: Option<LogLevel>) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    if let Ok(env_value) = env::var(LOG_MODE_ENV) {
        if let Ok(level) = LogLevel::parse(&env_value) {
            return Logger::new(level);
        }
    }

    Logger::new(configured.unwrap_or(LogLevel::Normal))
}
