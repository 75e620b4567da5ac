use std::path::PathBuf;

use askql_core::{AskqlConfig, ConfigError, ConfigProperties};
use tracing::level_filters::LevelFilter;

/// Configuration for the logging stack.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Append-only event log. `None` disables the file sink.
    pub file: Option<PathBuf>,
    /// Also print events to stdout.
    pub console: bool,
    /// Lowest level written to the event log.
    pub level: LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: Some(PathBuf::from("app.log")),
            console: true,
            level: LevelFilter::INFO,
        }
    }
}

impl LoggingConfig {
    /// Log to the given file only.
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
            console: false,
            level: LevelFilter::INFO,
        }
    }

    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }
}

impl ConfigProperties for LoggingConfig {
    fn prefix() -> &'static str {
        "logging"
    }

    /// Reads `logging.file`, `logging.console` and `logging.level`.
    ///
    /// An empty `logging.file` disables the file sink.
    fn from_config(config: &AskqlConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let file = match config.get::<Option<String>>("logging.file") {
            Ok(Some(path)) if path.trim().is_empty() => None,
            Ok(Some(path)) => Some(PathBuf::from(path)),
            Ok(None) => None,
            Err(ConfigError::NotFound(_)) => defaults.file,
            Err(e) => return Err(e),
        };

        let level = match config.get::<String>("logging.level") {
            Ok(raw) => raw.parse::<LevelFilter>().map_err(|_| ConfigError::TypeMismatch {
                key: "logging.level".to_string(),
                expected: "log level (error, warn, info, debug, trace, off)",
            })?,
            Err(ConfigError::NotFound(_)) => defaults.level,
            Err(e) => return Err(e),
        };

        Ok(Self {
            file,
            console: config.get_or("logging.console", defaults.console),
            level,
        })
    }
}
