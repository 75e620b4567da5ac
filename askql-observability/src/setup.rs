use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing::Dispatch;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::LoggingConfig;
use crate::format::LogLineFormat;

/// Console filter used when `RUST_LOG` is not set.
pub const DEFAULT_CONSOLE_FILTER: &str = "info,tower_http=debug";

/// Errors raised while building or installing the logging stack.
#[derive(Debug)]
pub enum LoggingError {
    /// The event log file could not be opened for appending.
    Open { path: PathBuf, source: std::io::Error },
    /// A global subscriber was already installed.
    AlreadyInitialized,
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::Open { path, source } => {
                write!(f, "Cannot open log file '{}': {source}", path.display())
            }
            LoggingError::AlreadyInitialized => write!(f, "Logging is already initialized"),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggingError::Open { source, .. } => Some(source),
            LoggingError::AlreadyInitialized => None,
        }
    }
}

/// The logging sink of the process.
///
/// Built once from [`LoggingConfig`]. [`Logging::init`] installs it as the
/// global default at startup; tests build a [`Dispatch`] with
/// [`Logging::dispatch`] and install it scoped to the test instead.
///
/// ```ignore
/// let logging = Logging::new(config.section::<LoggingConfig>()?);
/// logging.init()?;
/// ```
#[derive(Debug, Clone)]
pub struct Logging {
    config: LoggingConfig,
}

impl Logging {
    pub fn new(config: LoggingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Build the subscriber stack: event log file (optional) + console (optional).
    ///
    /// The file is opened in append mode; every event is written with a single
    /// `write` call so concurrent writers never interleave within a line.
    pub fn dispatch(&self) -> Result<Dispatch, LoggingError> {
        let file_layer = match &self.config.file {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| LoggingError::Open {
                        path: path.clone(),
                        source,
                    })?;
                Some(
                    tracing_subscriber::fmt::layer()
                        .event_format(LogLineFormat)
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_filter(file_targets(self.config.level)),
                )
            }
            None => None,
        };

        let console_layer = self.config.console.then(|| {
            let env_filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_CONSOLE_FILTER));
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_filter(env_filter)
        });

        let subscriber = Registry::default().with(file_layer).with(console_layer);
        Ok(Dispatch::new(subscriber))
    }

    /// Install the sink as the process-wide default. Call once, at startup.
    pub fn init(&self) -> Result<(), LoggingError> {
        let dispatch = self.dispatch()?;
        tracing::dispatcher::set_global_default(dispatch)
            .map_err(|_| LoggingError::AlreadyInitialized)
    }
}

/// Event log filter: application events at `level`, library chatter only from WARN.
fn file_targets(level: LevelFilter) -> Targets {
    Targets::new()
        .with_target("sqlx", LevelFilter::WARN)
        .with_target("tower_http", LevelFilter::WARN)
        .with_target("hyper", LevelFilter::WARN)
        .with_target("reqwest", LevelFilter::WARN)
        .with_default(level)
}
