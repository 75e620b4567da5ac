//! Logging for askql.
//!
//! Every component reports through `tracing`. This crate owns the sink:
//!
//! - an append-only event log, one line per event, formatted as
//!   `YYYY-MM-DD HH:MM:SS - LEVEL - message` in local time;
//! - optional console output filtered by `RUST_LOG`;
//! - a tower-http `TraceLayer` for HTTP request spans.
//!
//! # Usage
//!
//! ```rust,ignore
//! use askql_observability::{Logging, LoggingConfig};
//!
//! let logging = Logging::new(config.section::<LoggingConfig>()?);
//! logging.init()?;
//! ```

pub mod config;
pub mod format;
pub mod layers;
pub mod setup;

pub use config::LoggingConfig;
pub use format::{level_label, LogLineFormat, TIMESTAMP_FORMAT};
pub use layers::{catch_panic_layer, default_trace};
pub use setup::{Logging, LoggingError, DEFAULT_CONSOLE_FILTER};
