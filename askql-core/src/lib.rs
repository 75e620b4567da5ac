//! Core building blocks shared by every askql crate: layered configuration,
//! the HTTP error type, SQL dialects and the query result model.

pub mod config;
pub mod dialect;
pub mod error;
pub mod outcome;

pub use config::{
    AskqlConfig, ConfigError, ConfigProperties, ConfigValue, DefaultSecretResolver,
    FromConfigValue, SecretResolver,
};
pub use dialect::SqlDialect;
pub use error::{error_response, AppError};
pub use outcome::{CellValue, FailureKind, QueryOutcome, RowWidthMismatch, Table, NO_DATA_FOUND};
