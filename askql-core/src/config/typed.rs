use super::{AskqlConfig, ConfigError};

/// A typed view over the keys under one prefix.
///
/// Implementations decide their own defaults; [`AskqlConfig::section`] is
/// the usual entry point.
pub trait ConfigProperties: Sized {
    /// Leading key segment, e.g. `"database"`.
    fn prefix() -> &'static str;

    fn from_config(config: &AskqlConfig) -> Result<Self, ConfigError>;
}
