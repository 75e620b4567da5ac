//! Layered application configuration.
//!
//! Sources, weakest first:
//!
//! | layer | example |
//! |-------|---------|
//! | base file | `application.yaml` |
//! | profile file | `application-prod.yaml` |
//! | dotenv files | `.env`, `.env.prod` (never override the real environment) |
//! | process environment | `DATABASE_URL` shadows `database.url` |
//!
//! String values from the YAML layers may contain `${NAME}`, `${env:NAME}` or
//! `${file:/path}` placeholders; they are expanded before the environment is
//! overlaid.

mod placeholders;
pub mod typed;
pub mod value;
mod yaml;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

pub use placeholders::{expand, DefaultSecretResolver, SecretResolver};
pub use typed::ConfigProperties;
pub use value::{ConfigValue, FromConfigValue};

/// Environment variable that overrides the profile passed to [`AskqlConfig::load`].
pub const PROFILE_ENV: &str = "ASKQL_PROFILE";

#[derive(Debug)]
pub enum ConfigError {
    /// No value under this key.
    NotFound(String),
    /// A value exists but is not a valid `expected`.
    TypeMismatch { key: String, expected: &'static str },
    /// A file could not be read or parsed, or a placeholder is malformed.
    Load(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(key) => write!(f, "missing config key '{key}'"),
            Self::TypeMismatch { key, expected } => {
                write!(f, "config key '{key}' is not a valid {expected}")
            }
            Self::Load(msg) => write!(f, "cannot load configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

type Entries = HashMap<String, ConfigValue>;

/// Flat view over every configuration layer.
///
/// Keys compare loosely: `database.connect-timeout-secs`,
/// `database.connect_timeout_secs` and `DATABASE_CONNECT_TIMEOUT_SECS` are
/// the same entry.
#[derive(Debug, Clone)]
pub struct AskqlConfig {
    entries: Entries,
    profile: String,
}

impl AskqlConfig {
    /// Load every layer from the working directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from_dir(Path::new("."), profile, &DefaultSecretResolver)
    }

    pub fn load_from_dir(
        dir: &Path,
        profile: &str,
        resolver: &dyn SecretResolver,
    ) -> Result<Self, ConfigError> {
        let profile = std::env::var(PROFILE_ENV).unwrap_or_else(|_| profile.to_owned());

        let mut entries = Entries::new();
        for file in ["application.yaml".to_owned(), format!("application-{profile}.yaml")] {
            yaml::merge_file(&dir.join(file), &mut entries)?;
        }

        for file in [".env".to_owned(), format!(".env.{profile}")] {
            // absent dotenv files are fine; existing variables win
            dotenvy::from_path(dir.join(file)).ok();
        }

        for value in entries.values_mut() {
            if let ConfigValue::Text(text) = value {
                if text.contains("${") {
                    *text = expand(text, resolver)?;
                }
            }
        }

        entries.extend(
            std::env::vars().map(|(name, value)| (normalize_key(&name), ConfigValue::Text(value))),
        );

        Ok(Self { entries, profile })
    }

    /// Parse a single YAML document, with no other layers.
    pub fn from_yaml_str(source: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut entries = Entries::new();
        yaml::merge_str(source, &mut entries)?;
        Ok(Self {
            entries,
            profile: profile.to_owned(),
        })
    }

    pub fn empty() -> Self {
        Self {
            entries: Entries::new(),
            profile: "test".to_owned(),
        }
    }

    pub fn set(&mut self, key: &str, value: ConfigValue) {
        self.entries.insert(normalize_key(key), value);
    }

    fn lookup(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(&normalize_key(key))
    }

    /// Typed lookup.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotFound`] when the key is absent and
    /// [`ConfigError::TypeMismatch`] when the value does not convert.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        match self.lookup(key) {
            Some(value) => V::from_config_value(value, key),
            None => Err(ConfigError::NotFound(key.to_owned())),
        }
    }

    /// Typed lookup that falls back to `default` on any error.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn section<C: ConfigProperties>(&self) -> Result<C, ConfigError> {
        C::from_config(self)
    }
}

/// Lower-case the key and fold `-` and `_` into `.`.
pub(crate) fn normalize_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '-' | '_' => '.',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::normalize_key;

    #[test]
    fn key_spellings_converge() {
        assert_eq!(normalize_key("GOOGLE_API_KEY"), "google.api.key");
        assert_eq!(normalize_key("llm.api-key"), "llm.api.key");
        assert_eq!(normalize_key("Server.Bind"), "server.bind");
    }
}
