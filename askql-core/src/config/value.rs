use super::ConfigError;

/// A scalar read from one of the configuration layers.
///
/// Environment variables always arrive as [`ConfigValue::Text`]; the typed
/// conversions below parse text where that makes sense so that
/// `DATABASE_CONNECT_TIMEOUT_SECS=5` works like `connect-timeout-secs: 5`.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

pub trait FromConfigValue: Sized {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError>;
}

fn mismatch<T>(key: &str, expected: &'static str) -> Result<T, ConfigError> {
    Err(ConfigError::TypeMismatch {
        key: key.to_owned(),
        expected,
    })
}

impl FromConfigValue for String {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        Ok(match value {
            ConfigValue::Text(text) => text.clone(),
            ConfigValue::Integer(i) => i.to_string(),
            ConfigValue::Float(x) => x.to_string(),
            ConfigValue::Bool(b) => b.to_string(),
            ConfigValue::Null => return mismatch(key, "string"),
        })
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        if let ConfigValue::Bool(b) = value {
            return Ok(*b);
        }
        let ConfigValue::Text(text) = value else {
            return mismatch(key, "bool");
        };
        match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => mismatch(key, "bool"),
        }
    }
}

impl FromConfigValue for f64 {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::Float(x) => Ok(*x),
            ConfigValue::Integer(i) => Ok(*i as f64),
            ConfigValue::Text(text) => text.trim().parse().or_else(|_| mismatch(key, "f64")),
            _ => mismatch(key, "f64"),
        }
    }
}

/// `null` maps to `None`; anything else must convert to `T`.
impl<T: FromConfigValue> FromConfigValue for Option<T> {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        if *value == ConfigValue::Null {
            Ok(None)
        } else {
            T::from_config_value(value, key).map(Some)
        }
    }
}

macro_rules! integer_conversions {
    ($($int:ty),+ $(,)?) => {$(
        impl FromConfigValue for $int {
            fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
                let parsed = match value {
                    ConfigValue::Integer(i) => <$int>::try_from(*i).ok(),
                    ConfigValue::Text(text) => text.trim().parse::<$int>().ok(),
                    _ => None,
                };
                parsed.map_or_else(|| mismatch(key, stringify!($int)), Ok)
            }
        }
    )+};
}

integer_conversions!(i64, i32, u16, u32, u64, usize);
