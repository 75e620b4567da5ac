use std::path::Path;

use serde_yaml::Value;

use super::{normalize_key, ConfigError, ConfigValue, Entries};

/// Merge `path` into `entries` if the file exists.
pub(super) fn merge_file(path: &Path, entries: &mut Entries) -> Result<(), ConfigError> {
    if !path.is_file() {
        return Ok(());
    }
    let source = std::fs::read_to_string(path)
        .map_err(|err| ConfigError::Load(format!("{}: {err}", path.display())))?;
    merge_str(&source, entries)
        .map_err(|err| ConfigError::Load(format!("{}: {err}", path.display())))
}

pub(super) fn merge_str(source: &str, entries: &mut Entries) -> Result<(), ConfigError> {
    let root: Value =
        serde_yaml::from_str(source).map_err(|err| ConfigError::Load(err.to_string()))?;

    let mut pending = vec![(String::new(), root)];
    while let Some((path, node)) = pending.pop() {
        match node {
            Value::Mapping(map) => {
                for (key, child) in map {
                    let segment = match key {
                        Value::String(s) => s,
                        Value::Number(n) => n.to_string(),
                        Value::Bool(b) => b.to_string(),
                        _ => continue,
                    };
                    let child_path = if path.is_empty() {
                        segment
                    } else {
                        format!("{path}.{segment}")
                    };
                    pending.push((child_path, child));
                }
            }
            leaf if !path.is_empty() => {
                entries.insert(normalize_key(&path), leaf_value(leaf));
            }
            _ => {}
        }
    }
    Ok(())
}

fn leaf_value(node: Value) -> ConfigValue {
    match node {
        Value::Null => ConfigValue::Null,
        Value::Bool(b) => ConfigValue::Bool(b),
        Value::String(s) => ConfigValue::Text(s),
        Value::Number(n) => match n.as_i64() {
            Some(i) => ConfigValue::Integer(i),
            None => n
                .as_f64()
                .map_or_else(|| ConfigValue::Text(n.to_string()), ConfigValue::Float),
        },
        other => ConfigValue::Text(serde_yaml::to_string(&other).unwrap_or_default().trim().to_owned()),
    }
}
