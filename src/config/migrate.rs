use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys every configuration file is expected to carry.
const EXPECTED_KEYS: [&str; 4] = ["database", "default_machines", "default_causes", "placeholder"];

fn default_value_for(key: &str) -> AppResult<Value> {
    let defaults = serde_yaml::to_value(Config::default())
        .map_err(|e| AppError::Config(format!("serialize defaults: {e}")))?;

    defaults
        .get(key)
        .cloned()
        .ok_or_else(|| AppError::Config(format!("no default for '{key}'")))
}

/// List the expected keys missing from the YAML mapping.
pub fn missing_fields(map: &Mapping) -> Vec<&'static str> {
    EXPECTED_KEYS
        .iter()
        .filter(|k| !map.contains_key(**k))
        .copied()
        .collect()
}

/// Read the configuration file, add every missing key with its default
/// value and write it back. Returns the keys that were added.
pub fn fill_missing_fields(conf_file: &Path) -> AppResult<Vec<&'static str>> {
    if !conf_file.exists() {
        info(format!("No configuration file at {}", conf_file.display()));
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(conf_file).map_err(|_| AppError::ConfigLoad)?;
    let mut yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("{}: {}", conf_file.display(), e)))?;

    let map = yaml
        .as_mapping_mut()
        .ok_or_else(|| AppError::Config("configuration root is not a mapping".into()))?;

    let missing = missing_fields(map);
    if missing.is_empty() {
        return Ok(missing);
    }

    for key in &missing {
        map.insert(Value::String(key.to_string()), default_value_for(key)?);
    }

    let serialized = serde_yaml::to_string(&yaml).map_err(|_| AppError::ConfigSave)?;
    fs::write(conf_file, serialized).map_err(|_| AppError::ConfigSave)?;

    success(format!(
        "Configuration updated, added: {}",
        missing.join(", ")
    ));
    Ok(missing)
}
