//! Config-file maintenance: report missing keys and fill them with their
//! defaults without touching the values the user already set.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::Value;
use std::fs;

/// Keys the current version expects at the top level of the config file.
const TOP_LEVEL_KEYS: [&str; 2] = ["database", "verifier"];

fn load_raw() -> AppResult<Value> {
    let path = Config::config_file();
    let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
    serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
}

fn missing_keys(raw: &Value) -> Vec<String> {
    let mut missing = Vec::new();

    let Some(map) = raw.as_mapping() else {
        return TOP_LEVEL_KEYS.iter().map(|k| k.to_string()).collect();
    };

    for key in TOP_LEVEL_KEYS {
        let key = Value::String(key.to_string());
        if !map.contains_key(&key) {
            missing.push(key.as_str().unwrap_or_default().to_string());
        }
    }

    // verifier sub-keys: compare against the serialized defaults
    let defaults = serde_yaml::to_value(crate::models::settings::VerifierSettings::default())
        .unwrap_or(Value::Null);
    let verifier_key = Value::String("verifier".to_string());
    if let (Some(defaults), Some(current)) = (
        defaults.as_mapping(),
        map.get(&verifier_key).and_then(Value::as_mapping),
    ) {
        for key in defaults.keys() {
            if !current.contains_key(key)
                && let Some(name) = key.as_str()
            {
                missing.push(format!("verifier.{}", name));
            }
        }
    }

    missing
}

/// `config --check`: report what a migration would add.
pub fn check_config() -> AppResult<()> {
    let raw = load_raw()?;
    let missing = missing_keys(&raw);

    if missing.is_empty() {
        success("Configuration file is up to date.");
    } else {
        info(format!(
            "Configuration file is missing {} key(s):",
            missing.len()
        ));
        for key in missing {
            println!("  - {}", key);
        }
        println!("\nRun 'rbillcheck config --migrate' to add them with default values.");
    }

    Ok(())
}

/// `config --migrate`: re-load through the typed struct (serde fills the
/// gaps with defaults) and write the complete file back.
pub fn migrate_config() -> AppResult<()> {
    let raw = load_raw()?;
    let missing = missing_keys(&raw);

    if missing.is_empty() {
        success("Configuration file is up to date, nothing to migrate.");
        return Ok(());
    }

    let cfg: Config =
        serde_yaml::from_value(raw).map_err(|e| AppError::Config(e.to_string()))?;

    let yaml = serde_yaml::to_string(&cfg).map_err(|_| AppError::ConfigSave)?;
    fs::write(Config::config_file(), yaml).map_err(|_| AppError::ConfigSave)?;

    success(format!(
        "Configuration migrated: added {} missing key(s).",
        missing.len()
    ));
    Ok(())
}
