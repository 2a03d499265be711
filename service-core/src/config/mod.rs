use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    3000
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Variable source for the helpers below. Binaries pass [`process_env`];
/// tests pass a closure over a fixed map.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

pub fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Read a variable, falling back to `default` when unset.
///
/// A missing variable with no default is a configuration error.
pub fn get_env(lookup: Lookup, key: &str, default: Option<&str>) -> Result<String, AppError> {
    match lookup(key) {
        Some(val) => Ok(val),
        None => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}

/// Read a variable that must be present and non-empty.
pub fn require_env(lookup: Lookup, key: &str) -> Result<String, AppError> {
    match lookup(key) {
        Some(val) if !val.trim().is_empty() => Ok(val),
        _ => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required but not set",
            key
        ))),
    }
}

/// Parse a boolean flag such as `SMTP_ENABLED`.
pub fn get_flag(lookup: Lookup, key: &str, default: bool) -> Result<bool, AppError> {
    match lookup(key) {
        Some(val) => parse_flag(key, &val),
        None => Ok(default),
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} must be a boolean, got '{}'",
            key,
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert!(parse_flag("X", "true").unwrap());
        assert!(parse_flag("X", " YES ").unwrap());
        assert!(!parse_flag("X", "0").unwrap());
        assert!(!parse_flag("X", "off").unwrap());
    }

    #[test]
    fn parse_flag_rejects_garbage() {
        let err = parse_flag("SMTP_ENABLED", "maybe").unwrap_err();
        assert!(err.to_string().contains("SMTP_ENABLED"));
    }

    fn empty(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn get_env_uses_default_when_unset() {
        let value = get_env(&empty, "PORT", Some("fallback")).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn get_env_prefers_set_value() {
        let lookup = |key: &str| (key == "PORT").then(|| "25".to_string());
        assert_eq!(get_env(&lookup, "PORT", Some("587")).unwrap(), "25");
    }

    #[test]
    fn require_env_fails_when_unset_or_blank() {
        assert!(matches!(
            require_env(&empty, "SMTP_USER"),
            Err(AppError::ConfigError(_))
        ));

        let blank = |_: &str| Some("  ".to_string());
        assert!(require_env(&blank, "SMTP_USER").is_err());
    }

    #[test]
    fn get_flag_defaults_when_unset() {
        assert!(get_flag(&empty, "SMTP_ENABLED", true).unwrap());
        assert!(!get_flag(&empty, "SMTP_ENABLED", false).unwrap());
    }
}
