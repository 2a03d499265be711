use crate::InjectError;
use config::{Config, Environment};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_DOCUMENT_PATH: &str = "web/index.html";

pub const DEFAULT_NAMES: [&str; 5] = [
    "SUPABASE_URL",
    "SUPABASE_ANON_KEY",
    "SUPABASE_SERVICE_KEY",
    "SMTP_EMAIL",
    "SMTP_PASSWORD",
];

/// Target document and placeholder names.
///
/// Overridable through `INJECT_DOCUMENT_PATH` and `INJECT_NAMES`
/// (comma separated).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InjectorConfig {
    #[serde(default = "default_document_path")]
    pub document_path: PathBuf,
    #[serde(default = "default_names")]
    pub names: Vec<String>,
}

fn default_document_path() -> PathBuf {
    PathBuf::from(DEFAULT_DOCUMENT_PATH)
}

fn default_names() -> Vec<String> {
    DEFAULT_NAMES.iter().map(|name| name.to_string()).collect()
}

impl Default for InjectorConfig {
    fn default() -> Self {
        Self {
            document_path: default_document_path(),
            names: default_names(),
        }
    }
}

impl InjectorConfig {
    pub fn load() -> Result<Self, InjectError> {
        Self::from_environment(Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix("INJECT")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("names")
    }

    fn from_environment(source: Environment) -> Result<Self, InjectError> {
        let mut config: InjectorConfig = Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        config.names = config
            .names
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_from(vars: &[(&str, &str)]) -> InjectorConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        InjectorConfig::from_environment(InjectorConfig::environment().source(Some(map)))
            .expect("config loads")
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(load_from(&[]), InjectorConfig::default());
    }

    #[test]
    fn default_names_are_the_five_deployment_variables() {
        let config = InjectorConfig::default();
        assert_eq!(config.names.len(), 5);
        assert_eq!(config.names[0], "SUPABASE_URL");
        assert_eq!(config.document_path, PathBuf::from("web/index.html"));
    }

    #[test]
    fn overrides_path_and_names() {
        let config = load_from(&[
            ("INJECT_DOCUMENT_PATH", "dist/app.html"),
            ("INJECT_NAMES", "API_URL, API_KEY,"),
        ]);

        assert_eq!(config.document_path, PathBuf::from("dist/app.html"));
        assert_eq!(config.names, vec!["API_URL", "API_KEY"]);
    }
}
