//! env-injector: build-time substitution of `{{NAME}}` placeholders.
//!
//! Reads a static document, replaces every `{{NAME}}` token for a fixed list
//! of names with the matching environment value, and writes the result back
//! in place. Unset variables become empty strings.

pub mod config;
pub mod placeholders;

use std::path::PathBuf;
use thiserror::Error;

pub use config::InjectorConfig;
pub use placeholders::{
    inject_placeholders, substitute, token, InjectReport, PlaceholderSet, Substitution,
};

#[derive(Debug, Error)]
pub enum InjectError {
    #[error("{} not found!", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}
