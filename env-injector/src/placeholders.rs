use crate::InjectError;
use std::fs;
use std::path::{Path, PathBuf};

/// Literal placeholder text for `name`, e.g. `{{SMTP_EMAIL}}`.
pub fn token(name: &str) -> String {
    format!("{{{{{}}}}}", name)
}

/// Ordered name/value pairs read once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSet {
    entries: Vec<(String, Option<String>)>,
}

impl PlaceholderSet {
    /// Resolve every name against the process environment.
    pub fn from_env<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_lookup(names, |name| std::env::var(name).ok())
    }

    pub fn from_lookup<I, S, F>(names: I, mut lookup: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnMut(&str) -> Option<String>,
    {
        let entries = names
            .into_iter()
            .map(|name| {
                let name = name.into();
                let value = lookup(&name);
                (name, value)
            })
            .collect();

        Self { entries }
    }

    /// `(name, value)` in order; unset names yield `""`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref().unwrap_or("")))
    }

    pub fn unset(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub text: String,
    /// Number of tokens replaced across all names.
    pub replaced: usize,
}

/// Replace every occurrence of each token, one name at a time in set order.
pub fn substitute(text: &str, set: &PlaceholderSet) -> Substitution {
    let mut text = text.to_string();
    let mut replaced = 0;

    for (name, value) in set.iter() {
        let placeholder = token(name);
        let occurrences = text.matches(placeholder.as_str()).count();
        if occurrences > 0 {
            text = text.replace(placeholder.as_str(), value);
            replaced += occurrences;
        }
    }

    Substitution { text, replaced }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectReport {
    pub path: PathBuf,
    pub replaced: usize,
    pub unset: Vec<String>,
}

/// Substitute placeholders in the document at `path` and overwrite it.
///
/// A missing document is reported as [`InjectError::DocumentNotFound`] and
/// nothing is written. A failed write may leave the file partially written.
pub fn inject_placeholders(path: &Path, set: &PlaceholderSet) -> Result<InjectReport, InjectError> {
    if !path.exists() {
        return Err(InjectError::DocumentNotFound(path.to_path_buf()));
    }

    let original = fs::read_to_string(path).map_err(|source| InjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let Substitution { text, replaced } = substitute(&original, set);

    fs::write(path, text).map_err(|source| InjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(InjectReport {
        path: path.to_path_buf(),
        replaced,
        unset: set.unset().into_iter().map(str::to_string).collect(),
    })
}
