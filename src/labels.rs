//! Ordered key/value labels attached to every stored document
//!
//! Duplicate keys are allowed. Lookups return the first match, so the
//! order labels were supplied in (or read back from disk in) matters.

use crate::error::{CacheError, CacheResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered sequence of `(key, value)` pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(Vec<(String, String)>);

impl Labels {
    /// Create an empty label set
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a label, keeping any earlier label with the same key
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Value of the first label under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether any label is stored under `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate labels in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that every label can be written to a labelled file.
    ///
    /// Keys must be non-empty and free of whitespace and NUL; values must
    /// fit on one line and contain no NUL.
    pub fn validate(&self) -> CacheResult<()> {
        for (key, value) in &self.0 {
            if key.is_empty() {
                return Err(CacheError::invalid_label(key, "key is empty"));
            }
            if key.chars().any(|c| c.is_whitespace() || c == '\0') {
                return Err(CacheError::invalid_label(
                    key,
                    "key contains whitespace or NUL",
                ));
            }
            if value.contains(['\n', '\r', '\0']) {
                return Err(CacheError::invalid_label(
                    key,
                    "value contains a line break or NUL",
                ));
            }
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Labels {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Labels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// Parse a `KEY=VALUE` label argument
pub fn parse_label(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{}'", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}
