//! Flat, read-only view of environment variables handed to the binder.

use std::collections::HashMap;
use std::env;

/// Mapping from variable name to value.
///
/// Keys are upper-cased on insertion, so sources may supply mixed case and
/// lookups with the binder's upper-cased names always agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    vars: HashMap<String, String>,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment.
    ///
    /// Entries whose name or value is not valid UTF-8 are skipped.
    pub fn from_process_env() -> Self {
        env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    /// Insert or replace a variable, returning the previous value.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        self.vars.insert(key.as_ref().to_uppercase(), value.into())
    }

    /// Look up a variable by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(&key.to_uppercase()).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(&key.to_uppercase())
    }

    /// Add every variable of `other` that is not already present here.
    pub fn merge_missing(&mut self, other: Snapshot) {
        for (key, value) in other.vars {
            self.vars.entry(key).or_insert(value);
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Snapshot
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        snapshot.extend(iter);
        snapshot
    }
}

impl<K, V> Extend<(K, V)> for Snapshot
where
    K: AsRef<str>,
    V: Into<String>,
{
    /// Later entries overwrite earlier ones.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
