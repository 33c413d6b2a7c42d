//! Set of document paths known to exist.

use std::collections::{BTreeSet, HashMap};

use crate::path::normalize;

/// Registry of existing document paths.
///
/// Filled by content discovery and read-only during resolution. Besides the
/// exact path set it keeps a normalized index so that `/Infra/Setup/` can be
/// matched to the canonical `/infra/setup`.
#[derive(Clone, Debug, Default)]
pub struct ContentRegistry {
    paths: BTreeSet<String>,
    by_key: HashMap<String, String>,
}

impl ContentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document path. Returns `false` if it was already present.
    ///
    /// When two registered paths share a normalized key, tolerant lookups
    /// resolve to the first one registered.
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.paths.contains(&path) {
            return false;
        }
        let key = normalize(&path);
        if let Some(existing) = self.by_key.get(&key) {
            tracing::debug!(
                path = %path,
                existing = %existing,
                "Document paths differ only by case or trailing slash"
            );
        } else {
            self.by_key.insert(key, path.clone());
        }
        self.paths.insert(path)
    }

    /// Exact membership test.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Canonical registered form of `path`.
    ///
    /// Returns the exact entry if present, otherwise the entry that differs
    /// only by trailing slash or letter case.
    #[must_use]
    pub fn canonical(&self, path: &str) -> Option<&str> {
        if let Some(exact) = self.paths.get(path) {
            return Some(exact.as_str());
        }
        self.by_key.get(&normalize(path)).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Registered paths in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ContentRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

impl<S: Into<String>> Extend<S> for ContentRegistry {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for path in iter {
            self.insert(path);
        }
    }
}
