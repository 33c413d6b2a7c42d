//! Resolved, render-ready site map.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::ValidationError;
use crate::node::{Leaf, NavNode};
use crate::path::normalize;

/// One leaf in sequential (previous/next) order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SequenceEntry {
    /// 0-based pre-order position.
    pub index: usize,
    #[serde(flatten)]
    pub leaf: Leaf,
    /// Labels of the enclosing groups, outermost first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trail: Vec<String>,
}

/// Previous and next entries around a leaf.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neighbors<'a> {
    pub previous: Option<&'a SequenceEntry>,
    pub next: Option<&'a SequenceEntry>,
}

/// How the build treats validation errors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Policy {
    /// Any validation error fails the build.
    #[default]
    Strict,
    /// Validation errors are reported as warnings.
    Lenient,
}

/// Validated navigation forest with its flat sequence and collected errors.
///
/// Always produced, even when errors were found; duplicates and dangling
/// leaves stay in place so the renderer sees what was authored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedSite {
    forest: Vec<NavNode>,
    sequence: Vec<SequenceEntry>,
    errors: Vec<ValidationError>,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl ResolvedSite {
    pub(crate) fn new(
        forest: Vec<NavNode>,
        sequence: Vec<SequenceEntry>,
        errors: Vec<ValidationError>,
    ) -> Self {
        let mut positions = HashMap::with_capacity(sequence.len());
        for entry in &sequence {
            positions
                .entry(normalize(&entry.leaf.path))
                .or_insert(entry.index);
        }

        Self {
            forest,
            sequence,
            errors,
            positions,
        }
    }

    /// Top-level nodes in authoring order.
    #[must_use]
    pub fn forest(&self) -> &[NavNode] {
        &self.forest
    }

    /// All leaves in pre-order.
    #[must_use]
    pub fn sequence(&self) -> &[SequenceEntry] {
        &self.sequence
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// True when no validation error was recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Append problems found by later checks (e.g., the alias table).
    pub fn extend_errors(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        self.errors.extend(errors);
    }

    /// Whether the build may publish under `policy`.
    #[must_use]
    pub fn passes(&self, policy: Policy) -> bool {
        match policy {
            Policy::Strict => self.is_clean(),
            Policy::Lenient => true,
        }
    }

    /// Sequence index of the first leaf pointing at `path`.
    ///
    /// Lookup is normalized, so `/About/` finds `/about`.
    #[must_use]
    pub fn position(&self, path: &str) -> Option<usize> {
        self.positions.get(&normalize(path)).copied()
    }

    /// Sequence entry for `path`.
    #[must_use]
    pub fn entry(&self, path: &str) -> Option<&SequenceEntry> {
        self.position(path).and_then(|i| self.sequence.get(i))
    }

    #[must_use]
    pub fn previous(&self, path: &str) -> Option<&SequenceEntry> {
        self.neighbors(path).previous
    }

    #[must_use]
    pub fn next(&self, path: &str) -> Option<&SequenceEntry> {
        self.neighbors(path).next
    }

    /// Previous/next links for the document at `path`.
    ///
    /// Unknown paths have no neighbors.
    #[must_use]
    pub fn neighbors(&self, path: &str) -> Neighbors<'_> {
        self.position(path)
            .map_or_else(Neighbors::default, |index| self.neighbors_at(index))
    }

    /// Previous/next links for the sequence entry at `index`.
    ///
    /// Unlike [`ResolvedSite::neighbors`], this addresses one occurrence, so
    /// a duplicated path gets the links of its own position.
    #[must_use]
    pub fn neighbors_at(&self, index: usize) -> Neighbors<'_> {
        if index >= self.sequence.len() {
            return Neighbors::default();
        }
        Neighbors {
            previous: index.checked_sub(1).and_then(|i| self.sequence.get(i)),
            next: self.sequence.get(index + 1),
        }
    }

    /// Labels of the groups enclosing the leaf at `path`, outermost first.
    #[must_use]
    pub fn breadcrumbs(&self, path: &str) -> Option<&[String]> {
        self.entry(path).map(|entry| entry.trail.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn entry(index: usize, label: &str, path: &str, trail: &[&str]) -> SequenceEntry {
        SequenceEntry {
            index,
            leaf: Leaf {
                label: label.to_owned(),
                path: path.to_owned(),
            },
            trail: trail.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    fn sample() -> ResolvedSite {
        ResolvedSite::new(
            Vec::new(),
            vec![
                entry(0, "Home", "/", &[]),
                entry(1, "Overview", "/infra/overview", &["Infra"]),
                entry(2, "Setup", "/infra/setup", &["Infra"]),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn test_position_is_normalized() {
        let site = sample();

        assert_eq!(site.position("/infra/overview"), Some(1));
        assert_eq!(site.position("/Infra/Overview/"), Some(1));
        assert_eq!(site.position("/missing"), None);
    }

    #[test]
    fn test_neighbors_middle() {
        let site = sample();

        let neighbors = site.neighbors("/infra/overview");

        assert_eq!(neighbors.previous.map(|e| e.leaf.path.as_str()), Some("/"));
        assert_eq!(
            neighbors.next.map(|e| e.leaf.path.as_str()),
            Some("/infra/setup")
        );
    }

    #[test]
    fn test_neighbors_at_edges() {
        let site = sample();

        assert!(site.previous("/").is_none());
        assert!(site.next("/infra/setup").is_none());
        assert_eq!(site.neighbors("/missing"), Neighbors::default());
    }

    #[test]
    fn test_breadcrumbs() {
        let site = sample();

        assert_eq!(
            site.breadcrumbs("/infra/setup"),
            Some(&["Infra".to_owned()][..])
        );
        assert_eq!(site.breadcrumbs("/").map(<[String]>::len), Some(0));
        assert_eq!(site.breadcrumbs("/missing"), None);
    }

    #[test]
    fn test_position_uses_first_occurrence_for_duplicates() {
        let site = ResolvedSite::new(
            Vec::new(),
            vec![entry(0, "About", "/about", &[]), entry(1, "About again", "/about", &[])],
            Vec::new(),
        );

        assert_eq!(site.position("/about"), Some(0));
    }

    #[test]
    fn test_neighbors_at_follows_each_duplicate_occurrence() {
        let site = ResolvedSite::new(
            Vec::new(),
            vec![
                entry(0, "About", "/about", &[]),
                entry(1, "Rules", "/rules", &[]),
                entry(2, "About again", "/about", &[]),
                entry(3, "End", "/end", &[]),
            ],
            Vec::new(),
        );

        let second = site.neighbors_at(2);

        assert_eq!(second.previous.map(|e| e.leaf.path.as_str()), Some("/rules"));
        assert_eq!(second.next.map(|e| e.leaf.path.as_str()), Some("/end"));
        assert_eq!(site.neighbors("/about"), site.neighbors_at(0));
        assert_eq!(site.neighbors_at(4), Neighbors::default());
    }

    #[test]
    fn test_policy() {
        let mut site = sample();
        assert!(site.passes(Policy::Strict));

        site.extend_errors([ValidationError::new(
            ErrorKind::DanglingLink,
            "/gone",
            "no document",
        )]);

        assert!(!site.is_clean());
        assert!(!site.passes(Policy::Strict));
        assert!(site.passes(Policy::Lenient));
    }

    #[test]
    fn test_serialization_skips_positions() {
        let json = serde_json::to_value(sample()).unwrap();

        assert!(json.get("positions").is_none());
        assert_eq!(json["sequence"][1]["path"], "/infra/overview");
        assert_eq!(json["sequence"][1]["trail"][0], "Infra");
        assert!(json["sequence"][0].get("trail").is_none());
    }
}
