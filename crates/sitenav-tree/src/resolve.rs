//! Sidebar resolution.
//!
//! A single pre-order pass over the authored forest that:
//! - assigns each leaf its sequence index,
//! - checks leaf paths against the [`ContentRegistry`] (tolerating a trailing
//!   slash or case difference, rewriting to the registry's form),
//! - detects duplicate paths by normalized key,
//! - reports empty groups once, at the outermost empty group,
//! - expands fragment includes under an ancestor guard so that cycles are
//!   reported instead of followed,
//! - stops expanding includes once [`MAX_RESOLVED_ENTRIES`] records have been
//!   resolved, so nested includes cannot blow up exponentially.
//!
//! Every problem is collected; nothing aborts the pass. Malformed records and
//! cyclic includes are replaced by an empty group placeholder and their
//! siblings keep resolving.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{ErrorKind, ValidationError};
use crate::node::{Group, Leaf, NavNode};
use crate::path::{check_syntax, normalize, trim_trailing_slash};
use crate::registry::ContentRegistry;
use crate::site::{ResolvedSite, SequenceEntry};
use crate::source::{Shape, SidebarSource, SourceNode};

/// Upper bound on records resolved in one pass before includes are refused.
pub const MAX_RESOLVED_ENTRIES: usize = 100_000;

/// Resolve a typed navigation forest against the registry.
#[must_use]
pub fn resolve(tree: &[NavNode], registry: &ContentRegistry) -> ResolvedSite {
    resolve_source(&SidebarSource::from_forest(tree), registry)
}

/// Resolve an authored sidebar (with fragments) against the registry.
#[must_use]
pub fn resolve_source(source: &SidebarSource, registry: &ContentRegistry) -> ResolvedSite {
    let mut resolver = Resolver {
        fragments: &source.fragments,
        registry,
        sequence: Vec::new(),
        errors: Vec::new(),
        seen: HashMap::new(),
        trail: Vec::new(),
        expanding: Vec::new(),
        reported_cycles: HashSet::new(),
        resolved: 0,
    };

    let resolved = resolver.resolve_list(&source.items);
    resolver.report_empty(&resolved);
    let forest = resolved.into_iter().map(|(node, _)| node).collect();

    tracing::debug!(
        leaves = resolver.sequence.len(),
        errors = resolver.errors.len(),
        "Sidebar resolved"
    );

    ResolvedSite::new(forest, resolver.sequence, resolver.errors)
}

/// What a resolved node contributes to its parent's emptiness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    Content,
    /// Group with no leaves anywhere below it.
    Empty,
    /// Placeholder for a subtree dropped by a fatal error (already reported).
    Truncated,
}

struct Resolver<'a> {
    fragments: &'a BTreeMap<String, Vec<SourceNode>>,
    registry: &'a ContentRegistry,
    sequence: Vec<SequenceEntry>,
    errors: Vec<ValidationError>,
    /// Normalized path -> sequence index of the first leaf using it.
    seen: HashMap<String, usize>,
    trail: Vec<String>,
    /// Fragments currently being expanded, outermost first.
    expanding: Vec<&'a str>,
    /// Member sets (sorted) of cycles already reported.
    reported_cycles: HashSet<Vec<&'a str>>,
    /// Records resolved so far, including those spliced in by includes.
    resolved: usize,
}

impl<'a> Resolver<'a> {
    fn resolve_list(&mut self, nodes: &'a [SourceNode]) -> Vec<(NavNode, Outcome)> {
        let mut resolved = Vec::with_capacity(nodes.len());
        for node in nodes {
            self.resolve_into(node, &mut resolved);
        }
        resolved
    }

    fn resolve_into(&mut self, node: &'a SourceNode, out: &mut Vec<(NavNode, Outcome)>) {
        self.resolved += 1;
        match node.shape() {
            Ok(Shape::Leaf { label, path }) => {
                out.push((self.resolve_leaf(label, path), Outcome::Content));
            }
            Ok(Shape::Group { label, children }) => {
                out.push(self.resolve_group(label, children));
            }
            Ok(Shape::Include(name)) => self.expand(name, out),
            Err(reason) => {
                self.push(ErrorKind::MalformedNode, node.subject(), reason);
                out.push(placeholder(node.label.clone().unwrap_or_default()));
            }
        }
    }

    fn expand(&mut self, name: &'a str, out: &mut Vec<(NavNode, Outcome)>) {
        if let Some(start) = self.expanding.iter().position(|active| *active == name) {
            let mut members = self.expanding[start..].to_vec();
            let mut chain = members.clone();
            chain.push(name);
            members.sort_unstable();
            // The same loop reached from another include site is reported once.
            if self.reported_cycles.insert(members) {
                self.push(
                    ErrorKind::CycleDetected,
                    name,
                    format!("fragment includes itself ({})", chain.join(" -> ")),
                );
            }
            out.push(placeholder(name.to_owned()));
            return;
        }

        let fragments = self.fragments;
        let Some(nodes) = fragments.get(name) else {
            self.push(
                ErrorKind::MalformedNode,
                name,
                format!("unknown fragment `{name}`"),
            );
            out.push(placeholder(name.to_owned()));
            return;
        };

        if self.resolved >= MAX_RESOLVED_ENTRIES {
            self.push(
                ErrorKind::MalformedNode,
                name,
                format!(
                    "include of `{name}` exceeds the limit of {MAX_RESOLVED_ENTRIES} resolved entries"
                ),
            );
            out.push(placeholder(name.to_owned()));
            return;
        }

        self.expanding.push(name);
        for node in nodes {
            self.resolve_into(node, out);
        }
        self.expanding.pop();
    }

    fn resolve_group(&mut self, label: &str, children: &'a [SourceNode]) -> (NavNode, Outcome) {
        if label.trim().is_empty() {
            let location = self.location();
            self.push(ErrorKind::EmptyLabel, location, "group has an empty label");
        }

        self.trail.push(label.to_owned());
        let resolved = self.resolve_list(children);
        self.trail.pop();

        // Vacuously empty when there are no children at all.
        let outcome = if resolved.iter().all(|(_, o)| *o == Outcome::Empty) {
            Outcome::Empty
        } else {
            self.report_empty(&resolved);
            Outcome::Content
        };

        let group = Group {
            label: label.to_owned(),
            children: resolved.into_iter().map(|(node, _)| node).collect(),
        };
        (NavNode::Group(group), outcome)
    }

    fn resolve_leaf(&mut self, label: &str, path: &str) -> NavNode {
        if label.trim().is_empty() {
            self.push(ErrorKind::EmptyLabel, path, "leaf has an empty label");
        }

        let resolved_path = match check_syntax(path) {
            Err(reason) => {
                self.push(ErrorKind::InvalidPath, path, reason);
                path.to_owned()
            }
            Ok(()) => {
                if let Some(canonical) = self.registry.canonical(path) {
                    if canonical != path {
                        tracing::debug!(path, canonical, "Tolerant match for sidebar path");
                    }
                    canonical.to_owned()
                } else {
                    self.push(
                        ErrorKind::DanglingLink,
                        path,
                        "no document exists at this path",
                    );
                    trim_trailing_slash(path).to_owned()
                }
            }
        };

        let index = self.sequence.len();
        if let Some(first) = self.seen.get(&normalize(&resolved_path)) {
            let message = format!("path already used by entry #{first}");
            self.push(ErrorKind::DuplicatePath, resolved_path.clone(), message);
        } else {
            self.seen.insert(normalize(&resolved_path), index);
        }

        let leaf = Leaf {
            label: label.to_owned(),
            path: resolved_path,
        };
        self.sequence.push(SequenceEntry {
            index,
            leaf: leaf.clone(),
            trail: self.trail.clone(),
        });
        NavNode::Leaf(leaf)
    }

    /// Report each empty child of a non-empty parent (or of the forest root).
    fn report_empty(&mut self, resolved: &[(NavNode, Outcome)]) {
        for (node, outcome) in resolved {
            if *outcome == Outcome::Empty {
                self.push(ErrorKind::EmptyGroup, node.label(), "group has no entries");
            }
        }
    }

    fn location(&self) -> String {
        if self.trail.is_empty() {
            "<top level>".to_owned()
        } else {
            self.trail.join(" / ")
        }
    }

    fn push(&mut self, kind: ErrorKind, subject: impl Into<String>, message: impl Into<String>) {
        self.errors
            .push(ValidationError::new(kind, subject, message));
    }
}

fn placeholder(label: String) -> (NavNode, Outcome) {
    (
        NavNode::Group(Group {
            label,
            children: Vec::new(),
        }),
        Outcome::Truncated,
    )
}
