//! Authored sidebar description.
//!
//! [`SidebarSource`] is the declarative shape loaded from a sidebar file.
//! Records are loose on purpose: any of `label`, `path`, `children` and
//! `include` may be present, and the resolver decides whether a record is a
//! leaf, a group, a fragment include, or malformed.
//!
//! ```yaml
//! items:
//!   - label: Infra
//!     children:
//!       - label: Overview
//!         path: /infra/overview
//!   - include: challenges
//! fragments:
//!   challenges:
//!     - label: Web
//!       path: /challenges/web
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::node::NavNode;

/// Declarative sidebar: top-level entries plus named reusable fragments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarSource {
    /// Top-level entries in authoring order.
    pub items: Vec<SourceNode>,
    /// Named entry lists spliced in by `include`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fragments: BTreeMap<String, Vec<SourceNode>>,
}

/// A single authored record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SourceNode>>,
    /// Name of a fragment to splice in at this position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
}

/// Classified view of a [`SourceNode`].
pub(crate) enum Shape<'a> {
    Leaf {
        label: &'a str,
        path: &'a str,
    },
    Group {
        label: &'a str,
        children: &'a [SourceNode],
    },
    Include(&'a str),
}

impl SidebarSource {
    /// Build a source from an already typed forest. No fragments are used.
    #[must_use]
    pub fn from_forest(forest: &[NavNode]) -> Self {
        Self {
            items: forest.iter().map(SourceNode::from).collect(),
            fragments: BTreeMap::new(),
        }
    }

    /// Whether there is nothing to resolve.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl SourceNode {
    #[must_use]
    pub fn leaf(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            path: Some(path.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn group(label: impl Into<String>, children: Vec<SourceNode>) -> Self {
        Self {
            label: Some(label.into()),
            children: Some(children),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn include(fragment: impl Into<String>) -> Self {
        Self {
            include: Some(fragment.into()),
            ..Self::default()
        }
    }

    /// Classify the record, or explain why it matches no known shape.
    pub(crate) fn shape(&self) -> Result<Shape<'_>, String> {
        let label = self.label.as_deref().unwrap_or_default();
        match (&self.path, &self.children, &self.include) {
            (Some(path), None, None) => Ok(Shape::Leaf { label, path }),
            (None, Some(children), None) => Ok(Shape::Group { label, children }),
            (None, None, Some(_)) if self.label.is_some() => {
                Err("`include` entries cannot carry a label".to_owned())
            }
            (None, None, Some(name)) => Ok(Shape::Include(name)),
            (None, None, None) => Err("entry has neither `path` nor `children`".to_owned()),
            _ => Err(format!(
                "entry mixes {}; expected exactly one of them",
                self.present_fields().join(", ")
            )),
        }
    }

    /// Best human-readable handle for error reporting.
    pub(crate) fn subject(&self) -> String {
        self.label
            .as_deref()
            .filter(|label| !label.trim().is_empty())
            .or(self.path.as_deref())
            .or(self.include.as_deref())
            .unwrap_or("<unnamed entry>")
            .to_owned()
    }

    fn present_fields(&self) -> Vec<&'static str> {
        [
            ("`path`", self.path.is_some()),
            ("`children`", self.children.is_some()),
            ("`include`", self.include.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}

impl From<&NavNode> for SourceNode {
    fn from(node: &NavNode) -> Self {
        match node {
            NavNode::Leaf(leaf) => Self::leaf(&leaf.label, &leaf.path),
            NavNode::Group(group) => Self::group(
                &group.label,
                group.children.iter().map(Self::from).collect(),
            ),
        }
    }
}
