//! Navigation node model.
//!
//! A sidebar is a forest of [`NavNode`]s. Leaves point at documents, groups
//! only carry a label and an ordered list of children. Child order is the
//! display order and the previous/next order, so nothing here ever sorts.

use serde::{Deserialize, Serialize};

/// Navigation entry pointing directly to one document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    /// Display label.
    pub label: String,
    /// Document path with leading slash (e.g., "/infra/overview").
    pub path: String,
}

/// Named collection of navigation entries with no document of its own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Display label.
    pub label: String,
    /// Child entries in authoring order.
    pub children: Vec<NavNode>,
}

/// Sidebar tree node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NavNode {
    Leaf(Leaf),
    Group(Group),
}

impl NavNode {
    /// Create a leaf node.
    #[must_use]
    pub fn leaf(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Leaf(Leaf {
            label: label.into(),
            path: path.into(),
        })
    }

    /// Create a group node.
    #[must_use]
    pub fn group(label: impl Into<String>, children: Vec<NavNode>) -> Self {
        Self::Group(Group {
            label: label.into(),
            children,
        })
    }

    /// Display label of the node.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Leaf(leaf) => &leaf.label,
            Self::Group(group) => &group.label,
        }
    }

    /// Leaf payload, if this is a leaf.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Group(_) => None,
        }
    }

    /// Children of a group; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[NavNode] {
        match self {
            Self::Leaf(_) => &[],
            Self::Group(group) => &group.children,
        }
    }

    /// Number of leaves in this subtree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Group(group) => group.children.iter().map(Self::leaf_count).sum(),
        }
    }
}
