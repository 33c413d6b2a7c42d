//! Validation problems found while resolving a sidebar.

use std::fmt;

use serde::Serialize;

/// Category of a validation problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Leaf path has no document in the registry.
    DanglingLink,
    /// Leaf path (after normalization) already used by an earlier leaf.
    DuplicatePath,
    /// Group without entries, reported at the outermost empty group.
    EmptyGroup,
    /// Leaf or group label is blank.
    EmptyLabel,
    /// Leaf path is syntactically invalid.
    InvalidPath,
    /// Record is neither a leaf nor a group, or includes an unknown fragment.
    MalformedNode,
    /// Fragment include chain revisits a fragment already being expanded.
    CycleDetected,
}

impl ErrorKind {
    /// Whether the problem truncated a subtree during resolution.
    #[must_use]
    pub fn is_fatal(self) -> bool {
        matches!(self, Self::MalformedNode | Self::CycleDetected)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DanglingLink => "dangling link",
            Self::DuplicatePath => "duplicate path",
            Self::EmptyGroup => "empty group",
            Self::EmptyLabel => "empty label",
            Self::InvalidPath => "invalid path",
            Self::MalformedNode => "malformed node",
            Self::CycleDetected => "cycle detected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation problem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{kind}: {subject}: {message}")]
pub struct ValidationError {
    pub kind: ErrorKind,
    /// Offending path, or label for group-level problems.
    pub subject: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(kind: ErrorKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_kinds() {
        assert!(ErrorKind::MalformedNode.is_fatal());
        assert!(ErrorKind::CycleDetected.is_fatal());
        assert!(!ErrorKind::DanglingLink.is_fatal());
        assert!(!ErrorKind::DuplicatePath.is_fatal());
        assert!(!ErrorKind::EmptyGroup.is_fatal());
    }

    #[test]
    fn test_display() {
        let err = ValidationError::new(
            ErrorKind::DanglingLink,
            "/infra/setup",
            "no document at this path",
        );
        assert_eq!(
            err.to_string(),
            "dangling link: /infra/setup: no document at this path"
        );
    }

    #[test]
    fn test_serialization() {
        let err = ValidationError::new(ErrorKind::EmptyGroup, "Empty", "group has no entries");

        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["kind"], "empty_group");
        assert_eq!(json["subject"], "Empty");
    }
}
