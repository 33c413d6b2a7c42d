//! Redirect aliases for moved documents.
//!
//! Sidebars get restructured between builds (for example `/challenge/...`
//! becoming `/challenges/...`). An [`AliasTable`] keeps old links alive by
//! mapping an old path to the document that replaced it. A renderer emits a
//! redirect stub for each alias.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, ValidationError};
use crate::path::check_syntax;
use crate::registry::ContentRegistry;
use crate::site::ResolvedSite;

/// Old path -> replacement path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable(BTreeMap<String, String>);

impl AliasTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.0.insert(from.into(), to.into());
    }

    /// Replacement for an old path, if one is registered. One hop only.
    #[must_use]
    pub fn target(&self, from: &str) -> Option<&str> {
        self.0.get(from).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(from, to)| (from.as_str(), to.as_str()))
    }

    /// Check every alias against the resolved sidebar and the registry.
    ///
    /// - malformed source or target paths are `InvalidPath`,
    /// - a target with no document is a `DanglingLink`,
    /// - a source that is still a live document or sidebar entry is a
    ///   `DuplicatePath` (the redirect would shadow it).
    #[must_use]
    pub fn check(&self, site: &ResolvedSite, registry: &ContentRegistry) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (from, to) in self.iter() {
            if let Err(reason) = check_syntax(from) {
                errors.push(ValidationError::new(ErrorKind::InvalidPath, from, reason));
                continue;
            }
            if registry.canonical(from).is_some() || site.position(from).is_some() {
                errors.push(ValidationError::new(
                    ErrorKind::DuplicatePath,
                    from,
                    format!("alias shadows an existing document (redirects to {to})"),
                ));
            }
            match check_syntax(to) {
                Err(reason) => {
                    errors.push(ValidationError::new(ErrorKind::InvalidPath, to, reason));
                }
                Ok(()) if registry.canonical(to).is_none() => {
                    errors.push(ValidationError::new(
                        ErrorKind::DanglingLink,
                        to,
                        format!("alias {from} points to a missing document"),
                    ));
                }
                Ok(()) => {}
            }
        }

        tracing::debug!(aliases = self.len(), errors = errors.len(), "Aliases checked");
        errors
    }
}

impl<F: Into<String>, T: Into<String>> FromIterator<(F, T)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (F, T)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NavNode;
    use crate::resolve::resolve;

    fn setup() -> (ResolvedSite, ContentRegistry) {
        let registry: ContentRegistry = ["/challenges/web", "/about"].into_iter().collect();
        let site = resolve(
            &[
                NavNode::leaf("Web", "/challenges/web"),
                NavNode::leaf("About", "/about"),
            ],
            &registry,
        );
        (site, registry)
    }

    #[test]
    fn test_valid_alias_has_no_errors() {
        let (site, registry) = setup();
        let aliases: AliasTable = [("/challenge/web", "/challenges/web")].into_iter().collect();

        assert!(aliases.check(&site, &registry).is_empty());
        assert_eq!(aliases.target("/challenge/web"), Some("/challenges/web"));
        assert_eq!(aliases.target("/challenges/web"), None);
    }

    #[test]
    fn test_alias_to_missing_document() {
        let (site, registry) = setup();
        let aliases: AliasTable = [("/challenge/pwn", "/challenges/pwn")].into_iter().collect();

        let errors = aliases.check(&site, &registry);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::DanglingLink);
        assert_eq!(errors[0].subject, "/challenges/pwn");
    }

    #[test]
    fn test_alias_shadowing_live_document() {
        let (site, registry) = setup();
        let aliases: AliasTable = [("/About/", "/challenges/web")].into_iter().collect();

        let errors = aliases.check(&site, &registry);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::DuplicatePath);
    }

    #[test]
    fn test_malformed_alias_paths() {
        let (site, registry) = setup();
        let aliases: AliasTable = [("old page", "/about"), ("/old", "about")]
            .into_iter()
            .collect();

        let errors = aliases.check(&site, &registry);

        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ErrorKind::InvalidPath, ErrorKind::InvalidPath]);
    }

    #[test]
    fn test_deserialize_from_map() {
        let aliases: AliasTable =
            serde_json::from_str(r#"{"/challenge/web": "/challenges/web"}"#).unwrap();

        assert_eq!(aliases.len(), 1);
        assert_eq!(aliases.target("/challenge/web"), Some("/challenges/web"));
    }
}
