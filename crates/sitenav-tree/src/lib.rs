//! Sidebar navigation trees and link-checked site maps.
//!
//! This crate provides:
//! - [`NavNode`]: the sidebar tree model (leaves and groups)
//! - [`SidebarSource`]: the authored, declarative sidebar with reusable fragments
//! - [`ContentRegistry`]: the set of document paths that actually exist
//! - [`resolve`] / [`resolve_source`]: validation into a [`ResolvedSite`]
//!
//! Resolution never fails: it always returns a [`ResolvedSite`] together with
//! every [`ValidationError`] found, and the caller decides via [`Policy`]
//! whether those errors block publishing.
//!
//! # Quick Start
//!
//! ```
//! use sitenav_tree::{ContentRegistry, NavNode, resolve};
//!
//! let tree = vec![NavNode::group(
//!     "Infra",
//!     vec![
//!         NavNode::leaf("Overview", "/infra/overview"),
//!         NavNode::leaf("Setup", "/infra/setup"),
//!     ],
//! )];
//! let registry: ContentRegistry = ["/infra/overview"].into_iter().collect();
//!
//! let site = resolve(&tree, &registry);
//!
//! assert_eq!(site.sequence().len(), 2);
//! assert_eq!(site.errors().len(), 1); // "/infra/setup" is dangling
//! assert_eq!(
//!     site.next("/infra/overview").map(|e| e.leaf.path.as_str()),
//!     Some("/infra/setup")
//! );
//! ```

mod alias;
mod error;
mod link;
mod node;
mod path;
mod registry;
mod resolve;
mod site;
mod source;

pub use alias::AliasTable;
pub use error::{ErrorKind, ValidationError};
pub use link::LinkStyle;
pub use node::{Group, Leaf, NavNode};
pub use path::normalize;
pub use registry::ContentRegistry;
pub use resolve::{MAX_RESOLVED_ENTRIES, resolve, resolve_source};
pub use site::{Neighbors, Policy, ResolvedSite, SequenceEntry};
pub use source::{SidebarSource, SourceNode};
