//! Content discovery for sitenav.
//!
//! Walks a documentation source tree and produces the [`ContentRegistry`]
//! that sidebar leaves are checked against.
//!
//! ```no_run
//! use std::path::PathBuf;
//! use sitenav_content::Scanner;
//!
//! let registry = Scanner::with_default_extensions(PathBuf::from("docs")).registry();
//! println!("{} documents", registry.len());
//! ```
//!
//! [`ContentRegistry`]: sitenav_tree::ContentRegistry

mod scanner;

pub use scanner::{DEFAULT_EXTENSIONS, DocumentRef, Scanner};
