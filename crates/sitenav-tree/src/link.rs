//! Turning document paths into hrefs.

use serde::Serialize;

use crate::path::trim_trailing_slash;

/// How document paths are written as links in the exported site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LinkStyle {
    /// Prefix for every link, empty or starting with `/` (e.g., "/docs").
    pub base_path: String,
    /// Export writes `dir/index.html`, so links end in `/`.
    pub trailing_slash: bool,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            trailing_slash: true,
        }
    }
}

impl LinkStyle {
    /// Link target for a document path.
    #[must_use]
    pub fn href(&self, path: &str) -> String {
        let path = trim_trailing_slash(path);
        let path = if path == "/" { "" } else { path };
        let mut href = format!("{}{path}", self.base_path);
        if href.is_empty() || self.trailing_slash {
            href.push('/');
        }
        href
    }
}
