//! Document discovery by filesystem walking.
//!
//! The Scanner only identifies files that are documents and the URL path each
//! one is published at. Content is never read.

use std::fs;
use std::path::{Path, PathBuf};

use sitenav_tree::ContentRegistry;

/// Default document extensions (Markdown and MDX pages).
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Reference to a discovered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// URL path with leading slash (e.g., "/", "/infra", "/infra/setup").
    pub url_path: String,
    /// Path to the source file.
    pub source_path: PathBuf,
}

/// Discovers documents by walking the docs source directory.
///
/// - files with a configured extension are documents,
/// - `index.<ext>` is published at its directory's path,
/// - hidden files and directories are skipped.
pub struct Scanner {
    source_dir: PathBuf,
    extensions: Vec<String>,
}

impl Scanner {
    /// Create a new Scanner.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Root directory to scan
    /// * `extensions` - Document file extensions without the dot (e.g., "md")
    pub fn new(source_dir: PathBuf, extensions: Vec<String>) -> Self {
        Self {
            source_dir,
            extensions,
        }
    }

    /// Scanner for Markdown and MDX documents.
    pub fn with_default_extensions(source_dir: PathBuf) -> Self {
        Self::new(
            source_dir,
            DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_owned()).collect(),
        )
    }

    /// Scan the filesystem and return document references sorted by URL path.
    ///
    /// Returns an empty Vec if the source directory doesn't exist.
    pub fn scan(&self) -> Vec<DocumentRef> {
        let mut refs = Vec::new();
        if self.source_dir.exists() {
            self.scan_directory(&self.source_dir, "", &mut refs);
        } else {
            tracing::debug!(dir = %self.source_dir.display(), "Source directory missing");
        }
        refs.sort_by(|a, b| a.url_path.cmp(&b.url_path));
        tracing::debug!(document_count = refs.len(), "Content scan completed");
        refs
    }

    /// Scan and collect the URL paths into a registry.
    pub fn registry(&self) -> ContentRegistry {
        self.scan().into_iter().map(|doc| doc.url_path).collect()
    }

    fn scan_directory(&self, dir_path: &Path, url_prefix: &str, refs: &mut Vec<DocumentRef>) {
        let entries = match fs::read_dir(dir_path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir_path.display(), error = %e, "Failed to read directory");
                return;
            }
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            // Skip hidden files/dirs
            if name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());

            if is_dir {
                self.scan_directory(&path, &format!("{url_prefix}/{name}"), refs);
            } else if let Some(stem) = self.document_stem(&path) {
                refs.push(DocumentRef {
                    url_path: stem_to_url(&stem, url_prefix),
                    source_path: path,
                });
            }
        }
    }

    /// File stem if the file has one of the configured extensions.
    fn document_stem(&self, path: &Path) -> Option<String> {
        let ext = path.extension()?.to_string_lossy();
        if !self.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
            return None;
        }
        path.file_stem().map(|s| s.to_string_lossy().into_owned())
    }
}

/// Convert a file stem in directory `url_prefix` to its URL path.
///
/// Examples:
/// - `index`, prefix `""` -> `"/"`
/// - `about`, prefix `""` -> `"/about"`
/// - `index`, prefix `"/infra"` -> `"/infra"`
/// - `setup`, prefix `"/infra"` -> `"/infra/setup"`
pub(crate) fn stem_to_url(stem: &str, url_prefix: &str) -> String {
    match (stem == "index", url_prefix.is_empty()) {
        (true, true) => "/".to_owned(),
        (true, false) => url_prefix.to_owned(),
        (false, _) => format!("{url_prefix}/{stem}"),
    }
}
