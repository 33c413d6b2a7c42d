//! Document path syntax and normalization.

/// Check that a document path is well formed.
///
/// A path starts with `/`, contains no whitespace and no empty segment.
/// A single trailing slash is tolerated (it is trimmed during matching).
pub(crate) fn check_syntax(path: &str) -> Result<(), &'static str> {
    if !path.starts_with('/') {
        return Err("path must begin with \"/\"");
    }
    if path.chars().any(char::is_whitespace) {
        return Err("path must not contain whitespace");
    }
    if path.contains("//") {
        return Err("path contains an empty segment");
    }
    Ok(())
}

/// Strip one trailing slash, keeping the root path `/` intact.
pub(crate) fn trim_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// Comparison key: trailing slash trimmed, lower-cased.
///
/// Two paths with the same key are the same document as far as duplicate
/// detection and tolerant registry matching are concerned.
#[must_use]
pub fn normalize(path: &str) -> String {
    trim_trailing_slash(path).to_lowercase()
}
