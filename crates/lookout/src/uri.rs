//! Pure string helpers for URI and extension matching.
//!
//! These are the only string utilities the resolution pipeline needs:
//! an exact suffix check for extension matching and a basename-style
//! filename extraction. Both are stateless and never touch the filesystem.

/// Checks whether `uri` ends with `extension`.
///
/// Lengths are measured in Unicode scalar values, not bytes, and the
/// comparison is exact and case-sensitive. An extension longer than the
/// URI never matches; the empty extension always does.
///
/// # Example
///
/// ```rust
/// use lookout::uri::has_extension;
///
/// assert!(has_extension("views/home.jinja", ".jinja"));
/// assert!(has_extension("views/home.jinja", "jinja"));
/// assert!(!has_extension("views/home.jinja", ".html"));
/// assert!(!has_extension("a", "long-extension"));
/// assert!(has_extension("anything", ""));
/// ```
pub fn has_extension(uri: &str, extension: &str) -> bool {
    let uri_len = uri.chars().count();
    let extension_len = extension.chars().count();
    if extension_len > uri_len {
        return false;
    }

    uri.ends_with(extension)
}

/// Returns the final path segment of `uri`.
///
/// Standard basename semantics: directory components are stripped, a
/// trailing separator yields the segment before it, and a bare separator
/// (or empty input) yields the empty string.
///
/// # Example
///
/// ```rust
/// use lookout::uri::filename;
///
/// assert_eq!(filename("a/b/c.tpl"), "c.tpl");
/// assert_eq!(filename("c.tpl"), "c.tpl");
/// assert_eq!(filename("a/b/"), "b");
/// assert_eq!(filename("/"), "");
/// ```
pub fn filename(uri: &str) -> &str {
    let trimmed = uri.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or("")
}
