//! Search locations for view templates.
//!
//! A [`Location`] is one candidate template root plus the extensions it
//! accepts. The resolution pipeline never mutates a location; it only asks it
//! for a URI matching some criteria and compares it against others.
//!
//! Two locations are the same location when both their path and their
//! extensions match, regardless of how (or how many times) they were
//! constructed. That structural equality drives deduplication in
//! [`Locations`]: scanning the same physical root twice with different
//! priorities would make scan order ambiguous.

mod locations;

pub use locations::Locations;

use std::path::{Path, PathBuf};

use log::debug;

use crate::uri;

/// A candidate template root.
///
/// Implementations own whatever matching logic applies to their storage;
/// the shipped [`FilesystemLocation`] probes the filesystem, but a location
/// could equally resolve against an archive or an in-memory table.
pub trait Location {
    /// Returns a URI matching the given criteria, or `None`.
    ///
    /// `None` is the expected no-match outcome, not an error.
    fn get_uri(&self, criteria: &[&str]) -> Option<String>;

    /// The root path of this location. Part of the equality contract, and
    /// must be non-empty for the location to be valid.
    fn path(&self) -> &Path;

    /// The extensions this location accepts, in match priority order.
    /// Part of the equality contract.
    fn extensions(&self) -> &[String];
}

/// Structural equality over the Location contract: same path, same
/// extensions in the same order.
pub fn same_location(a: &dyn Location, b: &dyn Location) -> bool {
    a.path() == b.path() && a.extensions() == b.extensions()
}

/// A template root on the local filesystem.
///
/// `get_uri` tries, for each criterion in order and each extension in order,
/// the candidate `root/criterion + extension`, and returns the first
/// candidate that exists as a regular file. A criterion that already carries
/// the extension is probed as-is rather than double-suffixed, and an empty
/// extension list probes the bare criterion.
///
/// # Example
///
/// ```rust,no_run
/// use lookout::{FilesystemLocation, Location};
///
/// let location = FilesystemLocation::new("templates", [".jinja", ".txt"]);
/// if let Some(uri) = location.get_uri(&["home"]) {
///     println!("found {uri}");
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilesystemLocation {
    path: PathBuf,
    extensions: Vec<String>,
}

impl FilesystemLocation {
    /// Creates a location for `path` accepting the given extensions.
    ///
    /// Extensions include their leading dot (`".jinja"`), matching the
    /// convention of extension priority lists elsewhere in the crate.
    pub fn new<P, I, S>(path: P, extensions: I) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    fn candidate(&self, criterion: &str, extension: &str) -> PathBuf {
        if uri::has_extension(criterion, extension) {
            self.path.join(criterion)
        } else {
            self.path.join(format!("{criterion}{extension}"))
        }
    }
}

impl Location for FilesystemLocation {
    fn get_uri(&self, criteria: &[&str]) -> Option<String> {
        for &criterion in criteria {
            if self.extensions.is_empty() {
                let candidate = self.path.join(criterion);
                if candidate.is_file() {
                    return Some(candidate.to_string_lossy().into_owned());
                }
                continue;
            }

            for extension in &self.extensions {
                let candidate = self.candidate(criterion, extension);
                if candidate.is_file() {
                    debug!(
                        "resolved \"{}\" to {}",
                        criterion,
                        candidate.display()
                    );
                    return Some(candidate.to_string_lossy().into_owned());
                }
            }
        }

        None
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn finds_first_extension_hit() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("home.txt"), "text").unwrap();
        fs::write(dir.path().join("home.jinja"), "jinja").unwrap();

        let location = FilesystemLocation::new(dir.path(), [".jinja", ".txt"]);
        let uri = location.get_uri(&["home"]).unwrap();

        assert!(uri.ends_with("home.jinja"));
    }

    #[test]
    fn criterion_with_extension_not_double_suffixed() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("home.jinja"), "jinja").unwrap();

        let location = FilesystemLocation::new(dir.path(), [".jinja"]);
        let uri = location.get_uri(&["home.jinja"]).unwrap();

        assert!(uri.ends_with("home.jinja"));
        assert!(!uri.ends_with("home.jinja.jinja"));
    }

    #[test]
    fn empty_extension_list_probes_bare_criterion() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("raw-file"), "content").unwrap();

        let extensions: [&str; 0] = [];
        let location = FilesystemLocation::new(dir.path(), extensions);

        assert!(location.get_uri(&["raw-file"]).is_some());
        assert!(location.get_uri(&["missing"]).is_none());
    }

    #[test]
    fn miss_returns_none() {
        let dir = tempdir().unwrap();
        let location = FilesystemLocation::new(dir.path(), [".jinja"]);

        assert_eq!(location.get_uri(&["nothing-here"]), None);
    }

    #[test]
    fn later_criteria_tried_after_earlier_miss() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("fallback.jinja"), "x").unwrap();

        let location = FilesystemLocation::new(dir.path(), [".jinja"]);
        let uri = location.get_uri(&["preferred", "fallback"]).unwrap();

        assert!(uri.ends_with("fallback.jinja"));
    }

    #[test]
    fn structural_equality() {
        let a = FilesystemLocation::new("views", [".jinja"]);
        let b = FilesystemLocation::new("views", [".jinja"]);
        let c = FilesystemLocation::new("views", [".txt"]);
        let d = FilesystemLocation::new("other", [".jinja"]);

        assert!(same_location(&a, &b));
        assert!(!same_location(&a, &c));
        assert!(!same_location(&a, &d));
    }

    #[test]
    fn extension_order_is_significant_for_equality() {
        let a = FilesystemLocation::new("views", [".jinja", ".txt"]);
        let b = FilesystemLocation::new("views", [".txt", ".jinja"]);

        assert!(!same_location(&a, &b));
    }
}
