//! Ordered, duplicate-free collection of search locations.

use std::rc::Rc;

use log::debug;

use super::{same_location, Location};
use crate::error::{Result, ViewError};

/// An ordered set of [`Location`]s, keyed by structural equality.
///
/// Insertion order is preserved and significant: it is the scan priority
/// used by [`ViewBuilder::scan_locations`](crate::ViewBuilder::scan_locations).
/// Adding a location equal to one already present is a no-op that reports
/// `false` rather than an error, so registration code can be re-run safely.
///
/// There is no removal operation; a builder's search space only grows.
#[derive(Clone, Default)]
pub struct Locations {
    items: Vec<Rc<dyn Location>>,
}

impl Locations {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a location unless an equal one is already present.
    ///
    /// Returns `Ok(true)` if the location was added, `Ok(false)` if an equal
    /// location already existed (the collection is unchanged).
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidLocation`] if the location fails the contract
    /// check; nothing is added in that case.
    pub fn add(&mut self, location: Rc<dyn Location>) -> Result<bool> {
        if self.has_location(location.as_ref())? {
            debug!(
                "location {} already registered, skipping",
                location.path().display()
            );
            return Ok(false);
        }

        self.items.push(location);
        Ok(true)
    }

    /// Checks whether an equal location is already registered.
    ///
    /// Equality is the Location contract's structural equality (path and
    /// extensions), not pointer identity.
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidLocation`] if the argument fails the contract
    /// check.
    pub fn has_location(&self, location: &dyn Location) -> Result<bool> {
        ensure_valid(location)?;

        Ok(self
            .items
            .iter()
            .any(|existing| same_location(existing.as_ref(), location)))
    }

    /// Iterates over locations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<dyn Location>> {
        self.items.iter()
    }

    /// Returns the number of registered locations.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no locations are registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl std::fmt::Debug for Locations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.items.iter().map(|l| l.path()))
            .finish()
    }
}

/// Contract check: a location must report a non-empty path.
fn ensure_valid(location: &dyn Location) -> std::result::Result<(), ViewError> {
    if location.path().as_os_str().is_empty() {
        return Err(ViewError::InvalidLocation(format!(
            "empty path (extensions: {:?})",
            location.extensions()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::FilesystemLocation;

    fn loc(path: &str, extensions: &[&str]) -> Rc<dyn Location> {
        Rc::new(FilesystemLocation::new(path, extensions.iter().copied()))
    }

    #[test]
    fn add_then_has_location() {
        let mut locations = Locations::new();

        assert!(locations.add(loc("views", &[".jinja"])).unwrap());
        assert!(locations
            .has_location(&FilesystemLocation::new("views", [".jinja"]))
            .unwrap());
    }

    #[test]
    fn add_is_idempotent() {
        let mut locations = Locations::new();

        assert!(locations.add(loc("views", &[".jinja"])).unwrap());
        // An independently constructed but structurally equal location is a
        // duplicate.
        assert!(!locations.add(loc("views", &[".jinja"])).unwrap());
        assert_eq!(locations.len(), 1);
    }

    #[test]
    fn same_path_different_extensions_is_distinct() {
        let mut locations = Locations::new();

        assert!(locations.add(loc("views", &[".jinja"])).unwrap());
        assert!(locations.add(loc("views", &[".txt"])).unwrap());
        assert_eq!(locations.len(), 2);
    }

    #[test]
    fn insertion_order_preserved() {
        let mut locations = Locations::new();
        locations.add(loc("first", &[".jinja"])).unwrap();
        locations.add(loc("second", &[".jinja"])).unwrap();
        locations.add(loc("third", &[".jinja"])).unwrap();

        let paths: Vec<String> = locations
            .iter()
            .map(|l| l.path().to_string_lossy().into_owned())
            .collect();
        assert_eq!(paths, vec!["first", "second", "third"]);
    }

    #[test]
    fn invalid_location_rejected_by_add() {
        let mut locations = Locations::new();
        let err = locations.add(loc("", &[".jinja"])).unwrap_err();

        assert!(matches!(err, ViewError::InvalidLocation(_)));
        assert!(locations.is_empty());
    }

    #[test]
    fn invalid_location_rejected_by_has_location() {
        let locations = Locations::new();
        let err = locations
            .has_location(&FilesystemLocation::new("", [".jinja"]))
            .unwrap_err();

        assert!(matches!(err, ViewError::InvalidLocation(_)));
    }

    #[test]
    fn invalid_location_error_carries_diagnostics() {
        let mut locations = Locations::new();
        let err = locations.add(loc("", &[".jinja", ".txt"])).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("invalid location"));
        assert!(message.contains(".jinja"));
    }
}
