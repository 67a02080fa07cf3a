//! View resolution orchestration.
//!
//! [`ViewBuilder`] ties the pipeline together: scan the registered locations
//! for a URI matching a view identifier, pick an engine for that URI, and
//! instantiate a view bound to both. Each step is also available on its own
//! (`scan_locations`, `engine_for`) for embedders composing their own flow.
//!
//! A builder is a cheap handle: clones share the same configuration,
//! locations, and finder slots, which is what lets created views carry a
//! handle back for partial rendering. Builders are single-threaded by
//! design; build one per thread.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use log::{debug, trace};
use once_cell::unsync::OnceCell;

use crate::config::{Config, ConfigError};
use crate::engine::{Engine, EngineFinder};
use crate::error::{Result, ViewError};
use crate::location::{Location, Locations};
use crate::registry::{Registries, ViewFactory};
use crate::view::{View, ViewFinder};

/// Root configuration key for the engine finder section.
pub const ENGINE_FINDER_KEY: &str = "EngineFinder";

/// Root configuration key for the view finder section.
pub const VIEW_FINDER_KEY: &str = "ViewFinder";

/// The kind of view to create, when the caller wants something other than
/// the finder's default.
///
/// Resolution precedence follows the order of the checks in
/// [`ViewBuilder::create`]: a configured alias under
/// `ViewFinder.Views.<name>` wins over a direct registry name, and a caller
/// factory is only invoked when no name is in play; a view resolved from a
/// name is never fed back through a factory.
#[derive(Clone)]
pub enum ViewKind {
    /// A configured alias or a direct view registry name.
    Named(String),

    /// A caller-supplied factory invoked with `(uri, engine)`.
    Factory(ViewFactory),
}

impl ViewKind {
    /// A named kind: configured alias first, raw registry name second.
    pub fn named(name: impl Into<String>) -> Self {
        ViewKind::Named(name.into())
    }

    /// A factory kind.
    pub fn factory(
        factory: impl Fn(&str, Rc<dyn Engine>) -> Box<dyn View> + 'static,
    ) -> Self {
        ViewKind::Factory(Rc::new(factory))
    }
}

impl From<&str> for ViewKind {
    fn from(name: &str) -> Self {
        ViewKind::named(name)
    }
}

impl From<String> for ViewKind {
    fn from(name: String) -> Self {
        ViewKind::Named(name)
    }
}

impl fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Named(name) => f.debug_tuple("Named").field(name).finish(),
            ViewKind::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

struct BuilderInner {
    config: Config,
    registries: Registries,
    locations: RefCell<Locations>,
    view_finder: OnceCell<Rc<dyn ViewFinder>>,
    engine_finder: OnceCell<Rc<dyn EngineFinder>>,
}

/// Builds views for logical view identifiers.
///
/// # Example
///
/// ```rust,no_run
/// use std::rc::Rc;
/// use lookout::{Config, Context, FilesystemLocation, ViewBuilder};
///
/// let builder = ViewBuilder::new(Config::defaults());
/// builder.add_location(Rc::new(FilesystemLocation::new(
///     "templates",
///     [".jinja", ".html"],
/// )))?;
///
/// let view = builder.create("home", None)?;
/// let output = view.render(&Context::new().with("title", "Home"))?;
/// # Ok::<(), lookout::ViewError>(())
/// ```
#[derive(Clone)]
pub struct ViewBuilder {
    inner: Rc<BuilderInner>,
}

impl ViewBuilder {
    /// Creates a builder over the given configuration with the built-in
    /// registries.
    ///
    /// The configuration is used as-is; layer user settings over the crate
    /// defaults first with [`Config::with_defaults`] if desired.
    pub fn new(config: Config) -> Self {
        Self::with_registries(config, Registries::with_builtins())
    }

    /// Creates a builder with custom registries.
    pub fn with_registries(config: Config, registries: Registries) -> Self {
        Self {
            inner: Rc::new(BuilderInner {
                config,
                registries,
                locations: RefCell::new(Locations::new()),
                view_finder: OnceCell::new(),
                engine_finder: OnceCell::new(),
            }),
        }
    }

    /// Pre-seeds the view finder slot with an existing instance, bypassing
    /// lazy construction from configuration. A no-op if the slot is already
    /// occupied.
    pub fn with_view_finder(self, finder: Rc<dyn ViewFinder>) -> Self {
        let _ = self.inner.view_finder.set(finder);
        self
    }

    /// Pre-seeds the engine finder slot with an existing instance. A no-op
    /// if the slot is already occupied.
    pub fn with_engine_finder(self, finder: Rc<dyn EngineFinder>) -> Self {
        let _ = self.inner.engine_finder.set(finder);
        self
    }

    /// The builder's configuration.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// The builder's factory registries.
    pub fn registries(&self) -> &Registries {
        &self.inner.registries
    }

    /// The registered locations, in scan order.
    pub fn locations(&self) -> Ref<'_, Locations> {
        self.inner.locations.borrow()
    }

    /// Registers a location to scan for views.
    ///
    /// Returns `Ok(false)` when an equal location was already registered.
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidLocation`] if the location fails the contract
    /// check.
    pub fn add_location(&self, location: Rc<dyn Location>) -> Result<bool> {
        self.inner.locations.borrow_mut().add(location)
    }

    /// Creates a view for the given identifier.
    ///
    /// Pipeline: scan locations for a URI, pick an engine for it (even when
    /// missing), then instantiate. A missing URI yields the null-object view
    /// rather than an error. When `kind` is given, type resolution applies
    /// (see [`ViewKind`]); otherwise the view finder's default view is used.
    ///
    /// The returned view carries a handle to this builder, so
    /// [`View::render_part`] resolves nested views through the same
    /// configuration and finder instances.
    pub fn create(&self, view: &str, kind: Option<ViewKind>) -> Result<Box<dyn View>> {
        let uri = self.scan_locations(&[view]);
        let engine = self.engine_for(uri.as_deref())?;

        let mut resolved = match uri {
            Some(ref uri) => match kind {
                Some(kind) => self.resolve_kind(kind, uri, engine)?,
                None => self.view_finder()?.find(uri, engine),
            },
            None => {
                debug!("no location matched view id \"{view}\", using null view");
                self.view_finder()?.null_object()
            }
        };

        resolved.set_builder(self.clone());
        Ok(resolved)
    }

    /// Scans locations in insertion order and returns the first matching
    /// URI.
    ///
    /// `None` is the no-match sentinel: absence of a view is an expected,
    /// recoverable outcome, not an error.
    pub fn scan_locations(&self, criteria: &[&str]) -> Option<String> {
        let locations = self.inner.locations.borrow();
        for location in locations.iter() {
            if let Some(uri) = location.get_uri(criteria) {
                return Some(uri);
            }
        }

        None
    }

    /// Returns an engine for the given URI through the engine finder.
    ///
    /// Delegates even when `uri` is `None`: the finder decides what engine
    /// applies to a missing URI.
    pub fn engine_for(&self, uri: Option<&str>) -> Result<Rc<dyn Engine>> {
        Ok(self.engine_finder()?.find(uri))
    }

    /// The builder's view finder, constructed from configuration on first
    /// use and cached for the builder's lifetime.
    pub fn view_finder(&self) -> Result<Rc<dyn ViewFinder>> {
        let inner = &self.inner;
        let finder = inner.view_finder.get_or_try_init(|| {
            let name = inner.config.get_str(&[VIEW_FINDER_KEY, "ClassName"])?;
            let factory = inner.registries.view_finder_factory(name).ok_or_else(|| {
                ConfigError::UnknownName {
                    kind: "view finder",
                    name: name.to_string(),
                }
            })?;
            trace!("constructing view finder {name}");
            let sub = inner.config.sub_config(VIEW_FINDER_KEY)?;
            Ok::<_, ViewError>(factory(&sub, &inner.registries)?)
        })?;

        Ok(Rc::clone(finder))
    }

    /// The builder's engine finder, constructed from configuration on first
    /// use and cached for the builder's lifetime.
    pub fn engine_finder(&self) -> Result<Rc<dyn EngineFinder>> {
        let inner = &self.inner;
        let finder = inner.engine_finder.get_or_try_init(|| {
            let name = inner.config.get_str(&[ENGINE_FINDER_KEY, "ClassName"])?;
            let factory = inner.registries.engine_finder_factory(name).ok_or_else(|| {
                ConfigError::UnknownName {
                    kind: "engine finder",
                    name: name.to_string(),
                }
            })?;
            trace!("constructing engine finder {name}");
            let sub = inner.config.sub_config(ENGINE_FINDER_KEY)?;
            Ok::<_, ViewError>(factory(&sub, &inner.registries)?)
        })?;

        Ok(Rc::clone(finder))
    }

    fn resolve_kind(
        &self,
        kind: ViewKind,
        uri: &str,
        engine: Rc<dyn Engine>,
    ) -> Result<Box<dyn View>> {
        match kind {
            ViewKind::Named(name) => {
                let alias_path = [VIEW_FINDER_KEY, "Views", name.as_str()];
                let target = if self.inner.config.has_key(&alias_path) {
                    self.inner.config.get_str(&alias_path)?.to_string()
                } else {
                    name.clone()
                };

                match self.inner.registries.view_factory(&target) {
                    Some(factory) => {
                        trace!("view kind \"{name}\" resolved to {target}");
                        Ok(factory(uri, engine))
                    }
                    None => {
                        let diagnostic = if target == name {
                            name
                        } else {
                            format!("{name} -> {target}")
                        };
                        Err(ViewError::FailedToInstantiateView(diagnostic))
                    }
                }
            }
            ViewKind::Factory(factory) => Ok(factory(uri, engine)),
        }
    }
}

impl Default for ViewBuilder {
    fn default() -> Self {
        Self::new(Config::defaults())
    }
}

impl fmt::Debug for ViewBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewBuilder")
            .field("config", &self.inner.config)
            .field("locations", &self.inner.locations.borrow())
            .finish()
    }
}
