//! Factory registries for configuration-declared names.
//!
//! Configuration refers to engines, views, and finders by name. Instead of
//! constructing types from name strings at runtime, each name is looked up in
//! a registry populated at startup: a plain map from name to factory
//! function. The built-in names are registered by [`Registries::with_builtins`];
//! embedders add their own before constructing a
//! [`ViewBuilder`](crate::ViewBuilder).
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use lookout::{NullEngine, Registries, TemplateView};
//!
//! let mut registries = Registries::with_builtins();
//! registries.register_engine("MyEngine", || Rc::new(NullEngine::new()));
//! registries.register_view("MyView", |uri, engine| {
//!     Box::new(TemplateView::new(uri, engine))
//! });
//!
//! assert!(registries.engine_factory("MyEngine").is_some());
//! assert!(registries.view_factory("UnknownView").is_none());
//! ```

use std::collections::HashMap;
use std::rc::Rc;

use crate::config::{Config, ConfigError};
use crate::engine::{
    BaseEngineFinder, Engine, EngineFinder, JinjaEngine, NullEngine, RawEngine,
};
use crate::view::{BaseViewFinder, NullView, TemplateView, View, ViewFinder};

/// Factory producing an engine instance.
pub type EngineFactory = Rc<dyn Fn() -> Rc<dyn Engine>>;

/// Factory producing a view bound to a URI and an engine.
pub type ViewFactory = Rc<dyn Fn(&str, Rc<dyn Engine>) -> Box<dyn View>>;

/// Factory producing an engine finder from its configuration subtree.
pub type EngineFinderFactory =
    Rc<dyn Fn(&Config, &Registries) -> Result<Rc<dyn EngineFinder>, ConfigError>>;

/// Factory producing a view finder from its configuration subtree.
pub type ViewFinderFactory =
    Rc<dyn Fn(&Config, &Registries) -> Result<Rc<dyn ViewFinder>, ConfigError>>;

/// Name-to-factory maps for everything configuration can declare.
#[derive(Clone)]
pub struct Registries {
    engines: HashMap<String, EngineFactory>,
    views: HashMap<String, ViewFactory>,
    engine_finders: HashMap<String, EngineFinderFactory>,
    view_finders: HashMap<String, ViewFinderFactory>,
}

impl Registries {
    /// Creates empty registries, with no names registered at all.
    pub fn empty() -> Self {
        Self {
            engines: HashMap::new(),
            views: HashMap::new(),
            engine_finders: HashMap::new(),
            view_finders: HashMap::new(),
        }
    }

    /// Creates registries pre-populated with the crate's built-ins: the
    /// names the default configuration refers to.
    pub fn with_builtins() -> Self {
        let mut registries = Self::empty();

        registries.register_engine("JinjaEngine", || Rc::new(JinjaEngine::new()));
        registries.register_engine("RawEngine", || Rc::new(RawEngine::new()));
        registries.register_engine("NullEngine", || Rc::new(NullEngine::new()));

        registries.register_view("TemplateView", |uri, engine| {
            Box::new(TemplateView::new(uri, engine))
        });
        registries.register_view("NullView", |_uri, _engine| Box::new(NullView::new()));

        registries.register_engine_finder("BaseEngineFinder", |config, registries| {
            Ok(Rc::new(BaseEngineFinder::from_config(config, registries)?))
        });
        registries.register_view_finder("BaseViewFinder", |config, registries| {
            Ok(Rc::new(BaseViewFinder::from_config(config, registries)?))
        });

        registries
    }

    /// Registers an engine factory under a name, replacing any previous
    /// registration.
    pub fn register_engine(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> Rc<dyn Engine> + 'static,
    ) {
        self.engines.insert(name.into(), Rc::new(factory));
    }

    /// Registers a view factory under a name, replacing any previous
    /// registration.
    pub fn register_view(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(&str, Rc<dyn Engine>) -> Box<dyn View> + 'static,
    ) {
        self.views.insert(name.into(), Rc::new(factory));
    }

    /// Registers an engine finder factory under a name.
    pub fn register_engine_finder(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(&Config, &Registries) -> Result<Rc<dyn EngineFinder>, ConfigError> + 'static,
    ) {
        self.engine_finders.insert(name.into(), Rc::new(factory));
    }

    /// Registers a view finder factory under a name.
    pub fn register_view_finder(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(&Config, &Registries) -> Result<Rc<dyn ViewFinder>, ConfigError> + 'static,
    ) {
        self.view_finders.insert(name.into(), Rc::new(factory));
    }

    /// Looks up an engine factory by name.
    pub fn engine_factory(&self, name: &str) -> Option<EngineFactory> {
        self.engines.get(name).cloned()
    }

    /// Looks up a view factory by name.
    pub fn view_factory(&self, name: &str) -> Option<ViewFactory> {
        self.views.get(name).cloned()
    }

    /// Looks up an engine finder factory by name.
    pub fn engine_finder_factory(&self, name: &str) -> Option<EngineFinderFactory> {
        self.engine_finders.get(name).cloned()
    }

    /// Looks up a view finder factory by name.
    pub fn view_finder_factory(&self, name: &str) -> Option<ViewFinderFactory> {
        self.view_finders.get(name).cloned()
    }
}

impl Default for Registries {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for Registries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registries")
            .field("engines", &self.engines.keys().collect::<Vec<_>>())
            .field("views", &self.views.keys().collect::<Vec<_>>())
            .field(
                "engine_finders",
                &self.engine_finders.keys().collect::<Vec<_>>(),
            )
            .field(
                "view_finders",
                &self.view_finders.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_cover_default_config_names() {
        let registries = Registries::with_builtins();

        for engine in ["JinjaEngine", "RawEngine", "NullEngine"] {
            assert!(registries.engine_factory(engine).is_some(), "{engine}");
        }
        for view in ["TemplateView", "NullView"] {
            assert!(registries.view_factory(view).is_some(), "{view}");
        }
        assert!(registries.engine_finder_factory("BaseEngineFinder").is_some());
        assert!(registries.view_finder_factory("BaseViewFinder").is_some());
    }

    #[test]
    fn empty_has_nothing() {
        let registries = Registries::empty();

        assert!(registries.engine_factory("JinjaEngine").is_none());
        assert!(registries.view_factory("TemplateView").is_none());
    }

    #[test]
    fn registration_replaces() {
        let mut registries = Registries::with_builtins();
        registries.register_view("TemplateView", |_uri, _engine| Box::new(NullView::new()));

        let factory = registries.view_factory("TemplateView").unwrap();
        let view = factory("some.jinja", Rc::new(NullEngine::new()));

        // The replacement factory ignores the URI.
        assert_eq!(view.uri(), "");
    }
}
