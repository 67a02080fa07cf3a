//! Engine selection.

use std::rc::Rc;

use log::trace;

use super::{Engine, NullEngine};
use crate::config::{Config, ConfigError};
use crate::registry::Registries;

/// Selects an engine for a resolved URI.
///
/// A finder never fails and never returns an absent engine: when nothing
/// applies (including when the URI itself is the no-match sentinel) it
/// returns its null object.
pub trait EngineFinder {
    /// Returns an engine for the given URI.
    ///
    /// `None` is the no-match sentinel from location scanning; the finder
    /// decides what engine applies to a missing URI.
    fn find(&self, uri: Option<&str>) -> Rc<dyn Engine>;
}

/// Engine finder driven by the `EngineFinder` configuration section.
///
/// Engines are instantiated through the engine registry in configuration
/// order; `find` returns the first engine whose `can_handle` accepts the
/// URI. The `NullObject` entry names the fallback engine, which is also what
/// a `None` URI resolves to.
pub struct BaseEngineFinder {
    engines: Vec<(String, Rc<dyn Engine>)>,
    null_object: Rc<dyn Engine>,
}

impl std::fmt::Debug for BaseEngineFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseEngineFinder")
            .field(
                "engines",
                &self.engines.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl BaseEngineFinder {
    /// Builds a finder from its configuration subtree.
    ///
    /// Expects an `Engines` map of registry names and a `NullObject` registry
    /// name, both resolved against the given registries.
    ///
    /// # Errors
    ///
    /// `ConfigError` when a key is missing or malformed, or when a configured
    /// name has no registered factory.
    pub fn from_config(config: &Config, registries: &Registries) -> Result<Self, ConfigError> {
        let mut engines = Vec::new();
        for (entry, value) in config.get_map(&["Engines"])? {
            let name = value.as_str().ok_or_else(|| ConfigError::TypeMismatch {
                key: format!("Engines.{entry}"),
                expected: "a string",
            })?;
            let factory = registries
                .engine_factory(name)
                .ok_or_else(|| ConfigError::UnknownName {
                    kind: "engine",
                    name: name.to_string(),
                })?;
            engines.push((name.to_string(), factory()));
        }

        let null_name = config.get_str(&["NullObject"])?;
        let null_factory =
            registries
                .engine_factory(null_name)
                .ok_or_else(|| ConfigError::UnknownName {
                    kind: "engine",
                    name: null_name.to_string(),
                })?;

        Ok(Self {
            engines,
            null_object: null_factory(),
        })
    }

    /// Builds a finder from explicit engine instances, bypassing
    /// configuration. Mostly useful in tests and embedders with their own
    /// wiring.
    pub fn with_engines(
        engines: Vec<(String, Rc<dyn Engine>)>,
        null_object: Rc<dyn Engine>,
    ) -> Self {
        Self {
            engines,
            null_object,
        }
    }
}

impl Default for BaseEngineFinder {
    fn default() -> Self {
        Self::with_engines(Vec::new(), Rc::new(NullEngine::new()))
    }
}

impl EngineFinder for BaseEngineFinder {
    fn find(&self, uri: Option<&str>) -> Rc<dyn Engine> {
        let Some(uri) = uri else {
            return Rc::clone(&self.null_object);
        };

        for (name, engine) in &self.engines {
            if engine.can_handle(uri) {
                trace!("engine {name} handles \"{uri}\"");
                return Rc::clone(engine);
            }
        }

        trace!("no engine handles \"{uri}\", using null object");
        Rc::clone(&self.null_object)
    }
}
