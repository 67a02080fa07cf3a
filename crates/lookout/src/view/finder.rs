//! View selection.

use std::rc::Rc;

use super::View;
use crate::config::{Config, ConfigError};
use crate::engine::{Engine, NullEngine};
use crate::registry::{Registries, ViewFactory};

/// Produces views for resolved URIs, plus the null-object view for misses.
pub trait ViewFinder {
    /// Returns a view bound to the given URI and engine.
    fn find(&self, uri: &str, engine: Rc<dyn Engine>) -> Box<dyn View>;

    /// Returns the null-object view: a valid view rendering to an empty
    /// result. Never absent, so callers need no null-check.
    fn null_object(&self) -> Box<dyn View>;
}

/// View finder driven by the `ViewFinder` configuration section.
///
/// The first entry of the `Views` map names the default view factory used by
/// `find`; the `NullObject` entry names the null view. Both are resolved
/// against the view registry. The remaining `Views` entries are aliases
/// consumed by type resolution in
/// [`ViewBuilder::create`](crate::ViewBuilder::create), not by the finder
/// itself.
pub struct BaseViewFinder {
    default_view: ViewFactory,
    null_view: ViewFactory,
}

impl std::fmt::Debug for BaseViewFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseViewFinder").finish_non_exhaustive()
    }
}

impl std::fmt::Debug for dyn ViewFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn ViewFinder")
    }
}

impl BaseViewFinder {
    /// Builds a finder from its configuration subtree.
    ///
    /// # Errors
    ///
    /// `ConfigError` when `Views` is missing or empty, `NullObject` is
    /// missing, or a configured name has no registered factory.
    pub fn from_config(config: &Config, registries: &Registries) -> Result<Self, ConfigError> {
        let views = config.get_map(&["Views"])?;
        let (entry, value) = views.iter().next().ok_or(ConfigError::TypeMismatch {
            key: "Views".to_string(),
            expected: "a non-empty map",
        })?;
        let default_name = value.as_str().ok_or_else(|| ConfigError::TypeMismatch {
            key: format!("Views.{entry}"),
            expected: "a string",
        })?;

        let default_view = lookup(registries, default_name)?;
        let null_view = lookup(registries, config.get_str(&["NullObject"])?)?;

        Ok(Self {
            default_view,
            null_view,
        })
    }
}

fn lookup(registries: &Registries, name: &str) -> Result<ViewFactory, ConfigError> {
    registries
        .view_factory(name)
        .ok_or_else(|| ConfigError::UnknownName {
            kind: "view",
            name: name.to_string(),
        })
}

impl ViewFinder for BaseViewFinder {
    fn find(&self, uri: &str, engine: Rc<dyn Engine>) -> Box<dyn View> {
        (self.default_view)(uri, engine)
    }

    fn null_object(&self) -> Box<dyn View> {
        (self.null_view)("", Rc::new(NullEngine::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;

    fn finder() -> BaseViewFinder {
        let config = Config::defaults().sub_config("ViewFinder").unwrap();
        BaseViewFinder::from_config(&config, &Registries::with_builtins()).unwrap()
    }

    #[test]
    fn find_binds_uri_and_engine() {
        let finder = finder();
        let view = finder.find("views/home.jinja", Rc::new(NullEngine::new()));

        assert_eq!(view.uri(), "views/home.jinja");
    }

    #[test]
    fn null_object_is_a_working_view() {
        let finder = finder();
        let view = finder.null_object();

        assert_eq!(view.uri(), "");
        assert_eq!(view.render(&Context::new()).unwrap(), "");
    }

    #[test]
    fn empty_views_map_is_config_error() {
        let config =
            Config::from_json_str(r#"{"Views": {}, "NullObject": "NullView"}"#).unwrap();
        let err = BaseViewFinder::from_config(&config, &Registries::with_builtins()).unwrap_err();

        assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    }

    #[test]
    fn unknown_view_name_is_config_error() {
        let config = Config::from_json_str(
            r#"{"Views": {"Default": "NoSuchView"}, "NullObject": "NullView"}"#,
        )
        .unwrap();
        let err = BaseViewFinder::from_config(&config, &Registries::with_builtins()).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::UnknownName { kind: "view", .. }
        ));
    }
}
