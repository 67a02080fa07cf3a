//! Rendering engines and engine selection.
//!
//! An [`Engine`] turns a resolved template URI plus a [`Context`] into
//! rendered output. Engines declare which URIs they can handle (by
//! extension), and an [`EngineFinder`] picks the first capable engine for a
//! given URI, falling back to a null object so callers never deal with an
//! absent engine.
//!
//! Shipped engines:
//!
//! | Engine | Extensions | Behavior |
//! |--------|-----------|----------|
//! | [`JinjaEngine`] | `.jinja`, `.jinja2`, `.j2` | MiniJinja rendering |
//! | [`RawEngine`] | `.txt`, `.html` | verbatim file contents |
//! | [`NullEngine`] | any | empty output |

mod finder;
mod jinja;
mod raw;

pub use finder::{BaseEngineFinder, EngineFinder};
pub use jinja::{JinjaEngine, JINJA_EXTENSIONS};
pub use raw::{RawEngine, RAW_EXTENSIONS};

use std::path::PathBuf;

use thiserror::Error;

use crate::context::Context;

/// Errors produced while rendering through an engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The template could not be read from its URI.
    #[error("failed to read template \"{path}\": {message}")]
    Io { path: PathBuf, message: String },

    /// The template failed to compile or render.
    #[error("template error: {0}")]
    Template(String),

    /// Context data could not be serialized into the template scope.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<minijinja::Error> for EngineError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::BadSerialization => EngineError::Serialization(err.to_string()),
            _ => EngineError::Template(err.to_string()),
        }
    }
}

/// A rendering engine keyed by URI.
///
/// The builder passes engines through unexamined; only views call into them.
/// Engines are selected per URI by an [`EngineFinder`], so `can_handle` must
/// be cheap and side-effect free.
pub trait Engine {
    /// Whether this engine can render the given URI.
    fn can_handle(&self, uri: &str) -> bool;

    /// Renders the template at `uri` with the given context.
    fn render(&self, uri: &str, context: &Context) -> Result<String, EngineError>;
}

/// Null-object engine: handles every URI and renders nothing.
///
/// This is what the default engine finder returns for a missing URI, so the
/// pipeline stays total without a missing-template error path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEngine;

impl NullEngine {
    /// Creates a null engine.
    pub fn new() -> Self {
        Self
    }
}

impl Engine for NullEngine {
    fn can_handle(&self, _uri: &str) -> bool {
        true
    }

    fn render(&self, _uri: &str, _context: &Context) -> Result<String, EngineError> {
        Ok(String::new())
    }
}

pub(crate) fn read_template(uri: &str) -> Result<String, EngineError> {
    std::fs::read_to_string(uri).map_err(|e| EngineError::Io {
        path: PathBuf::from(uri),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_engine_handles_everything() {
        let engine = NullEngine::new();

        assert!(engine.can_handle("anything.xyz"));
        assert!(engine.can_handle(""));
    }

    #[test]
    fn null_engine_renders_empty() {
        let engine = NullEngine::new();
        let context = Context::new().with("ignored", true);

        assert_eq!(engine.render("some.uri", &context).unwrap(), "");
    }

    #[test]
    fn read_template_missing_file() {
        let err = read_template("/definitely/not/here.jinja").unwrap_err();

        assert!(matches!(err, EngineError::Io { .. }));
        assert!(err.to_string().contains("not/here.jinja"));
    }
}
