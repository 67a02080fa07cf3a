//! MiniJinja-backed rendering engine.

use minijinja::{Environment, Value};

use super::{read_template, Engine, EngineError};
use crate::context::Context;
use crate::uri;

/// Extensions handled by [`JinjaEngine`], in the order they are checked.
pub const JINJA_EXTENSIONS: &[&str] = &[".jinja", ".jinja2", ".j2"];

/// Renders templates through a [`minijinja::Environment`].
///
/// The template file is read per render call; there is no compilation cache,
/// so edits to a template are picked up on the next render.
///
/// # Example
///
/// ```rust,no_run
/// use lookout::{Context, Engine, JinjaEngine};
///
/// let engine = JinjaEngine::new();
/// assert!(engine.can_handle("views/home.jinja"));
///
/// let context = Context::new().with("name", "World");
/// let output = engine.render("views/home.jinja", &context).unwrap();
/// ```
pub struct JinjaEngine {
    env: Environment<'static>,
    extensions: Vec<String>,
}

impl JinjaEngine {
    /// Creates an engine handling the standard Jinja extensions.
    pub fn new() -> Self {
        Self::with_extensions(JINJA_EXTENSIONS.iter().copied())
    }

    /// Creates an engine handling a custom extension list.
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            env: Environment::new(),
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the underlying MiniJinja environment, for registering custom
    /// filters or functions.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns the underlying MiniJinja environment mutably.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for JinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for JinjaEngine {
    fn can_handle(&self, uri: &str) -> bool {
        self.extensions.iter().any(|ext| uri::has_extension(uri, ext))
    }

    fn render(&self, uri: &str, context: &Context) -> Result<String, EngineError> {
        let source = read_template(uri)?;
        let scope = Value::from_serialize(context);
        Ok(self.env.render_str(&source, scope)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn handles_jinja_extensions() {
        let engine = JinjaEngine::new();

        assert!(engine.can_handle("views/home.jinja"));
        assert!(engine.can_handle("views/home.jinja2"));
        assert!(engine.can_handle("views/home.j2"));
        assert!(!engine.can_handle("views/home.html"));
        assert!(!engine.can_handle("views/home"));
    }

    #[test]
    fn custom_extensions() {
        let engine = JinjaEngine::with_extensions([".tpl"]);

        assert!(engine.can_handle("home.tpl"));
        assert!(!engine.can_handle("home.jinja"));
    }

    #[test]
    fn renders_with_context() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("greeting.jinja");
        fs::write(&path, "Hello, {{ name }}!").unwrap();

        let engine = JinjaEngine::new();
        let context = Context::new().with("name", "World");
        let output = engine.render(&path.to_string_lossy(), &context).unwrap();

        assert_eq!(output, "Hello, World!");
    }

    #[test]
    fn renders_control_flow() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("list.jinja");
        fs::write(&path, "{% for item in items %}{{ item }},{% endfor %}").unwrap();

        let engine = JinjaEngine::new();
        let context = Context::new().with("items", serde_json::json!(["a", "b"]));
        let output = engine.render(&path.to_string_lossy(), &context).unwrap();

        assert_eq!(output, "a,b,");
    }

    #[test]
    fn syntax_error_is_template_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jinja");
        fs::write(&path, "{{ unclosed").unwrap();

        let engine = JinjaEngine::new();
        let err = engine
            .render(&path.to_string_lossy(), &Context::new())
            .unwrap_err();

        assert!(matches!(err, EngineError::Template(_)));
    }

    #[test]
    fn missing_template_is_io_error() {
        let engine = JinjaEngine::new();
        let err = engine
            .render("/no/such/template.jinja", &Context::new())
            .unwrap_err();

        assert!(matches!(err, EngineError::Io { .. }));
    }

    #[test]
    fn custom_filter_through_environment() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shout.jinja");
        fs::write(&path, "{{ word | shout }}").unwrap();

        let mut engine = JinjaEngine::new();
        engine
            .environment_mut()
            .add_filter("shout", |value: String| value.to_uppercase());

        let context = Context::new().with("word", "quiet");
        let output = engine.render(&path.to_string_lossy(), &context).unwrap();

        assert_eq!(output, "QUIET");
    }
}
