//! Passthrough engine for static templates.

use super::{read_template, Engine, EngineError};
use crate::context::Context;
use crate::uri;

/// Extensions handled by [`RawEngine`].
pub const RAW_EXTENSIONS: &[&str] = &[".txt", ".html"];

/// Returns template file contents verbatim, ignoring the context.
///
/// Useful for static fragments that need to participate in view resolution
/// without paying for a template backend, and as a lightweight engine in
/// tests.
#[derive(Debug, Clone, Default)]
pub struct RawEngine {
    extensions: Vec<String>,
}

impl RawEngine {
    /// Creates an engine handling the standard static extensions.
    pub fn new() -> Self {
        Self::with_extensions(RAW_EXTENSIONS.iter().copied())
    }

    /// Creates an engine handling a custom extension list.
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }
}

impl Engine for RawEngine {
    fn can_handle(&self, uri: &str) -> bool {
        self.extensions.iter().any(|ext| uri::has_extension(uri, ext))
    }

    fn render(&self, uri: &str, _context: &Context) -> Result<String, EngineError> {
        read_template(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn handles_static_extensions() {
        let engine = RawEngine::new();

        assert!(engine.can_handle("page.txt"));
        assert!(engine.can_handle("page.html"));
        assert!(!engine.can_handle("page.jinja"));
    }

    #[test]
    fn returns_contents_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "<p>{{ not_a_variable }}</p>").unwrap();

        let engine = RawEngine::new();
        let context = Context::new().with("not_a_variable", "ignored");
        let output = engine.render(&path.to_string_lossy(), &context).unwrap();

        assert_eq!(output, "<p>{{ not_a_variable }}</p>");
    }

    #[test]
    fn missing_file_is_io_error() {
        let engine = RawEngine::new();
        let err = engine.render("/no/such/page.txt", &Context::new()).unwrap_err();

        assert!(matches!(err, EngineError::Io { .. }));
    }
}
