//! Views: objects bound to a URI and an engine, rendered with a context.
//!
//! A [`View`] is short-lived: one is created per
//! [`ViewBuilder::create`](crate::ViewBuilder::create) call (or per
//! [`View::render_part`] call) and dropped after rendering. Views created by
//! a builder carry a handle back to it so partial views can be resolved
//! through the same configuration, locations, and finder instances.

mod finder;

pub use finder::{BaseViewFinder, ViewFinder};

use std::rc::Rc;

use crate::builder::{ViewBuilder, ViewKind};
use crate::context::Context;
use crate::engine::Engine;
use crate::error::{Result, ViewError};

impl std::fmt::Debug for dyn View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View").field("uri", &self.uri()).finish()
    }
}

/// A renderable view.
pub trait View {
    /// Renders the view with the given context.
    fn render(&self, context: &Context) -> Result<String>;

    /// The URI this view is bound to. Empty for the null view.
    fn uri(&self) -> &str;

    /// Attaches the builder that created this view.
    ///
    /// Called by [`ViewBuilder::create`](crate::ViewBuilder::create) so that
    /// [`render_part`](View::render_part) resolves through the same builder.
    fn set_builder(&mut self, builder: ViewBuilder);

    /// Resolves and renders a nested view through the attached builder.
    ///
    /// # Errors
    ///
    /// [`ViewError::BuilderNotAttached`] when the view was constructed by
    /// hand and never attached to a builder; otherwise whatever the nested
    /// `create`/`render` produces.
    fn render_part(
        &self,
        view: &str,
        context: &Context,
        kind: Option<ViewKind>,
    ) -> Result<String>;
}

fn render_nested(
    builder: Option<&ViewBuilder>,
    view: &str,
    context: &Context,
    kind: Option<ViewKind>,
) -> Result<String> {
    let builder = builder.ok_or(ViewError::BuilderNotAttached)?;
    builder.create(view, kind)?.render(context)
}

/// The standard view: delegates rendering to its engine.
pub struct TemplateView {
    uri: String,
    engine: Rc<dyn Engine>,
    builder: Option<ViewBuilder>,
}

impl TemplateView {
    /// Creates a view bound to a URI and an engine.
    pub fn new(uri: impl Into<String>, engine: Rc<dyn Engine>) -> Self {
        Self {
            uri: uri.into(),
            engine,
            builder: None,
        }
    }

    /// The engine this view renders through.
    pub fn engine(&self) -> &Rc<dyn Engine> {
        &self.engine
    }
}

impl View for TemplateView {
    fn render(&self, context: &Context) -> Result<String> {
        Ok(self.engine.render(&self.uri, context)?)
    }

    fn uri(&self) -> &str {
        &self.uri
    }

    fn set_builder(&mut self, builder: ViewBuilder) {
        self.builder = Some(builder);
    }

    fn render_part(
        &self,
        view: &str,
        context: &Context,
        kind: Option<ViewKind>,
    ) -> Result<String> {
        render_nested(self.builder.as_ref(), view, context, kind)
    }
}

/// Null-object view: renders the empty string for any context.
///
/// Returned when no location matches a view identifier, so `create` callers
/// never need to null-check.
#[derive(Default)]
pub struct NullView {
    builder: Option<ViewBuilder>,
}

impl NullView {
    /// Creates a null view.
    pub fn new() -> Self {
        Self::default()
    }
}

impl View for NullView {
    fn render(&self, _context: &Context) -> Result<String> {
        Ok(String::new())
    }

    fn uri(&self) -> &str {
        ""
    }

    fn set_builder(&mut self, builder: ViewBuilder) {
        self.builder = Some(builder);
    }

    fn render_part(
        &self,
        view: &str,
        context: &Context,
        kind: Option<ViewKind>,
    ) -> Result<String> {
        render_nested(self.builder.as_ref(), view, context, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineError, NullEngine};

    struct FixedEngine(&'static str);

    impl Engine for FixedEngine {
        fn can_handle(&self, _uri: &str) -> bool {
            true
        }

        fn render(&self, _uri: &str, _context: &Context) -> std::result::Result<String, EngineError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn template_view_delegates_to_engine() {
        let view = TemplateView::new("views/home.jinja", Rc::new(FixedEngine("rendered")));

        assert_eq!(view.render(&Context::new()).unwrap(), "rendered");
        assert_eq!(view.uri(), "views/home.jinja");
    }

    #[test]
    fn null_view_renders_empty() {
        let view = NullView::new();

        assert_eq!(view.render(&Context::new()).unwrap(), "");
        assert_eq!(view.uri(), "");
    }

    #[test]
    fn render_part_without_builder_fails() {
        let view = TemplateView::new("home.jinja", Rc::new(NullEngine::new()));
        let err = view
            .render_part("partial", &Context::new(), None)
            .unwrap_err();

        assert!(matches!(err, ViewError::BuilderNotAttached));
    }
}
