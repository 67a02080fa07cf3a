//! Error types for view resolution.

use thiserror::Error;

use crate::config::ConfigError;
use crate::engine::EngineError;

/// Errors that can occur while resolving or rendering views.
///
/// Absence of a matching template is deliberately *not* represented here:
/// a view identifier with no matching location resolves to the null-object
/// view, so [`ViewBuilder::create`](crate::ViewBuilder::create) never fails
/// merely because a file does not exist.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A value failing the Location contract was passed to the locations
    /// collection. Indicates a caller programming error, not a runtime
    /// condition worth retrying.
    #[error("invalid location: {0}")]
    InvalidLocation(String),

    /// View type resolution could not produce a view. Carries a diagnostic
    /// rendering of the offending type value.
    #[error("could not instantiate view \"{0}\"")]
    FailedToInstantiateView(String),

    /// Partial rendering was requested on a view with no builder attached.
    ///
    /// Views created through [`ViewBuilder::create`](crate::ViewBuilder::create)
    /// always carry a builder handle; this only fires for hand-constructed
    /// views.
    #[error("view has no builder attached; partial rendering requires one")]
    BuilderNotAttached,

    /// Configuration was malformed or incomplete. Propagated unchanged from
    /// the configuration layer.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An engine failed to render.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type for view resolution operations.
pub type Result<T> = std::result::Result<T, ViewError>;
