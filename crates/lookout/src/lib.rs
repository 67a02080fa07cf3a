//! # Lookout - View Resolution for Template Rendering
//!
//! Lookout decouples "render the `home` view" from "read
//! `templates/home.jinja` and run it through MiniJinja". Given a logical view
//! identifier, it:
//!
//! - scans a prioritized, duplicate-free list of search locations for a
//!   matching template file,
//! - selects a rendering engine capable of handling that file's extension,
//! - instantiates a view object bound to the URI and engine, ready to render
//!   with a context.
//!
//! Application code never hard-codes file paths or template backends; both
//! are resolved per call from the builder's locations and configuration.
//!
//! ## Core Concepts
//!
//! - [`ViewBuilder`]: orchestrates resolution; one per configuration.
//! - [`Location`] / [`FilesystemLocation`] / [`Locations`]: where to look.
//!   Locations are deduplicated structurally and scanned in insertion order.
//! - [`Engine`] / [`EngineFinder`]: how to render a URI. Shipped engines
//!   cover MiniJinja templates ([`JinjaEngine`]), static files
//!   ([`RawEngine`]), and the null object ([`NullEngine`]).
//! - [`View`] / [`ViewFinder`]: what to hand back. A missing view id
//!   resolves to a [`NullView`] that renders empty output, never an error
//!   and never a null-check.
//! - [`Config`] + [`Registries`]: configuration names engines, views, and
//!   finders; registries map those names to factories.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use lookout::{Config, Context, FilesystemLocation, ViewBuilder};
//!
//! let builder = ViewBuilder::new(Config::defaults());
//! builder.add_location(Rc::new(FilesystemLocation::new(
//!     "templates",
//!     [".jinja", ".html"],
//! )))?;
//!
//! // Resolves templates/home.jinja (or .html), picks the matching engine,
//! // and renders.
//! let view = builder.create("home", None)?;
//! let output = view.render(&Context::new().with("title", "Welcome"))?;
//! println!("{output}");
//! # Ok::<(), lookout::ViewError>(())
//! ```
//!
//! ## Missing Views Are Not Errors
//!
//! ```rust
//! use lookout::{Config, Context, ViewBuilder};
//!
//! let builder = ViewBuilder::new(Config::defaults());
//!
//! // No locations registered, so nothing matches: the null view renders
//! // an empty string instead of failing.
//! let view = builder.create("missing", None).unwrap();
//! assert_eq!(view.render(&Context::new()).unwrap(), "");
//! ```
//!
//! ## Configuration
//!
//! Configuration is a small tree read at two root keys, `EngineFinder` and
//! `ViewFinder`, each naming its finder implementation plus the engines or
//! views it manages. Names are resolved through [`Registries`], so custom
//! engines and views plug in without any runtime reflection:
//!
//! ```rust
//! use lookout::{Config, Registries, NullEngine};
//! use std::rc::Rc;
//!
//! let config = Config::from_yaml_str(r#"
//! EngineFinder:
//!   Engines:
//!     MarkdownEngine: MarkdownEngine
//! "#).unwrap().with_defaults();
//!
//! let mut registries = Registries::with_builtins();
//! registries.register_engine("MarkdownEngine", || Rc::new(NullEngine::new()));
//! ```
//!
//! ## Scope
//!
//! Resolution is a pure lookup over a small in-memory list, executed once
//! per [`ViewBuilder::create`] call: no I/O caching, no file watching, no
//! compiled-template cache. Builders are cheap `Rc`-backed handles (clones
//! share locations and finders) and are single-threaded; use one builder
//! per thread.

pub mod builder;
pub mod config;
pub mod context;
pub mod engine;
mod error;
pub mod location;
pub mod registry;
pub mod uri;
pub mod view;

pub use builder::{ViewBuilder, ViewKind, ENGINE_FINDER_KEY, VIEW_FINDER_KEY};
pub use config::{Config, ConfigError};
pub use context::Context;
pub use engine::{
    BaseEngineFinder, Engine, EngineError, EngineFinder, JinjaEngine, NullEngine, RawEngine,
    JINJA_EXTENSIONS, RAW_EXTENSIONS,
};
pub use error::{Result, ViewError};
pub use location::{FilesystemLocation, Location, Locations};
pub use registry::{
    EngineFactory, EngineFinderFactory, Registries, ViewFactory, ViewFinderFactory,
};
pub use view::{BaseViewFinder, NullView, TemplateView, View, ViewFinder};
