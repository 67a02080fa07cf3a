//! Configuration tree for view resolution.
//!
//! A [`Config`] is an immutable tree of string-keyed maps, read at two
//! well-known root keys: `"EngineFinder"` and `"ViewFinder"`. The tree can be
//! built from YAML or JSON, or assembled in code; user configuration is
//! usually layered over the crate defaults with [`Config::with_defaults`].
//!
//! The wire shape (YAML shown):
//!
//! ```yaml
//! EngineFinder:
//!   ClassName: BaseEngineFinder
//!   Engines:
//!     JinjaEngine: JinjaEngine
//!     RawEngine: RawEngine
//!   NullObject: NullEngine
//! ViewFinder:
//!   ClassName: BaseViewFinder
//!   Views:
//!     TemplateView: TemplateView
//!   NullObject: NullView
//! ```
//!
//! Leaf values under `ClassName`, `Engines`, `Views`, and `NullObject` are
//! *registry names* looked up in [`Registries`](crate::Registries), not
//! language-level class names.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::uri;

/// Errors produced while loading or reading configuration.
///
/// This is the "failed to process config" class of failures: it surfaces
/// unchanged through builder construction and lazy finder resolution, and is
/// never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input could not be parsed as YAML/JSON.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// The parsed document was not a map at the expected position.
    #[error("configuration at \"{0}\" is not a map")]
    NotAMap(String),

    /// A required key was absent.
    #[error("configuration key not found: {0}")]
    MissingKey(String),

    /// A key was present but held the wrong kind of value.
    #[error("configuration key \"{key}\" is not {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
    },

    /// A configured name has no corresponding factory registered.
    #[error("no {kind} registered under \"{name}\"")]
    UnknownName { kind: &'static str, name: String },

    /// A configuration file could not be read.
    #[error("failed to read configuration file \"{path}\": {message}")]
    Io { path: PathBuf, message: String },
}

/// Immutable configuration tree.
#[derive(Clone, Default)]
pub struct Config {
    root: Map<String, Value>,
}

impl Config {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(ConfigError::NotAMap("<root>".to_string())),
        }
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let value: Value =
            serde_json::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Parses a configuration from a YAML string.
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        let value: Value =
            serde_yaml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Loads a configuration file, dispatching on its extension.
    ///
    /// `.yaml` and `.yml` files are parsed as YAML, `.json` as JSON. Any
    /// other extension is a parse error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let name = path.to_string_lossy();
        if uri::has_extension(&name, ".yaml") || uri::has_extension(&name, ".yml") {
            Self::from_yaml_str(&content)
        } else if uri::has_extension(&name, ".json") {
            Self::from_json_str(&content)
        } else {
            Err(ConfigError::Parse(format!(
                "unsupported configuration format: {}",
                name
            )))
        }
    }

    /// The crate's default wiring: base finders, the Jinja and raw engines,
    /// the template view, and null objects for both finder kinds.
    pub fn defaults() -> Self {
        let value = json!({
            "EngineFinder": {
                "ClassName": "BaseEngineFinder",
                "Engines": {
                    "JinjaEngine": "JinjaEngine",
                    "RawEngine": "RawEngine",
                },
                "NullObject": "NullEngine",
            },
            "ViewFinder": {
                "ClassName": "BaseViewFinder",
                "Views": {
                    "TemplateView": "TemplateView",
                },
                "NullObject": "NullView",
            },
        });
        Self::from_value(value).unwrap_or_default()
    }

    /// Layers this configuration over the crate defaults.
    ///
    /// The merge is a deep map merge: maps are merged key by key, any other
    /// value in `self` replaces the default wholesale.
    pub fn with_defaults(self) -> Self {
        self.merged_over(Self::defaults())
    }

    /// Layers this configuration over an arbitrary base.
    pub fn merged_over(self, base: Config) -> Self {
        let mut root = base.root;
        merge_map(&mut root, self.root);
        Self { root }
    }

    /// Returns true if a value exists at `path`.
    pub fn has_key(&self, path: &[&str]) -> bool {
        self.lookup(path).is_some()
    }

    /// Returns the value at `path`.
    pub fn get_key(&self, path: &[&str]) -> Result<&Value, ConfigError> {
        self.lookup(path)
            .ok_or_else(|| ConfigError::MissingKey(path.join(".")))
    }

    /// Returns the string value at `path`.
    pub fn get_str(&self, path: &[&str]) -> Result<&str, ConfigError> {
        self.get_key(path)?
            .as_str()
            .ok_or_else(|| ConfigError::TypeMismatch {
                key: path.join("."),
                expected: "a string",
            })
    }

    /// Returns the map value at `path`, in document order.
    pub fn get_map(&self, path: &[&str]) -> Result<&Map<String, Value>, ConfigError> {
        self.get_key(path)?
            .as_object()
            .ok_or_else(|| ConfigError::TypeMismatch {
                key: path.join("."),
                expected: "a map",
            })
    }

    /// Extracts the subtree under `key` as its own configuration.
    pub fn sub_config(&self, key: &str) -> Result<Config, ConfigError> {
        match self.root.get(key) {
            Some(Value::Object(map)) => Ok(Config { root: map.clone() }),
            Some(_) => Err(ConfigError::NotAMap(key.to_string())),
            None => Err(ConfigError::MissingKey(key.to_string())),
        }
    }

    fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.root.get(*first)?;
        for segment in rest {
            current = current.as_object()?.get(*segment)?;
        }
        Some(current)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("keys", &self.root.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn merge_map(base: &mut Map<String, Value>, over: Map<String, Value>) {
    use serde_json::map::Entry;

    for (key, value) in over {
        match base.entry(key) {
            // Merging in place keeps the base key's position, so override
            // entries do not change scan-priority order.
            Entry::Occupied(mut occupied) => match (occupied.get_mut(), value) {
                (Value::Object(base_child), Value::Object(over_child)) => {
                    merge_map(base_child, over_child);
                }
                (slot, value) => {
                    *slot = value;
                }
            },
            Entry::Vacant(vacant) => {
                vacant.insert(value);
            }
        }
    }
}
