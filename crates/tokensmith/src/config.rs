//! Engine configuration.
//!
//! [`Config`] gathers the few knobs the resolver exposes. Every field has a
//! default, so a partial document (or none at all) is enough:
//!
//! ```rust
//! use tokensmith::Config;
//!
//! let config = Config::from_yaml_str("class_prefix: \"x-\"").unwrap();
//! assert_eq!(config.class_prefix, "x-");
//! assert_eq!(config.root_font_size, 16.0);
//! ```

use serde::Deserialize;

use crate::error::Result;

/// Root font size assumed when converting `em`/`rem` breakpoints to pixels.
pub const DEFAULT_ROOT_FONT_SIZE: f64 = 16.0;

/// Prefix prepended to every generated class name.
pub const DEFAULT_CLASS_PREFIX: &str = "sx-";

/// Settings shared by the theme converter and the declaration cache.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pixels per `em`/`rem` when normalizing breakpoints.
    pub root_font_size: f64,
    /// Prefix for generated class names.
    pub class_prefix: String,
}

impl Config {
    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Parses a configuration from JSON text.
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Sets the root font size, returning the updated config.
    pub fn root_font_size(mut self, size: f64) -> Self {
        self.root_font_size = size;
        self
    }

    /// Sets the class prefix, returning the updated config.
    pub fn class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_font_size: DEFAULT_ROOT_FONT_SIZE,
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
        }
    }
}
