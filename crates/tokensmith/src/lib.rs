//! # Tokensmith - design-token themes and atomic style resolution
//!
//! Tokensmith turns declarative style props such as `{ px: 4, color: "primary" }`
//! into deduplicated atomic CSS rules, resolving every value against a
//! design-token theme.
//!
//! ## Core Concepts
//!
//! - [`Theme`]: ordered breakpoints plus named scales (spacing, color, ...)
//! - [`from_theme_ui`]: tolerant import of Theme UI shaped themes
//! - [`StyleProps`]: an ordered style-prop object with responsive values
//! - [`StyleEngine`]: expands aliases, resolves tokens and emits class names
//! - [`DeclarationCache`]: one rule per unique (property, value, breakpoint)
//! - [`Diagnostics`]: warn-once / error-once reports instead of failures
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use tokensmith::{from_theme_ui, DeclarationCache, StyleEngine, StyleProps};
//!
//! let theme = from_theme_ui(&json!({
//!     "breakpoints": ["40em"],
//!     "space": { "4": "1rem" },
//!     "colors": { "red": "#ff0000" },
//! }))
//! .into_value();
//! assert_eq!(theme.breakpoints(), &[640.0]);
//!
//! let cache = DeclarationCache::new();
//! let engine = StyleEngine::new(&theme, &cache);
//! let classes = engine
//!     .resolve(&StyleProps::new().set("px", 4).set("color", "red"))
//!     .into_value();
//!
//! let class_attr: Vec<&str> = classes.iter().map(|c| c.as_str()).collect();
//! assert_eq!(class_attr.len(), 3);
//!
//! let css = cache.to_css();
//! assert!(css.contains("{padding-left:1rem}"));
//! assert!(css.contains("{padding-right:1rem}"));
//! assert!(css.contains("{color:#ff0000}"));
//! ```
//!
//! ## Tolerance
//!
//! Conversion and resolution never fail. Unknown token groups, unsupported
//! breakpoint units, color modes and the like are dropped and reported in a
//! [`Diagnostics`] collector, returned alongside the value as an
//! [`Outcome`]. Callers that want fail-fast behavior can check
//! [`Diagnostics::has_errors`].
//!
//! ## Logging
//!
//! The first occurrence of each diagnostic is also emitted through
//! `tracing`, and newly generated rules are logged at `debug` level.
//! Install a subscriber to see them.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod style;
pub mod theme;

pub use config::Config;
pub use diagnostics::{Diagnostic, Diagnostics, Outcome, Severity};
pub use error::{Error, Result};
pub use style::{
    AtomicRule, ClassName, Declaration, DeclarationCache, DeclarationKey, StyleEngine, StyleProps,
    StyleValue,
};
pub use theme::{
    from_theme_ui, from_theme_ui_with, parse_breakpoint, parse_breakpoint_with, Scale, ScaleName,
    Theme, Token,
};
