//! Style resolution engine and declaration cache.
//!
//! This module provides:
//!
//! - [`StyleProps`] and [`StyleValue`]: ordered style-prop objects with
//!   plain, responsive and breakpoint-keyed values
//! - [`expand`]: the static alias table (`px` -> `padding-left` +
//!   `padding-right` on the spacing scale)
//! - [`StyleEngine`]: resolves style props against a theme
//! - [`DeclarationCache`]: deduplicates resolved declarations into
//!   [`AtomicRule`]s named by [`ClassName`]

mod cache;
mod engine;
mod shorthand;
mod value;

pub use cache::{AtomicRule, ClassName, DeclarationCache, DeclarationKey};
pub use engine::{Declaration, StyleEngine};
pub use shorthand::{aliases, css_property_name, expand, shorthand, Expansion, Shorthand};
pub use value::{StyleProps, StyleValue};
