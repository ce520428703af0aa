//! Theme model, breakpoint parsing and theme conversion.
//!
//! This module provides:
//!
//! - [`Theme`]: ordered breakpoints plus named scales, with token resolution
//! - [`ScaleName`] and [`Scale`]: the fixed scale set and its entries
//! - [`Token`]: a raw numeric or textual value
//! - [`parse_breakpoint`]: breakpoint unit normalization to pixels
//! - [`from_theme_ui`]: tolerant conversion of Theme UI shaped themes
//!
//! Themes are built once and read only afterwards.

mod breakpoint;
mod convert;
mod scale;
#[allow(clippy::module_inception)]
mod theme;
mod token;

pub use breakpoint::{parse_breakpoint, parse_breakpoint_with};
pub use convert::{from_theme_ui, from_theme_ui_with, THEME_UI_SCALES};
pub use scale::{Scale, ScaleName};
pub use theme::Theme;
pub use token::Token;

pub(crate) use convert::kind_of;
pub(crate) use theme::media_condition;
