//! Breakpoint unit parsing.
//!
//! Breakpoints are normalized to pixels. Numbers are taken as pixels
//! already; strings carry an optional unit:
//!
//! | Unit | Result |
//! |------|--------|
//! | none, `px` | the magnitude |
//! | `em`, `rem` | magnitude x root font size (warns, the root size is assumed) |
//! | anything else | `NaN` (reported as an error) |
//!
//! Units are matched case-insensitively. The parser never filters: callers
//! drop `NaN` results before storing breakpoints.

use once_cell::sync::Lazy;
use regex::Regex;

use super::token::{format_number, Token};
use crate::config::DEFAULT_ROOT_FONT_SIZE;
use crate::diagnostics::Diagnostics;

static BREAKPOINT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(.*\d)([a-z%]*)\s*$").expect("breakpoint pattern is valid"));

/// Parses a breakpoint token into pixels, assuming a 16px root font size.
///
/// # Example
///
/// ```rust
/// use tokensmith::{parse_breakpoint, Diagnostics, Token};
///
/// let mut diagnostics = Diagnostics::new();
/// assert_eq!(parse_breakpoint(&Token::from("40em"), &mut diagnostics), 640.0);
/// assert_eq!(parse_breakpoint(&Token::from("10PX"), &mut diagnostics), 10.0);
/// assert!(parse_breakpoint(&Token::from("10vh"), &mut diagnostics).is_nan());
/// ```
pub fn parse_breakpoint(token: &Token, diagnostics: &mut Diagnostics) -> f64 {
    parse_breakpoint_with(token, DEFAULT_ROOT_FONT_SIZE, diagnostics)
}

/// Parses a breakpoint token into pixels with an explicit root font size.
pub fn parse_breakpoint_with(
    token: &Token,
    root_font_size: f64,
    diagnostics: &mut Diagnostics,
) -> f64 {
    let text = match token {
        Token::Number(n) => return *n,
        Token::Text(text) => text,
    };

    if let Some((magnitude, unit)) = split_unit(&text.to_lowercase()) {
        match unit.as_str() {
            "" | "px" => return magnitude,
            "em" | "rem" => {
                let value = magnitude * root_font_size;
                diagnostics.warn_once(format!(
                    "Breakpoint \"{}\" was converted to {}px assuming a {}px root font size.",
                    text,
                    format_number(value),
                    format_number(root_font_size)
                ));
                return value;
            }
            _ => {}
        }
    }

    diagnostics.error_once(format!(
        "Invalid breakpoint \"{}\": expected a number with an optional 'px', 'em' or 'rem' unit.",
        text
    ));
    f64::NAN
}

/// Splits lower-cased text into a finite magnitude and its unit suffix.
fn split_unit(text: &str) -> Option<(f64, String)> {
    let captures = BREAKPOINT_PATTERN.captures(text)?;
    let magnitude: f64 = captures.get(1)?.as_str().trim().parse().ok()?;
    if !magnitude.is_finite() {
        return None;
    }
    let unit = captures.get(2).map_or("", |m| m.as_str());
    Some((magnitude, unit.to_string()))
}
