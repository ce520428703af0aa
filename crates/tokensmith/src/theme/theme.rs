//! The normalized theme model and token resolution.

use std::borrow::Cow;
use std::collections::HashMap;

use indexmap::IndexMap;

use super::scale::{Scale, ScaleName};
use super::token::{format_number, Token};

/// A normalized design-token theme: ordered breakpoints plus named scales.
///
/// A theme is built once and only read afterwards, so a shared reference
/// can be handed to any number of resolvers.
///
/// # Example
///
/// ```rust
/// use tokensmith::{ScaleName, Theme};
///
/// let theme = Theme::new()
///     .with_breakpoints([1024.0, 640.0, 640.0])
///     .with_scale(ScaleName::Color, [("primary", "#07c")]);
///
/// assert_eq!(theme.breakpoints(), &[640.0, 1024.0]);
/// assert_eq!(theme.resolve(ScaleName::Color, "primary"), "#07c");
/// assert_eq!(theme.resolve(ScaleName::Color, "tomato"), "tomato");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    breakpoints: Vec<f64>,
    aliases: IndexMap<String, f64>,
    scales: HashMap<ScaleName, Scale>,
}

impl Theme {
    /// Creates a theme with no breakpoints and no scales.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the breakpoints, returning the updated theme.
    ///
    /// Values are normalized: non-finite and non-positive entries are
    /// dropped, the rest sorted ascending with duplicates removed.
    pub fn with_breakpoints(mut self, breakpoints: impl IntoIterator<Item = f64>) -> Self {
        self.breakpoints = normalize_breakpoints(breakpoints);
        self
    }

    /// Names a breakpoint so keyed responsive values can refer to it.
    ///
    /// The alias only resolves while `pixels` is one of the theme's
    /// breakpoints.
    pub fn with_breakpoint_alias(mut self, name: impl Into<String>, pixels: f64) -> Self {
        self.aliases.insert(name.into(), pixels);
        self
    }

    /// Adds or replaces a scale, returning the updated theme.
    pub fn with_scale<K, V>(mut self, name: ScaleName, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let scale = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.scales.insert(name, scale);
        self
    }

    /// Ascending breakpoint pixel values.
    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    /// Named breakpoints, in the order they were declared.
    pub fn breakpoint_aliases(&self) -> impl Iterator<Item = (&str, f64)> {
        self.aliases.iter().map(|(name, px)| (name.as_str(), *px))
    }

    /// Responsive index of a named breakpoint (`1` for the first breakpoint).
    pub fn breakpoint_index(&self, alias: &str) -> Option<usize> {
        let px = *self.aliases.get(alias)?;
        self.breakpoints
            .iter()
            .position(|bp| *bp == px)
            .map(|i| i + 1)
    }

    /// Minimum viewport width for a responsive index; `None` for the base
    /// index and for indices past the last breakpoint.
    pub fn min_width(&self, index: usize) -> Option<f64> {
        index
            .checked_sub(1)
            .and_then(|i| self.breakpoints.get(i).copied())
    }

    /// Media condition for a responsive index, e.g. `(min-width: 640px)`.
    pub fn media_query(&self, index: usize) -> Option<String> {
        self.min_width(index).map(media_condition)
    }

    pub fn scale(&self, name: ScaleName) -> Option<&Scale> {
        self.scales.get(&name)
    }

    pub fn has_scale(&self, name: ScaleName) -> bool {
        self.scales.contains_key(&name)
    }

    /// Scales present in this theme.
    pub fn scale_names(&self) -> impl Iterator<Item = ScaleName> + '_ {
        ScaleName::ALL
            .into_iter()
            .filter(move |name| self.scales.contains_key(name))
    }

    /// Looks `raw` up in a scale, falling back to `raw` itself.
    ///
    /// Lookup is an exact match on the token key; resolution never fails.
    pub fn resolve<'a>(&'a self, scale: ScaleName, raw: &'a str) -> &'a str {
        self.scales
            .get(&scale)
            .and_then(|entries| entries.get(raw))
            .map_or(raw, String::as_str)
    }

    /// Resolves a raw token to CSS text.
    ///
    /// Numbers are looked up by their canonical text. For scales that
    /// [allow negation](ScaleName::allows_negation), a negative token whose
    /// magnitude is a scale key resolves to the negated scale value; an
    /// exact match on the signed key still takes precedence.
    pub fn resolve_token(&self, scale: Option<ScaleName>, token: &Token) -> Cow<'_, str> {
        let key = token.to_key();
        let Some((name, entries)) = scale.and_then(|name| Some((name, self.scales.get(&name)?))) else {
            return Cow::Owned(key);
        };

        if let Some(value) = entries.get(&key) {
            return Cow::Borrowed(value.as_str());
        }
        if name.allows_negation() {
            if let Some(value) = token.negated_key().and_then(|k| entries.get(&k)) {
                return Cow::Owned(negate_css(value));
            }
        }
        Cow::Owned(key)
    }
}

/// Sorts, deduplicates and filters breakpoint pixel values.
fn normalize_breakpoints(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut breakpoints: Vec<f64> = values
        .into_iter()
        .filter(|bp| bp.is_finite() && *bp > 0.0)
        .collect();
    breakpoints.sort_by(f64::total_cmp);
    breakpoints.dedup();
    breakpoints
}

pub(crate) fn media_condition(min_width: f64) -> String {
    format!("(min-width: {}px)", format_number(min_width))
}

/// Flips the sign of a CSS length.
fn negate_css(value: &str) -> String {
    let value = value.trim();
    if let Some(positive) = value.strip_prefix('-') {
        return positive.to_string();
    }
    match value.chars().next() {
        Some(c) if c.is_ascii_digit() || c == '.' => {
            let end = value
                .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                .unwrap_or(value.len());
            // zero stays unsigned whatever its unit
            match value[..end].parse::<f64>() {
                Ok(magnitude) if magnitude == 0.0 => value.to_string(),
                _ => format!("-{}", value),
            }
        }
        _ => format!("calc(-1 * {})", value),
    }
}
