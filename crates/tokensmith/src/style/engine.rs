//! Style resolution: style-prop objects to atomic class names.

use indexmap::IndexMap;

use super::cache::{ClassName, DeclarationCache, DeclarationKey};
use super::shorthand::expand;
use super::value::{StyleProps, StyleValue};
use crate::diagnostics::{Diagnostics, Outcome};
use crate::theme::{Theme, Token};

/// Keys of a keyed responsive value that mean "no breakpoint".
const BASE_KEYS: [&str; 2] = ["_", "base"];

/// A resolved declaration, before it is folded into the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub breakpoint: usize,
}

/// Resolves style-prop objects against a theme into cached atomic rules.
///
/// For each prop, in insertion order, the alias is expanded into CSS
/// properties, responsive values are split per breakpoint, and every value
/// is resolved through the theme's scales. When the same property is set
/// more than once at the same breakpoint (for example by `px` and then
/// `paddingLeft`) the last declaration wins, keeping the position where
/// the property first appeared.
///
/// # Example
///
/// ```rust
/// use tokensmith::{DeclarationCache, ScaleName, StyleEngine, StyleProps, Theme};
///
/// let theme = Theme::new()
///     .with_scale(ScaleName::Spacing, [("4", "1rem")])
///     .with_scale(ScaleName::Color, [("red", "#ff0000")]);
/// let cache = DeclarationCache::new();
/// let engine = StyleEngine::new(&theme, &cache);
///
/// let classes = engine
///     .resolve(&StyleProps::new().set("px", 4).set("color", "red"))
///     .into_value();
///
/// assert_eq!(classes.len(), 3);
/// assert!(cache.to_css().contains("padding-left:1rem"));
/// assert!(cache.to_css().contains("color:#ff0000"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StyleEngine<'a> {
    theme: &'a Theme,
    cache: &'a DeclarationCache,
}

impl<'a> StyleEngine<'a> {
    pub fn new(theme: &'a Theme, cache: &'a DeclarationCache) -> Self {
        Self { theme, cache }
    }

    pub fn theme(&self) -> &'a Theme {
        self.theme
    }

    pub fn cache(&self) -> &'a DeclarationCache {
        self.cache
    }

    /// Resolves a style-prop object into ordered class names.
    pub fn resolve(&self, props: &StyleProps) -> Outcome<Vec<ClassName>> {
        let mut diagnostics = Diagnostics::new();
        let classes = self.resolve_with(props, &mut diagnostics);
        Outcome::new(classes, diagnostics)
    }

    /// Resolves a style-prop object, reporting into a caller-owned collector.
    pub fn resolve_with(&self, props: &StyleProps, diagnostics: &mut Diagnostics) -> Vec<ClassName> {
        self.declarations(props, diagnostics)
            .into_iter()
            .map(|declaration| {
                let min_width = self.theme.min_width(declaration.breakpoint);
                let key = DeclarationKey {
                    property: declaration.property,
                    value: declaration.value,
                    breakpoint: declaration.breakpoint,
                };
                self.cache.get_or_insert(key, min_width)
            })
            .collect()
    }

    /// Resolves a style-prop object into its final declarations without
    /// touching the cache.
    pub fn declarations(&self, props: &StyleProps, diagnostics: &mut Diagnostics) -> Vec<Declaration> {
        // (property, breakpoint) -> value; re-inserting keeps the first position
        let mut slots: IndexMap<(String, usize), String> = IndexMap::new();

        for (key, value) in props.iter() {
            let expansion = expand(key);
            for (breakpoint, token) in self.responsive_entries(key, value, diagnostics) {
                let resolved = self.theme.resolve_token(expansion.scale, token);
                for property in &expansion.properties {
                    slots.insert((property.clone(), breakpoint), resolved.to_string());
                }
            }
        }

        slots
            .into_iter()
            .map(|((property, breakpoint), value)| Declaration {
                property,
                value,
                breakpoint,
            })
            .collect()
    }

    /// Splits a prop value into `(breakpoint index, token)` pairs.
    fn responsive_entries<'v>(
        &self,
        key: &str,
        value: &'v StyleValue,
        diagnostics: &mut Diagnostics,
    ) -> Vec<(usize, &'v Token)> {
        let entries: Vec<(usize, &'v Token)> = match value {
            StyleValue::Unset => Vec::new(),
            StyleValue::Token(token) => vec![(0, token)],
            StyleValue::Responsive(items) => items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| item.as_ref().map(|token| (i, token)))
                .collect(),
            StyleValue::Keyed(items) => items
                .iter()
                .filter_map(|(name, item)| {
                    let token = item.as_ref()?;
                    match self.keyed_index(name) {
                        Some(index) => Some((index, token)),
                        None => {
                            diagnostics.warn_once(format!(
                                "Unknown breakpoint \"{}\" in the value of \"{}\"; it was ignored.",
                                name, key
                            ));
                            None
                        }
                    }
                })
                .collect(),
        };

        let available = self.theme.breakpoints().len();
        entries
            .into_iter()
            .filter(|(index, token)| {
                if *index > available {
                    diagnostics.warn_once(format!(
                        "The value of \"{}\" at breakpoint index {} has no matching breakpoint; it was ignored.",
                        key, index
                    ));
                    return false;
                }
                !matches!(token, Token::Text(text) if text.is_empty())
            })
            .collect()
    }

    fn keyed_index(&self, name: &str) -> Option<usize> {
        if BASE_KEYS.contains(&name) {
            return Some(0);
        }
        name.parse()
            .ok()
            .or_else(|| self.theme.breakpoint_index(name))
    }
}
