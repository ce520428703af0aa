//! Prop alias expansion.
//!
//! Every prop key is expanded through a static table into the CSS
//! properties it sets and the scale its values are looked up in. Keys not
//! in the table are taken as CSS property names (camelCase becomes
//! kebab-case) with no scale, so their values pass through literally.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::theme::ScaleName;
use crate::theme::ScaleName::*;

/// What a prop alias expands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shorthand {
    pub properties: &'static [&'static str],
    pub scale: Option<ScaleName>,
}

#[rustfmt::skip]
const SHORTHAND_TABLE: &[(&str, &[&str], Option<ScaleName>)] = &[
    // Margin
    ("m", &["margin"], Some(Spacing)),
    ("margin", &["margin"], Some(Spacing)),
    ("mt", &["margin-top"], Some(Spacing)),
    ("marginTop", &["margin-top"], Some(Spacing)),
    ("mr", &["margin-right"], Some(Spacing)),
    ("marginRight", &["margin-right"], Some(Spacing)),
    ("mb", &["margin-bottom"], Some(Spacing)),
    ("marginBottom", &["margin-bottom"], Some(Spacing)),
    ("ml", &["margin-left"], Some(Spacing)),
    ("marginLeft", &["margin-left"], Some(Spacing)),
    ("mx", &["margin-left", "margin-right"], Some(Spacing)),
    ("marginX", &["margin-left", "margin-right"], Some(Spacing)),
    ("my", &["margin-top", "margin-bottom"], Some(Spacing)),
    ("marginY", &["margin-top", "margin-bottom"], Some(Spacing)),
    // Padding
    ("p", &["padding"], Some(Spacing)),
    ("padding", &["padding"], Some(Spacing)),
    ("pt", &["padding-top"], Some(Spacing)),
    ("paddingTop", &["padding-top"], Some(Spacing)),
    ("pr", &["padding-right"], Some(Spacing)),
    ("paddingRight", &["padding-right"], Some(Spacing)),
    ("pb", &["padding-bottom"], Some(Spacing)),
    ("paddingBottom", &["padding-bottom"], Some(Spacing)),
    ("pl", &["padding-left"], Some(Spacing)),
    ("paddingLeft", &["padding-left"], Some(Spacing)),
    ("px", &["padding-left", "padding-right"], Some(Spacing)),
    ("paddingX", &["padding-left", "padding-right"], Some(Spacing)),
    ("py", &["padding-top", "padding-bottom"], Some(Spacing)),
    ("paddingY", &["padding-top", "padding-bottom"], Some(Spacing)),
    // Gaps and offsets
    ("gap", &["gap"], Some(Spacing)),
    ("gridGap", &["gap"], Some(Spacing)),
    ("rowGap", &["row-gap"], Some(Spacing)),
    ("gridRowGap", &["row-gap"], Some(Spacing)),
    ("columnGap", &["column-gap"], Some(Spacing)),
    ("gridColumnGap", &["column-gap"], Some(Spacing)),
    ("top", &["top"], Some(Spacing)),
    ("right", &["right"], Some(Spacing)),
    ("bottom", &["bottom"], Some(Spacing)),
    ("left", &["left"], Some(Spacing)),
    ("inset", &["inset"], Some(Spacing)),
    // Sizes
    ("width", &["width"], Some(Size)),
    ("height", &["height"], Some(Size)),
    ("minWidth", &["min-width"], Some(Size)),
    ("maxWidth", &["max-width"], Some(Size)),
    ("minHeight", &["min-height"], Some(Size)),
    ("maxHeight", &["max-height"], Some(Size)),
    ("flexBasis", &["flex-basis"], Some(Size)),
    ("size", &["width", "height"], Some(Size)),
    // Colors
    ("color", &["color"], Some(Color)),
    ("bg", &["background-color"], Some(Color)),
    ("backgroundColor", &["background-color"], Some(Color)),
    ("borderColor", &["border-color"], Some(Color)),
    ("borderTopColor", &["border-top-color"], Some(Color)),
    ("borderRightColor", &["border-right-color"], Some(Color)),
    ("borderBottomColor", &["border-bottom-color"], Some(Color)),
    ("borderLeftColor", &["border-left-color"], Some(Color)),
    ("outlineColor", &["outline-color"], Some(Color)),
    ("caretColor", &["caret-color"], Some(Color)),
    ("textDecorationColor", &["text-decoration-color"], Some(Color)),
    ("columnRuleColor", &["column-rule-color"], Some(Color)),
    ("fill", &["fill"], Some(Color)),
    ("stroke", &["stroke"], Some(Color)),
    // Typography
    ("fontFamily", &["font-family"], Some(FontFamily)),
    ("fontSize", &["font-size"], Some(FontSize)),
    ("fontWeight", &["font-weight"], Some(FontWeight)),
    ("lineHeight", &["line-height"], Some(LineHeight)),
    ("letterSpacing", &["letter-spacing"], Some(LetterSpacing)),
    // Borders
    ("border", &["border"], Some(Border)),
    ("borderTop", &["border-top"], Some(Border)),
    ("borderRight", &["border-right"], Some(Border)),
    ("borderBottom", &["border-bottom"], Some(Border)),
    ("borderLeft", &["border-left"], Some(Border)),
    ("borderX", &["border-left", "border-right"], Some(Border)),
    ("borderY", &["border-top", "border-bottom"], Some(Border)),
    ("borderWidth", &["border-width"], Some(BorderWidth)),
    ("borderTopWidth", &["border-top-width"], Some(BorderWidth)),
    ("borderRightWidth", &["border-right-width"], Some(BorderWidth)),
    ("borderBottomWidth", &["border-bottom-width"], Some(BorderWidth)),
    ("borderLeftWidth", &["border-left-width"], Some(BorderWidth)),
    ("borderRadius", &["border-radius"], Some(Radius)),
    ("borderTopLeftRadius", &["border-top-left-radius"], Some(Radius)),
    ("borderTopRightRadius", &["border-top-right-radius"], Some(Radius)),
    ("borderBottomRightRadius", &["border-bottom-right-radius"], Some(Radius)),
    ("borderBottomLeftRadius", &["border-bottom-left-radius"], Some(Radius)),
    // Effects and stacking
    ("boxShadow", &["box-shadow"], Some(Shadow)),
    ("textShadow", &["text-shadow"], Some(Shadow)),
    ("zIndex", &["z-index"], Some(ZIndex)),
];

static SHORTHANDS: Lazy<HashMap<&'static str, Shorthand>> = Lazy::new(|| {
    SHORTHAND_TABLE
        .iter()
        .map(|&(alias, properties, scale)| (alias, Shorthand { properties, scale }))
        .collect()
});

/// Looks up a prop alias in the shorthand table.
pub fn shorthand(alias: &str) -> Option<Shorthand> {
    SHORTHANDS.get(alias).copied()
}

/// Every alias the table knows, in table order.
pub fn aliases() -> impl Iterator<Item = &'static str> {
    SHORTHAND_TABLE.iter().map(|(alias, _, _)| *alias)
}

/// CSS properties and scale for a prop key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub properties: Vec<String>,
    pub scale: Option<ScaleName>,
}

/// Expands a prop key, falling back to a plain CSS property.
pub fn expand(key: &str) -> Expansion {
    match shorthand(key) {
        Some(Shorthand { properties, scale }) => Expansion {
            properties: properties.iter().map(|p| p.to_string()).collect(),
            scale,
        },
        None => Expansion {
            properties: vec![css_property_name(key)],
            scale: None,
        },
    }
}

/// Converts a camelCase prop key to a CSS property name.
///
/// Names that already contain a dash (including custom properties) are
/// returned unchanged. A leading capital marks a vendor prefix
/// (`WebkitAppearance` becomes `-webkit-appearance`), as does a leading
/// `ms` followed by a capital.
pub fn css_property_name(key: &str) -> String {
    if key.contains('-') {
        return key.to_string();
    }

    let mut name = String::with_capacity(key.len() + 4);
    let mut rest = key;
    if let Some(stripped) = key.strip_prefix("ms") {
        if stripped.starts_with(|c: char| c.is_ascii_uppercase()) {
            name.push_str("-ms");
            rest = stripped;
        }
    }
    for c in rest.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}
