//! Scale names and the scale map type.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Token key to CSS value, in declaration order.
pub type Scale = IndexMap<String, String>;

/// The fixed set of scales a theme can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleName {
    Spacing,
    Size,
    FontFamily,
    FontWeight,
    FontSize,
    LineHeight,
    Color,
    LetterSpacing,
    Border,
    BorderWidth,
    Radius,
    Shadow,
    ZIndex,
}

impl ScaleName {
    /// Every scale, in declaration order.
    pub const ALL: [ScaleName; 13] = [
        ScaleName::Spacing,
        ScaleName::Size,
        ScaleName::FontFamily,
        ScaleName::FontWeight,
        ScaleName::FontSize,
        ScaleName::LineHeight,
        ScaleName::Color,
        ScaleName::LetterSpacing,
        ScaleName::Border,
        ScaleName::BorderWidth,
        ScaleName::Radius,
        ScaleName::Shadow,
        ScaleName::ZIndex,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScaleName::Spacing => "spacing",
            ScaleName::Size => "size",
            ScaleName::FontFamily => "fontFamily",
            ScaleName::FontWeight => "fontWeight",
            ScaleName::FontSize => "fontSize",
            ScaleName::LineHeight => "lineHeight",
            ScaleName::Color => "color",
            ScaleName::LetterSpacing => "letterSpacing",
            ScaleName::Border => "border",
            ScaleName::BorderWidth => "borderWidth",
            ScaleName::Radius => "radius",
            ScaleName::Shadow => "shadow",
            ScaleName::ZIndex => "zIndex",
        }
    }

    /// Whether a negative token may resolve to a negated scale value.
    ///
    /// Only length scales have a meaningful negative: `m: -2` is a
    /// negative margin, `zIndex: -2` is just the literal `-2`.
    pub fn allows_negation(self) -> bool {
        matches!(self, ScaleName::Spacing | ScaleName::Size)
    }
}

impl std::fmt::Display for ScaleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
