//! Conversion from Theme UI shaped token objects.
//!
//! A [Theme UI](https://theme-ui.com/theme-spec) theme groups its tokens
//! under well-known keys (`space`, `colors`, `fontSizes`, ...). Each known
//! group maps onto one [`ScaleName`]; `breakpoints` goes through the unit
//! parser. Conversion is tolerant: whatever cannot be converted is dropped
//! and reported through [`Diagnostics`], and a best-effort [`Theme`] is
//! always produced.
//!
//! | Theme UI key | Scale |
//! |--------------|-------|
//! | `space` | [`ScaleName::Spacing`] |
//! | `sizes` | [`ScaleName::Size`] |
//! | `fonts` | [`ScaleName::FontFamily`] |
//! | `fontWeights` | [`ScaleName::FontWeight`] |
//! | `fontSizes` | [`ScaleName::FontSize`] |
//! | `lineHeights` | [`ScaleName::LineHeight`] |
//! | `colors` | [`ScaleName::Color`] |
//! | `letterSpacings` | [`ScaleName::LetterSpacing`] |
//! | `borders` | [`ScaleName::Border`] |
//! | `borderWidths` | [`ScaleName::BorderWidth`] |
//! | `radii` | [`ScaleName::Radius`] |
//! | `shadows` | [`ScaleName::Shadow`] |
//! | `zIndices` | [`ScaleName::ZIndex`] |

use serde_json::{Map, Value};

use super::breakpoint::parse_breakpoint_with;
use super::scale::{Scale, ScaleName};
use super::theme::Theme;
use super::token::{format_number, Token};
use crate::config::Config;
use crate::diagnostics::{Diagnostics, Outcome};
use crate::error::Result;

const BREAKPOINTS_KEY: &str = "breakpoints";
const COLOR_MODES_KEY: &str = "modes";

/// Theme UI token groups and the scale each one becomes.
pub const THEME_UI_SCALES: [(&str, ScaleName); 13] = [
    ("space", ScaleName::Spacing),
    ("sizes", ScaleName::Size),
    ("fonts", ScaleName::FontFamily),
    ("fontWeights", ScaleName::FontWeight),
    ("fontSizes", ScaleName::FontSize),
    ("lineHeights", ScaleName::LineHeight),
    ("colors", ScaleName::Color),
    ("letterSpacings", ScaleName::LetterSpacing),
    ("borders", ScaleName::Border),
    ("borderWidths", ScaleName::BorderWidth),
    ("radii", ScaleName::Radius),
    ("shadows", ScaleName::Shadow),
    ("zIndices", ScaleName::ZIndex),
];

/// Converts a Theme UI theme with the default configuration.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use tokensmith::{from_theme_ui, ScaleName};
///
/// let outcome = from_theme_ui(&json!({
///     "breakpoints": ["40em", "52em"],
///     "colors": { "text": "#000", "modes": { "dark": { "text": "#fff" } } },
///     "space": [0, 4, 8],
/// }));
///
/// let theme = outcome.value;
/// assert_eq!(theme.breakpoints(), &[640.0, 832.0]);
/// assert_eq!(theme.resolve(ScaleName::Color, "text"), "#000");
/// assert_eq!(theme.resolve(ScaleName::Spacing, "2"), "8");
/// assert_eq!(outcome.diagnostics.warnings().count(), 3);
/// ```
pub fn from_theme_ui(external: &Value) -> Outcome<Theme> {
    let mut diagnostics = Diagnostics::new();
    let theme = from_theme_ui_with(external, &Config::default(), &mut diagnostics);
    Outcome::new(theme, diagnostics)
}

/// Converts a Theme UI theme, reporting into a caller-owned collector.
///
/// Reusing one collector across calls keeps warnings once-only for the
/// whole session.
pub fn from_theme_ui_with(external: &Value, config: &Config, diagnostics: &mut Diagnostics) -> Theme {
    let Value::Object(groups) = external else {
        diagnostics.warn_once(format!(
            "Expected the theme to be an object but got {}; nothing was converted.",
            kind_of(external)
        ));
        return Theme::new();
    };

    report_unknown_groups(groups, diagnostics);

    let mut theme = convert_breakpoints(groups.get(BREAKPOINTS_KEY), config, diagnostics);

    for (key, scale) in THEME_UI_SCALES {
        let Some(group) = groups.get(key) else {
            continue;
        };
        let entries = if scale == ScaleName::Color {
            convert_colors(group, diagnostics)
        } else {
            convert_scale(key, group, diagnostics)
        };
        if let Some(entries) = entries {
            theme = theme.with_scale(scale, entries);
        }
    }

    theme
}

impl Theme {
    /// Converts a Theme UI value; see [`from_theme_ui`].
    pub fn from_theme_ui(external: &Value) -> Outcome<Theme> {
        from_theme_ui(external)
    }

    /// Decodes JSON text and converts it as a Theme UI theme.
    ///
    /// Fails only when the text is not JSON; conversion problems land in
    /// the returned diagnostics.
    pub fn from_theme_ui_json(source: &str) -> Result<Outcome<Theme>> {
        let value: Value = serde_json::from_str(source)?;
        Ok(from_theme_ui(&value))
    }

    /// Decodes YAML text and converts it as a Theme UI theme.
    pub fn from_theme_ui_yaml(source: &str) -> Result<Outcome<Theme>> {
        let value: serde_yaml::Value = serde_yaml::from_str(source)?;
        Ok(from_theme_ui(&yaml_to_json(value)))
    }
}

/// Reports every group this converter does not understand in one warning.
fn report_unknown_groups(groups: &Map<String, Value>, diagnostics: &mut Diagnostics) {
    let unknown: Vec<String> = groups
        .keys()
        .filter(|key| {
            key.as_str() != BREAKPOINTS_KEY && !THEME_UI_SCALES.iter().any(|(known, _)| *known == key.as_str())
        })
        .map(|key| format!("\"{}\"", key))
        .collect();

    if !unknown.is_empty() {
        diagnostics.warn_once(format!(
            "The following theme tokens can't be converted and have no effect: {}.",
            unknown.join(", ")
        ));
    }
}

fn convert_breakpoints(group: Option<&Value>, config: &Config, diagnostics: &mut Diagnostics) -> Theme {
    let entries: Vec<(Option<&str>, &Value)> = match group {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(|v| (None, v)).collect(),
        Some(Value::Object(named)) => named.iter().map(|(k, v)| (Some(k.as_str()), v)).collect(),
        Some(single) => vec![(None, single)],
    };

    let mut pixels = Vec::with_capacity(entries.len());
    let mut aliases = Vec::new();
    for (alias, value) in entries {
        let Some(token) = breakpoint_token(value) else {
            continue;
        };
        let px = parse_breakpoint_with(&token, config.root_font_size, diagnostics);
        if px.is_nan() || px == 0.0 {
            continue;
        }
        if px < 0.0 || px.is_infinite() {
            diagnostics.error_once(format!(
                "Invalid breakpoint \"{}\": breakpoints must be positive.",
                token
            ));
            continue;
        }
        pixels.push(px);
        if let Some(alias) = alias {
            aliases.push((alias, px));
        }
    }

    aliases.into_iter().fold(
        Theme::new().with_breakpoints(pixels),
        |theme, (alias, px)| theme.with_breakpoint_alias(alias, px),
    )
}

fn breakpoint_token(value: &Value) -> Option<Token> {
    match value {
        Value::Null => None,
        Value::Number(n) => n.as_f64().map(Token::Number),
        Value::String(s) => Some(Token::Text(s.clone())),
        other => Some(Token::Text(other.to_string())),
    }
}

/// Keeps only string colors; nested color modes are reported and skipped.
fn convert_colors(group: &Value, diagnostics: &mut Diagnostics) -> Option<Scale> {
    if let Value::Object(colors) = group {
        if colors.contains_key(COLOR_MODES_KEY) {
            diagnostics.warn_once(
                "Color schemes (\"colors.modes\") are not supported; only the base colors were converted.",
            );
        }
    }

    let entries = group_entries("colors", group, diagnostics)?;
    Some(
        entries
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(color) => Some((key, color.clone())),
                _ => None,
            })
            .collect(),
    )
}

fn convert_scale(name: &str, group: &Value, diagnostics: &mut Diagnostics) -> Option<Scale> {
    let entries = group_entries(name, group, diagnostics)?;
    let mut scale = Scale::with_capacity(entries.len());
    for (key, value) in entries {
        match value {
            Value::String(css) => {
                scale.insert(key, css.clone());
            }
            Value::Number(n) => {
                if let Some(n) = n.as_f64() {
                    scale.insert(key, format_number(n));
                }
            }
            Value::Null => {}
            _ => {
                diagnostics.warn_once(format!(
                    "Theme token \"{}.{}\" is not a string or number and was skipped.",
                    name, key
                ));
            }
        }
    }
    Some(scale)
}

/// Lists a group's entries; arrays are keyed by index.
fn group_entries<'v>(
    name: &str,
    group: &'v Value,
    diagnostics: &mut Diagnostics,
) -> Option<Vec<(String, &'v Value)>> {
    match group {
        Value::Null => None,
        Value::Object(entries) => Some(entries.iter().map(|(k, v)| (k.clone(), v)).collect()),
        Value::Array(items) => Some(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        ),
        other => {
            diagnostics.warn_once(format!(
                "Theme token group \"{}\" must be an object or an array but is {}; it was ignored.",
                name,
                kind_of(other)
            ));
            None
        }
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Re-expresses a YAML document as JSON, stringifying scalar mapping keys.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(entries) => Value::Object(
            entries
                .into_iter()
                .filter_map(|(key, value)| {
                    let key = match key {
                        Yaml::String(s) => s,
                        Yaml::Number(n) => n.to_string(),
                        Yaml::Bool(b) => b.to_string(),
                        _ => return None,
                    };
                    Some((key, yaml_to_json(value)))
                })
                .collect(),
        ),
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn convert(value: Value) -> (Theme, Diagnostics) {
        from_theme_ui(&value).into_parts()
    }

    #[test]
    fn test_scales_map_one_to_one() {
        let (theme, diagnostics) = convert(json!({
            "space": { "4": "1rem" },
            "sizes": { "full": "100%" },
            "fonts": { "body": "system-ui" },
            "fontWeights": { "bold": 700 },
            "fontSizes": [12, 14],
            "lineHeights": { "body": 1.5 },
            "colors": { "red": "#ff0000" },
            "letterSpacings": { "wide": "0.1em" },
            "borders": { "thin": "1px solid" },
            "borderWidths": { "1": "1px" },
            "radii": { "sm": "4px" },
            "shadows": { "card": "0 0 4px rgba(0,0,0,.1)" },
            "zIndices": { "modal": 100 },
        }));

        assert!(diagnostics.is_empty());
        assert_eq!(theme.scale_names().count(), 13);
        assert_eq!(theme.resolve(ScaleName::Spacing, "4"), "1rem");
        assert_eq!(theme.resolve(ScaleName::FontWeight, "bold"), "700");
        assert_eq!(theme.resolve(ScaleName::FontSize, "1"), "14");
        assert_eq!(theme.resolve(ScaleName::LineHeight, "body"), "1.5");
        assert_eq!(theme.resolve(ScaleName::ZIndex, "modal"), "100");
        assert_eq!(theme.resolve(ScaleName::Shadow, "card"), "0 0 4px rgba(0,0,0,.1)");
    }

    #[test]
    fn test_breakpoints_array() {
        let (theme, diagnostics) = convert(json!({ "breakpoints": ["40em"] }));
        assert_eq!(theme.breakpoints(), &[640.0]);
        assert_eq!(diagnostics.warnings().count(), 1);
    }

    #[test]
    fn test_breakpoints_filter_invalid_and_sort() {
        let (theme, diagnostics) = convert(json!({
            "breakpoints": ["64em", 0, "10vh", "40em", "640px", null, -20, "oops"]
        }));
        assert_eq!(theme.breakpoints(), &[640.0, 1024.0]);
        // 10vh, -20, oops
        assert_eq!(diagnostics.errors().count(), 3);
    }

    #[test]
    fn test_breakpoints_object_keeps_aliases() {
        let (theme, _) = convert(json!({
            "breakpoints": { "md": "52em", "sm": "40em", "bad": "1vw" }
        }));
        assert_eq!(theme.breakpoints(), &[640.0, 832.0]);
        assert_eq!(theme.breakpoint_index("sm"), Some(1));
        assert_eq!(theme.breakpoint_index("md"), Some(2));
        assert_eq!(theme.breakpoint_index("bad"), None);
    }

    #[test]
    fn test_breakpoints_use_configured_root_font_size() {
        let mut diagnostics = Diagnostics::new();
        let config = Config::default().root_font_size(10.0);
        let theme = from_theme_ui_with(&json!({ "breakpoints": ["40em"] }), &config, &mut diagnostics);
        assert_eq!(theme.breakpoints(), &[400.0]);
    }

    #[test]
    fn test_color_modes_warn_and_are_dropped() {
        let (theme, diagnostics) = convert(json!({
            "colors": {
                "text": "#000",
                "modes": { "dark": { "text": "#fff" } },
            }
        }));

        let colors = theme.scale(ScaleName::Color).unwrap();
        assert_eq!(colors.len(), 1);
        assert_eq!(colors.get("text").map(String::as_str), Some("#000"));
        assert_eq!(diagnostics.warnings().count(), 1);
        assert!(diagnostics.records()[0].message.contains("Color schemes"));
    }

    #[test]
    fn test_non_string_colors_silently_filtered() {
        let (theme, diagnostics) = convert(json!({
            "colors": { "text": "#000", "gray": ["#111", "#222"], "n": 5, "nested": { "a": "#fff" } }
        }));
        assert_eq!(theme.scale(ScaleName::Color).unwrap().len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_groups_single_warning() {
        let (theme, diagnostics) = convert(json!({
            "space": [0, 4],
            "styles": {},
            "buttons": { "primary": {} },
            "config": { "useColorSchemeMediaQuery": true },
        }));

        assert_eq!(diagnostics.len(), 1);
        let message = &diagnostics.records()[0].message;
        assert!(message.contains("\"styles\", \"buttons\", \"config\""));
        assert!(theme.has_scale(ScaleName::Spacing));
    }

    #[test]
    fn test_unknown_group_warning_once_per_session() {
        let mut diagnostics = Diagnostics::new();
        let theme = json!({ "styles": {} });
        from_theme_ui_with(&theme, &Config::default(), &mut diagnostics);
        from_theme_ui_with(&theme, &Config::default(), &mut diagnostics);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_nested_scale_entries_skipped() {
        let (theme, diagnostics) = convert(json!({
            "sizes": { "container": { "max": "1200px" }, "full": "100%" }
        }));
        assert_eq!(theme.scale(ScaleName::Size).unwrap().len(), 1);
        assert_eq!(diagnostics.warnings().count(), 1);
    }

    #[test]
    fn test_scalar_group_ignored() {
        let (theme, diagnostics) = convert(json!({ "space": 4 }));
        assert!(!theme.has_scale(ScaleName::Spacing));
        assert_eq!(diagnostics.warnings().count(), 1);
    }

    #[test]
    fn test_non_object_theme() {
        for value in [json!(null), json!(42), json!("theme"), json!([1, 2])] {
            let (theme, diagnostics) = convert(value);
            assert_eq!(theme, Theme::new());
            assert_eq!(diagnostics.len(), 1);
        }
    }

    #[test]
    fn test_from_json_text() {
        let outcome = Theme::from_theme_ui_json(r#"{ "space": { "4": "1rem" } }"#).unwrap();
        assert_eq!(outcome.value.resolve(ScaleName::Spacing, "4"), "1rem");
        assert!(Theme::from_theme_ui_json("{").is_err());
    }

    #[test]
    fn test_from_yaml_text_with_numeric_keys() {
        let source = "breakpoints: [40em, 52em]\nspace:\n  4: 1rem\nfontWeights:\n  bold: 700\n";
        let outcome = Theme::from_theme_ui_yaml(source).unwrap();
        let theme = outcome.value;
        assert_eq!(theme.breakpoints(), &[640.0, 832.0]);
        assert_eq!(theme.resolve(ScaleName::Spacing, "4"), "1rem");
        assert_eq!(theme.resolve(ScaleName::FontWeight, "bold"), "700");
    }

    fn arbitrary_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(Value::from),
            "[a-z0-9%.]{0,6}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::vec(
                    (
                        prop_oneof![
                            Just("breakpoints".to_string()),
                            Just("colors".to_string()),
                            Just("space".to_string()),
                            Just("modes".to_string()),
                            "[a-z]{1,6}",
                        ],
                        inner
                    ),
                    0..6
                )
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_conversion_is_total(value in arbitrary_json()) {
            let theme = from_theme_ui(&value).value;
            let breakpoints = theme.breakpoints();
            prop_assert!(breakpoints.iter().all(|bp| bp.is_finite() && *bp > 0.0));
            prop_assert!(breakpoints.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
