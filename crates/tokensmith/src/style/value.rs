//! Style-prop objects and their values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diagnostics::{Diagnostics, Outcome};
use crate::error::Result;
use crate::theme::{kind_of, Token};

/// The value of one style prop.
///
/// Deserializes from JSON naturally: a number or string is a single token,
/// an array is a base-first responsive list, an object is keyed by
/// breakpoint (`_`/`base`, an index, or a breakpoint alias) and `null`
/// leaves the prop unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// One value for every viewport.
    Token(Token),
    /// Index 0 is the base value, index `i` applies from breakpoint `i`.
    Responsive(Vec<Option<Token>>),
    /// Values keyed by breakpoint name or index.
    Keyed(IndexMap<String, Option<Token>>),
    /// No value; nothing is emitted.
    Unset,
}

impl StyleValue {
    /// Builds a base-first responsive value.
    pub fn responsive<T: Into<Token>>(values: impl IntoIterator<Item = T>) -> Self {
        StyleValue::Responsive(values.into_iter().map(|v| Some(v.into())).collect())
    }

    /// Builds a value keyed by breakpoint.
    pub fn keyed<K: Into<String>, T: Into<Token>>(values: impl IntoIterator<Item = (K, T)>) -> Self {
        StyleValue::Keyed(
            values
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        )
    }
}

impl From<Token> for StyleValue {
    fn from(token: Token) -> Self {
        StyleValue::Token(token)
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        StyleValue::Token(n.into())
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Token(n.into())
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Token(s.into())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Token(s.into())
    }
}

impl From<Vec<Option<Token>>> for StyleValue {
    fn from(values: Vec<Option<Token>>) -> Self {
        StyleValue::Responsive(values)
    }
}

/// An ordered style-prop object, e.g. `{ px: 4, color: "primary" }`.
///
/// Insertion order is kept and drives emission order. Setting a prop that
/// is already present replaces its value in place, like re-assigning a key
/// of a JavaScript object literal.
///
/// # Example
///
/// ```rust
/// use tokensmith::{StyleProps, StyleValue};
///
/// let props = StyleProps::new()
///     .set("color", "red")
///     .set("px", StyleValue::responsive([2, 4]))
///     .set("color", "green");
///
/// let keys: Vec<&str> = props.iter().map(|(k, _)| k).collect();
/// assert_eq!(keys, vec!["color", "px"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleProps(IndexMap<String, StyleValue>);

impl StyleProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a style-prop object from JSON text.
    ///
    /// Only a JSON syntax error fails; malformed props are dropped as in
    /// [`StyleProps::from_value`].
    pub fn from_json_str(source: &str) -> Result<Outcome<Self>> {
        let value: Value = serde_json::from_str(source)?;
        let mut diagnostics = Diagnostics::new();
        let props = Self::from_value(&value, &mut diagnostics);
        Ok(Outcome::new(props, diagnostics))
    }

    /// Builds style props from a JSON object, keeping every prop that
    /// converts.
    ///
    /// A prop whose value is not a token, list, object or `null` is
    /// skipped with a warning. A malformed entry inside a responsive list
    /// becomes a hole so later indices keep their breakpoints; a malformed
    /// keyed entry is dropped.
    pub fn from_value(value: &Value, diagnostics: &mut Diagnostics) -> Self {
        let Value::Object(entries) = value else {
            diagnostics.warn_once(format!(
                "style props must be an object, found {}",
                kind_of(value)
            ));
            return Self::new();
        };

        let mut props = Self::new();
        for (key, value) in entries {
            if let Some(value) = style_value(key, value, diagnostics) {
                props.insert(key.as_str(), value);
            }
        }
        props
    }

    /// Sets a prop, returning the updated object for chaining.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a prop in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn style_value(prop: &str, value: &Value, diagnostics: &mut Diagnostics) -> Option<StyleValue> {
    match value {
        Value::Null => Some(StyleValue::Unset),
        Value::Array(items) => Some(StyleValue::Responsive(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| entry_token(prop, &index.to_string(), item, diagnostics))
                .collect(),
        )),
        Value::Object(items) => Some(StyleValue::Keyed(
            items
                .iter()
                .filter_map(|(key, item)| {
                    if item.is_null() {
                        return Some((key.clone(), None));
                    }
                    entry_token(prop, key, item, diagnostics).map(|token| (key.clone(), Some(token)))
                })
                .collect(),
        )),
        other => {
            let token = token_of(other);
            if token.is_none() {
                diagnostics.warn_once(format!(
                    "ignoring style prop {:?}: expected a token, list or object, found {}",
                    prop,
                    kind_of(other)
                ));
            }
            token.map(StyleValue::Token)
        }
    }
}

/// Converts one entry of a responsive or keyed value; `null` is a hole.
fn entry_token(prop: &str, entry: &str, value: &Value, diagnostics: &mut Diagnostics) -> Option<Token> {
    if value.is_null() {
        return None;
    }
    let token = token_of(value);
    if token.is_none() {
        diagnostics.warn_once(format!(
            "ignoring entry {:?} of style prop {:?}: expected a number or string, found {}",
            entry,
            prop,
            kind_of(value)
        ));
    }
    token
}

fn token_of(value: &Value) -> Option<Token> {
    match value {
        Value::Number(n) => n.as_f64().map(Token::Number),
        Value::String(s) => Some(Token::Text(s.clone())),
        _ => None,
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleProps {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = StyleProps::new();
        for (key, value) in iter {
            props.insert(key, value);
        }
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_shapes() {
        let outcome = StyleProps::from_json_str(
            r#"{ "px": 4, "color": "red", "m": [0, null, 2], "p": { "_": 1, "md": 3 }, "bg": null }"#,
        )
        .unwrap();
        assert!(outcome.diagnostics.is_empty());
        let props = outcome.into_value();

        assert_eq!(props.get("px"), Some(&StyleValue::from(4)));
        assert_eq!(props.get("color"), Some(&StyleValue::from("red")));
        assert_eq!(
            props.get("m"),
            Some(&StyleValue::Responsive(vec![
                Some(Token::from(0)),
                None,
                Some(Token::from(2))
            ]))
        );
        assert!(matches!(props.get("p"), Some(StyleValue::Keyed(_))));
        assert_eq!(props.get("bg"), Some(&StyleValue::Unset));
    }

    #[test]
    fn test_json_key_order_preserved() {
        let props = StyleProps::from_json_str(r#"{ "z": 1, "a": 2, "m": 3 }"#)
            .unwrap()
            .into_value();
        let keys: Vec<&str> = props.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let props = StyleProps::new()
            .set("color", "red")
            .set("bg", "blue")
            .set("color", "green");

        let entries: Vec<(&str, &StyleValue)> = props.iter().collect();
        assert_eq!(entries[0], ("color", &StyleValue::from("green")));
        assert_eq!(entries[1], ("bg", &StyleValue::from("blue")));
    }

    #[test]
    fn test_from_iterator() {
        let props: StyleProps = vec![("p", 1), ("m", 2)].into_iter().collect();
        assert_eq!(props.len(), 2);
        assert!(!props.is_empty());
    }

    #[test]
    fn test_keyed_builder() {
        let value = StyleValue::keyed([("_", 1), ("sm", 2)]);
        let StyleValue::Keyed(entries) = value else {
            panic!("expected keyed value");
        };
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_malformed_prop_is_skipped() {
        let (props, diagnostics) = StyleProps::from_json_str(r#"{"color":"red","px":4,"display":true}"#)
            .unwrap()
            .into_parts();

        assert_eq!(props.len(), 2);
        assert_eq!(props.get("color"), Some(&StyleValue::from("red")));
        assert_eq!(props.get("px"), Some(&StyleValue::from(4)));
        assert!(props.get("display").is_none());
        assert_eq!(diagnostics.warnings().count(), 1);
        assert!(diagnostics.records()[0].message.contains("display"));
    }

    #[test]
    fn test_malformed_nested_entries_degrade() {
        let (props, diagnostics) = StyleProps::from_json_str(
            r#"{ "color": "red", "p": { "_": 1, "md": [2] }, "m": [1, { "x": 1 }, 3] }"#,
        )
        .unwrap()
        .into_parts();

        assert_eq!(props.get("color"), Some(&StyleValue::from("red")));
        let Some(StyleValue::Keyed(entries)) = props.get("p") else {
            panic!("expected keyed value");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get("_"), Some(&Some(Token::from(1))));
        assert_eq!(
            props.get("m"),
            Some(&StyleValue::Responsive(vec![Some(Token::from(1)), None, Some(Token::from(3))]))
        );
        assert_eq!(diagnostics.warnings().count(), 2);
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn test_non_object_props() {
        let (props, diagnostics) = StyleProps::from_json_str("[1, 2]").unwrap().into_parts();
        assert!(props.is_empty());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_json_syntax_error() {
        assert!(StyleProps::from_json_str(r#"{ "px": "#).is_err());
    }
}
