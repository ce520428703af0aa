//! Raw style tokens.

use serde::{Deserialize, Serialize};

/// A raw value as written in a theme or a style object.
///
/// Numbers and strings are kept apart until they are looked up: a number is
/// rendered canonically (`4`, `1.5`) to form a scale key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Token {
    Number(f64),
    Text(String),
}

impl Token {
    /// The token as a scale key or literal CSS text.
    pub fn to_key(&self) -> String {
        match self {
            Token::Number(n) => format_number(*n),
            Token::Text(s) => s.clone(),
        }
    }

    /// Splits a leading minus sign off the token.
    ///
    /// Returns the unsigned key when the token is negative, `None` otherwise.
    pub(crate) fn negated_key(&self) -> Option<String> {
        match self {
            Token::Number(n) if *n < 0.0 => Some(format_number(-n)),
            Token::Text(s) => s
                .strip_prefix('-')
                .filter(|rest| !rest.is_empty() && !rest.starts_with('-'))
                .map(str::to_string),
            _ => None,
        }
    }
}

impl From<f64> for Token {
    fn from(n: f64) -> Self {
        Token::Number(n)
    }
}

impl From<i32> for Token {
    fn from(n: i32) -> Self {
        Token::Number(f64::from(n))
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token::Text(s.to_string())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Token::Text(s)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_key())
    }
}

/// Renders a number the way it would be written in a stylesheet.
pub(crate) fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Collapses -0 as well.
        return "0".to_string();
    }
    format!("{}", n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keys() {
        assert_eq!(Token::from(4).to_key(), "4");
        assert_eq!(Token::from(1.5).to_key(), "1.5");
        assert_eq!(Token::from(-0.0).to_key(), "0");
    }

    #[test]
    fn test_text_key_is_verbatim() {
        assert_eq!(Token::from("primary").to_key(), "primary");
    }

    #[test]
    fn test_negated_key() {
        assert_eq!(Token::from(-4).negated_key().as_deref(), Some("4"));
        assert_eq!(Token::from("-md").negated_key().as_deref(), Some("md"));
        assert_eq!(Token::from(4).negated_key(), None);
        assert_eq!(Token::from("md").negated_key(), None);
        assert_eq!(Token::from("-").negated_key(), None);
        assert_eq!(Token::from("--var").negated_key(), None);
    }

    #[test]
    fn test_deserialize_untagged() {
        let tokens: Vec<Token> = serde_json::from_str(r#"[4, "red", 0.5]"#).unwrap();
        assert_eq!(
            tokens,
            vec![Token::from(4), Token::from("red"), Token::from(0.5)]
        );
    }
}
