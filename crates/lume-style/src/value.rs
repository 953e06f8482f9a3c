//! Sanitised CSS values.
//!
//! Attribute text lands inside a generated `<style>` block, so a value must
//! never be able to close its declaration, open a new rule, or leave the block.
//! [`CssValue::parse`] accepts a value only if it is a single declaration value
//! by the CSS tokenizer's own reading:
//!
//! - no `;`, `{`, `}` or unbalanced brackets at any nesting depth
//! - no `<`, `>` or `\` anywhere (the latter rules out escape sequences)
//! - no at-keywords, `!` delimiters, bad strings or bad urls
//! - no `expression()` functions
//!
//! Values that pass are stored trimmed and otherwise unchanged.

use std::fmt;

use cssparser::{ParseError, Parser, ParserInput, Token};

use crate::{Error, Result};

/// Longest value accepted, in bytes.
pub const MAX_VALUE_LEN: usize = 256;

/// A CSS value that is safe to interpolate into a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CssValue(String);

impl CssValue {
    /// Validate `raw` for use as the value of `property`.
    pub fn parse(property: &str, raw: &str) -> Result<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(Error::invalid_value(property, "value is empty"));
        }
        if value.len() > MAX_VALUE_LEN {
            return Err(Error::invalid_value(
                property,
                format!("value exceeds {MAX_VALUE_LEN} bytes"),
            ));
        }
        if let Some(c) = value
            .chars()
            .find(|c| matches!(c, ';' | '{' | '}' | '<' | '>' | '\\') || c.is_control())
        {
            return Err(Error::invalid_value(
                property,
                format!("character {c:?} is not allowed"),
            ));
        }

        if !is_balanced(value) {
            return Err(Error::invalid_value(
                property,
                "unbalanced brackets or quotes",
            ));
        }

        let mut input = ParserInput::new(value);
        let mut parser = Parser::new(&mut input);
        scan(&mut parser).map_err(|e| {
            let location = e.location;
            let message = match e.kind {
                cssparser::ParseErrorKind::Custom(reason) => reason.to_string(),
                cssparser::ParseErrorKind::Basic(basic) => format!("{basic:?}"),
            };
            Error::parse(
                format!("'{property}': {message}"),
                location.line + 1,
                location.column,
            )
        })?;

        Ok(Self(value.to_string()))
    }

    /// Wrap a value written in source code.
    ///
    /// Only for literals; attribute text must go through [`parse`](Self::parse).
    pub const fn trusted(value: &'static str) -> TrustedValue {
        TrustedValue(value)
    }

    /// The value text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CssValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A value literal from source code. See [`CssValue::trusted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrustedValue(&'static str);

impl fmt::Display for TrustedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl From<TrustedValue> for CssValue {
    fn from(value: TrustedValue) -> Self {
        Self(value.0.to_string())
    }
}

impl From<&CssValue> for CssValue {
    fn from(value: &CssValue) -> Self {
        value.clone()
    }
}

/// The tokenizer silently closes blocks and strings at end of input, which
/// would let a value swallow whatever the generator writes after it.
fn is_balanced(value: &str) -> bool {
    let mut depth: Vec<char> = Vec::new();
    let mut quote: Option<char> = None;
    for c in value.chars() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => depth.push(')'),
            '[' => depth.push(']'),
            ')' | ']' => {
                if depth.pop() != Some(c) {
                    return false;
                }
            }
            _ => {}
        }
    }
    quote.is_none() && depth.is_empty()
}

fn scan<'i>(parser: &mut Parser<'i, '_>) -> std::result::Result<(), ParseError<'i, &'static str>> {
    loop {
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => return Ok(()),
        };
        match token {
            Token::Semicolon
            | Token::CurlyBracketBlock
            | Token::CloseCurlyBracket
            | Token::CloseParenthesis
            | Token::CloseSquareBracket => {
                return Err(parser.new_custom_error("structural token in value"));
            }
            Token::BadString(_) => return Err(parser.new_custom_error("unterminated string")),
            Token::BadUrl(_) => return Err(parser.new_custom_error("malformed url")),
            Token::AtKeyword(_) => return Err(parser.new_custom_error("at-rule in value")),
            Token::Delim('!') => return Err(parser.new_custom_error("'!' is not allowed")),
            Token::Function(name) if name.eq_ignore_ascii_case("expression") => {
                return Err(parser.new_custom_error("expression() is not allowed"));
            }
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                parser.parse_nested_block(|nested| scan(nested))?;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_values() {
        for raw in [
            "#ff00aa",
            "rgba(15, 23, 42, 0.6)",
            "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
            "0.75rem 1.5rem",
            "1px solid rgba(255, 255, 255, 0.1)",
            "'Inter', sans-serif",
            "calc(100% - 2rem)",
            "url(\"hero.jpg\")",
        ] {
            assert!(CssValue::parse("prop", raw).is_ok(), "rejected {raw}");
        }
    }

    #[test]
    fn test_rejects_declaration_breakout() {
        for raw in [
            "red; background: url(evil)",
            "red} body { display:none",
            "red</style><script>",
            "red !important",
            "re\\64",
            "@import 'x'",
            "expression(alert(1))",
            "rgba(1, 2, 3",
            "'unterminated\n",
            "a) b (",
        ] {
            assert!(CssValue::parse("color", raw).is_err(), "accepted {raw}");
        }
    }

    #[test]
    fn test_rejects_empty_and_oversized() {
        assert!(CssValue::parse("color", "   ").is_err());
        let long = "a".repeat(MAX_VALUE_LEN + 1);
        assert!(CssValue::parse("color", &long).is_err());
    }

    #[test]
    fn test_value_is_trimmed() {
        let value = CssValue::parse("color", "  #10b981 ").unwrap();
        assert_eq!(value.as_str(), "#10b981");
    }
}
