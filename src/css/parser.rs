//! Recursive descent parser for style text.
//!
//! Parses `Selector { name: value ...; }` rules into [`Style`]s and bare
//! declaration blocks into [`StyleProperty`] lists. Selectors are kept as
//! opaque text; matching them against widgets happens elsewhere.

use logos::Logos;

use crate::css::style::{PropertyValue, Style, StyleProperty};
use crate::css::tokenizer::Token;
use crate::fixed::Fixed;

/// Errors from style text parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

/// A positioned token with byte-level span information.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Index in the token stream (for error reporting).
    pos: usize,
    byte_start: usize,
    byte_end: usize,
}

/// Strip block comments (`/* ... */`), replacing each with a single space.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("/*") {
        result.push_str(&rest[..start]);
        result.push(' ');
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            // Unterminated comment: drop the rest of the input.
            None => rest = "",
        }
    }
    result.push_str(rest);
    result
}

fn tokenize_with_spans(input: &str) -> Vec<PToken> {
    let lexer = Token::lexer(input);
    let mut tokens = Vec::new();

    for (result, span) in lexer.spanned() {
        if let Ok(token) = result {
            tokens.push(PToken {
                text: input[span.clone()].to_string(),
                token,
                pos: tokens.len(),
                byte_start: span.start,
                byte_end: span.end,
            });
        }
    }

    tokens
}

/// Parse a sequence of rules into styles, in source order.
pub fn parse_stylesheet(input: &str) -> Result<Vec<Style>, ParseError> {
    let cleaned = strip_comments(input);
    let mut parser = Parser::new(&cleaned);

    let mut styles = Vec::new();
    while !parser.is_eof() {
        styles.push(parser.parse_rule()?);
    }
    Ok(styles)
}

/// Parse a bare declaration block such as `insets: 2; gap: 4 2`.
pub fn parse_declarations(input: &str) -> Result<Vec<StyleProperty>, ParseError> {
    let cleaned = strip_comments(input);
    let mut parser = Parser::new(&cleaned);

    let properties = parser.parse_declarations()?;
    if let Some(tok) = parser.peek() {
        return Err(ParseError::UnexpectedToken {
            position: tok.pos,
            message: format!("unexpected {:?} '{}' after declarations", tok.token, tok.text),
        });
    }
    Ok(properties)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<PToken>,
    cursor: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: tokenize_with_spans(source),
            cursor: 0,
        }
    }

    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn peek_is(&self, token: Token) -> bool {
        self.peek().is_some_and(|t| t.token == token)
    }

    fn advance(&mut self) -> Option<PToken> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn expect(&mut self, expected: Token) -> Result<PToken, ParseError> {
        match self.advance() {
            Some(tok) if tok.token == expected => Ok(tok),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {:?}, got {:?} '{}'", expected, tok.token, tok.text),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {expected:?}"))),
        }
    }

    /// `selector { declarations }`
    fn parse_rule(&mut self) -> Result<Style, ParseError> {
        let selector = self.parse_selector_text()?;
        self.expect(Token::BraceOpen)?;
        let declarations = self.parse_declarations()?;
        self.expect(Token::BraceClose)?;

        let mut style = Style::new(selector);
        for property in declarations {
            style.push(property);
        }
        Ok(style)
    }

    /// Everything up to `{`, taken verbatim from the source.
    fn parse_selector_text(&mut self) -> Result<String, ParseError> {
        let first = match self.peek() {
            Some(tok) if tok.token != Token::BraceOpen => tok.byte_start,
            Some(tok) => {
                return Err(ParseError::UnexpectedToken {
                    position: tok.pos,
                    message: "expected selector before '{'".into(),
                });
            }
            None => return Err(ParseError::UnexpectedEof("expected selector".into())),
        };

        let mut last = first;
        while let Some(tok) = self.peek() {
            match tok.token {
                Token::BraceOpen => break,
                Token::Ident
                | Token::Dot
                | Token::Hash
                | Token::Star
                | Token::GreaterThan
                | Token::Comma
                | Token::Colon => {
                    last = tok.byte_end;
                    self.cursor += 1;
                }
                other => {
                    return Err(ParseError::UnexpectedToken {
                        position: tok.pos,
                        message: format!("unexpected {other:?} '{}' in selector", tok.text),
                    });
                }
            }
        }

        Ok(self.source[first..last].to_string())
    }

    /// Declarations until `}` or end of input.
    fn parse_declarations(&mut self) -> Result<Vec<StyleProperty>, ParseError> {
        let mut properties = Vec::new();
        while self.peek().is_some_and(|t| t.token != Token::BraceClose) {
            if self.peek_is(Token::Semicolon) {
                self.advance();
                continue;
            }
            properties.push(self.parse_declaration()?);
        }
        Ok(properties)
    }

    /// `name: value value ... ;`
    fn parse_declaration(&mut self) -> Result<StyleProperty, ParseError> {
        let name = self.expect(Token::Ident)?.text;
        self.expect(Token::Colon)?;

        let mut values = Vec::new();
        while let Some(tok) = self.peek() {
            if matches!(tok.token, Token::Semicolon | Token::BraceClose) {
                break;
            }
            values.push(self.parse_value()?);
        }

        if self.peek_is(Token::Semicolon) {
            self.advance();
        }

        let value = match values.len() {
            0 => {
                return Err(ParseError::UnexpectedEof(format!(
                    "expected a value for '{name}'"
                )));
            }
            1 => values.remove(0),
            _ => PropertyValue::List(values),
        };
        Ok(StyleProperty::new(name, value))
    }

    fn parse_value(&mut self) -> Result<PropertyValue, ParseError> {
        let tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected a value".into()))?;

        match tok.token {
            Token::Number => {
                let n: Fixed = tok.text.parse().map_err(|err| ParseError::UnexpectedToken {
                    position: tok.pos,
                    message: format!("{err}"),
                })?;
                Ok(PropertyValue::Number(n))
            }
            Token::Ident => Ok(PropertyValue::Ident(tok.text)),
            other => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("unexpected token in value: {other:?} '{}'", tok.text),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn declarations_single_and_list_values() {
        let props = parse_declarations("insets: 2; gap: 4 2; align: center end").unwrap();
        assert_eq!(
            props,
            vec![
                StyleProperty::new("insets", 2),
                StyleProperty::new("gap", PropertyValue::List(vec![4.into(), 2.into()])),
                StyleProperty::new(
                    "align",
                    PropertyValue::List(vec!["center".into(), "end".into()]),
                ),
            ]
        );
    }

    #[test]
    fn declarations_fractional_numbers() {
        let props = parse_declarations("width: 0.5; height: 50.0; x: -1;").unwrap();
        assert_eq!(props[0].value(), &PropertyValue::Number(Fixed::HALF));
        assert_eq!(props[1].value(), &PropertyValue::Number(Fixed::from_int(50)));
        assert_eq!(props[2].value(), &PropertyValue::Number(Fixed::from_int(-1)));
    }

    #[test]
    fn duplicate_declarations_are_kept_in_order() {
        let props = parse_declarations("gap: 1; gap: 2;").unwrap();
        assert_eq!(props.len(), 2);
        assert_eq!(props[0].value(), &PropertyValue::from(1));
    }

    #[test]
    fn stylesheet_rules() {
        let styles = parse_stylesheet(
            "/* layout */ Panel.sidebar > Row { layout: table; span: 2 1; }\n Cell { weight: 1; }",
        )
        .unwrap();
        assert_eq!(styles.len(), 2);
        assert_eq!(styles[0].selector(), "Panel.sidebar > Row");
        assert_eq!(styles[0].get("layout"), Some(&PropertyValue::from("table")));
        assert_eq!(styles[1].selector(), "Cell");
        assert_eq!(styles[1].get("weight"), Some(&PropertyValue::from(1)));
    }

    #[test]
    fn empty_rule_and_trailing_semicolons() {
        let styles = parse_stylesheet("A {} B { gap: 1;; }").unwrap();
        assert!(styles[0].is_empty());
        assert_eq!(styles[1].len(), 1);
    }

    #[test]
    fn missing_value_is_an_error() {
        assert!(matches!(
            parse_declarations("gap: ;"),
            Err(ParseError::UnexpectedEof(_))
        ));
    }

    #[test]
    fn missing_selector_is_an_error() {
        assert!(matches!(
            parse_stylesheet("{ gap: 1; }"),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn unterminated_rule_is_an_error() {
        assert!(matches!(
            parse_stylesheet("A { gap: 1;"),
            Err(ParseError::UnexpectedEof(_))
        ));
    }

    #[test]
    fn stray_brace_after_declarations() {
        assert!(matches!(
            parse_declarations("gap: 1; }"),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn strip_comments_handles_unterminated() {
        assert_eq!(strip_comments("a /* b */ c"), "a   c");
        assert_eq!(strip_comments("a /* b"), "a  ");
    }
}
