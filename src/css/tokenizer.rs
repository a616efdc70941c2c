//! logos-based tokenizer for style text.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `min-size` is one `Ident`, `-0.5` one `Number`)
//! 2. For equal length matches, earlier-defined variants win

use logos::Logos;

/// Style token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Number: integer or decimal, possibly negative (`10`, `-1`, `0.5`, `.25`).
    #[regex(r"-?([0-9]+(\.[0-9]+)?|\.[0-9]+)")]
    Number,

    /// Identifier: property names, keywords and selector names.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("#")]
    Hash,

    #[token("*")]
    Star,

    #[token(">")]
    GreaterThan,
}

/// Tokenize a string into `(Token, text)` pairs. Characters that fail to lex
/// are skipped.
pub fn tokenize(input: &str) -> Vec<(Token, String)> {
    let lexer = Token::lexer(input);
    lexer
        .spanned()
        .filter_map(|(result, span)| {
            result.ok().map(|token| (token, input[span].to_string()))
        })
        .collect()
}
