//! Raw Token Definition
//!
//! The `RawToken` enum is the logos-derived tokenizer output for signature
//! text. Tokens carry no payload; the parser slices the source by span.

use logos::Logos;

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,

    /// Type-test keyword: `index is Int`.
    #[token("is")]
    Is,

    /// Binding or method name. May end in `?` or `!`.
    #[regex(r"[a-z_][A-Za-z0-9_]*[?!]?")]
    Ident,

    /// Capitalized name; must name a value tag.
    #[regex(r"[A-Z][A-Za-z0-9_]*")]
    TypeName,

    /// Operator symbol, including the `=` of an indexed assignment.
    #[regex(r"[+\-*/%<>=!&|^~]+")]
    Symbol,
}

impl RawToken {
    /// Short description for error messages.
    pub(crate) const fn describe(self) -> &'static str {
        match self {
            RawToken::LParen => "`(`",
            RawToken::RParen => "`)`",
            RawToken::LBracket => "`[`",
            RawToken::RBracket => "`]`",
            RawToken::Comma => "`,`",
            RawToken::Is => "`is`",
            RawToken::Ident => "a name",
            RawToken::TypeName => "a type name",
            RawToken::Symbol => "an operator symbol",
        }
    }
}
