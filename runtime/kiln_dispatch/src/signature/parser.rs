//! Recursive-descent parser for signature text.
//!
//! ```text
//! signature   := receiver shape
//! receiver    := "(" param ")"
//! param       := ident? type_test?        -- at least one of the two
//! type_test   := "is" TYPE | TYPE
//! shape       := ident                              -- getter
//!              | ident "(" params ")"               -- method
//!              | "[" params "]"                     -- indexer
//!              | "[" params "]" "=" "(" param ")"   -- indexed assign
//!              | SYMBOL "(" params ")"              -- operator
//! params      := (param ","?)*
//! ```
//!
//! The parser is purely structural. The only semantic check is that every
//! type name is a known value tag.

use std::ops::Range;

use logos::Logos;

use kiln_value::ValueTag;

use super::token::RawToken;
use super::{CallShape, Param, Signature, TypePredicate};
use crate::error::RegistrationError;

/// Parse signature text into a [`Signature`].
pub fn parse_signature(source: &str) -> Result<Signature, RegistrationError> {
    let mut parser = SignatureParser::new(source)?;
    parser.signature()
}

struct SignatureParser<'src> {
    source: &'src str,
    tokens: Vec<(RawToken, Range<usize>)>,
    pos: usize,
}

impl<'src> SignatureParser<'src> {
    fn new(source: &'src str) -> Result<Self, RegistrationError> {
        let mut tokens = Vec::new();
        for (token, span) in RawToken::lexer(source).spanned() {
            match token {
                Ok(token) => tokens.push((token, span)),
                Err(()) => {
                    let found = &source[span.clone()];
                    return Err(malformed(
                        source,
                        span.start,
                        format!("unexpected character `{found}`"),
                    ));
                }
            }
        }
        Ok(Self {
            source,
            tokens,
            pos: 0,
        })
    }

    fn signature(&mut self) -> Result<Signature, RegistrationError> {
        self.expect(RawToken::LParen, "to open the receiver clause")?;
        let Some(receiver) = self.param()? else {
            return Err(self.error_here("the receiver clause needs a name or a type"));
        };
        self.expect(RawToken::RParen, "to close the receiver clause")?;

        let shape = self.shape()?;

        if let Some((token, span)) = self.tokens.get(self.pos) {
            return Err(malformed(
                self.source,
                span.start,
                format!("expected end of signature, found {}", token.describe()),
            ));
        }

        Ok(Signature {
            receiver,
            shape,
            source: self.source.into(),
        })
    }

    fn shape(&mut self) -> Result<CallShape, RegistrationError> {
        match self.peek() {
            Some(RawToken::Ident) => {
                let name = self.bump_text();
                if self.eat(RawToken::LParen) {
                    let params = self.params(RawToken::RParen)?;
                    Ok(CallShape::Method {
                        name: name.into(),
                        params,
                    })
                } else {
                    Ok(CallShape::Getter { name: name.into() })
                }
            }
            Some(RawToken::LBracket) => {
                self.pos += 1;
                let params = self.params(RawToken::RBracket)?;
                if self.peek() == Some(RawToken::Symbol) && self.peek_text() == "=" {
                    self.pos += 1;
                    self.expect(RawToken::LParen, "to open the assigned value clause")?;
                    let Some(value) = self.param()? else {
                        return Err(self.error_here("indexed assignment needs a value parameter"));
                    };
                    self.expect(RawToken::RParen, "to close the assigned value clause")?;
                    Ok(CallShape::IndexedAssign { params, value })
                } else {
                    Ok(CallShape::Indexer { params })
                }
            }
            Some(RawToken::Symbol) => {
                if self.peek_text() == "=" {
                    return Err(self.error_here("`=` is only valid after an indexer"));
                }
                let symbol = self.bump_text();
                self.expect(RawToken::LParen, "after the operator symbol")?;
                let params = self.params(RawToken::RParen)?;
                Ok(CallShape::Operator {
                    symbol: symbol.into(),
                    params,
                })
            }
            _ => Err(self.error_here(
                "expected a name, `[` or an operator symbol after the receiver",
            )),
        }
    }

    /// Parameters up to and including `close`. Commas are optional separators.
    fn params(&mut self, close: RawToken) -> Result<Vec<Param>, RegistrationError> {
        let mut params = Vec::new();
        loop {
            if self.eat(close) {
                return Ok(params);
            }
            match self.param()? {
                Some(param) => params.push(param),
                None => {
                    let message = format!("expected a parameter or {}", close.describe());
                    return Err(self.error_here(&message));
                }
            }
            if self.eat(RawToken::Comma) && self.peek() == Some(close) {
                return Err(self.error_here("trailing `,` in parameter list"));
            }
        }
    }

    /// `ident? type_test?`, or `None` if neither is present.
    fn param(&mut self) -> Result<Option<Param>, RegistrationError> {
        let binding = if self.peek() == Some(RawToken::Ident) {
            Some(self.bump_text())
        } else {
            None
        };
        let predicate = self.type_test()?;
        Ok(match (binding, predicate) {
            (None, None) => None,
            (binding, predicate) => Some(Param::new(
                binding,
                predicate.unwrap_or(TypePredicate::Any),
            )),
        })
    }

    fn type_test(&mut self) -> Result<Option<TypePredicate>, RegistrationError> {
        if self.eat(RawToken::Is) {
            if self.peek() != Some(RawToken::TypeName) {
                return Err(self.error_here("expected a type name after `is`"));
            }
        } else if self.peek() != Some(RawToken::TypeName) {
            return Ok(None);
        }

        let offset = self.offset();
        let name = self.bump_text();
        match ValueTag::from_name(name) {
            Some(tag) => Ok(Some(TypePredicate::Exact(tag))),
            None => Err(malformed(
                self.source,
                offset,
                format!("unknown type `{name}`"),
            )),
        }
    }

    // Token cursor

    fn peek(&self) -> Option<RawToken> {
        self.tokens.get(self.pos).map(|(token, _)| *token)
    }

    fn peek_text(&self) -> &'src str {
        let source = self.source;
        self.tokens
            .get(self.pos)
            .map_or("", |(_, span)| &source[span.clone()])
    }

    fn bump_text(&mut self) -> &'src str {
        let text = self.peek_text();
        self.pos += 1;
        text
    }

    fn eat(&mut self, expected: RawToken) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: RawToken, context: &str) -> Result<(), RegistrationError> {
        if self.eat(expected) {
            return Ok(());
        }
        let found = self.peek().map_or("end of signature", RawToken::describe);
        let message = format!("expected {} {context}, found {found}", expected.describe());
        Err(self.error_here(&message))
    }

    /// Byte offset of the current token, or the source length at the end.
    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.source.len(), |(_, span)| span.start)
    }

    fn error_here(&self, reason: &str) -> RegistrationError {
        malformed(self.source, self.offset(), reason)
    }
}

#[cold]
fn malformed(source: &str, offset: usize, reason: impl Into<String>) -> RegistrationError {
    RegistrationError::MalformedSignature {
        signature: source.to_string(),
        offset,
        reason: reason.into(),
    }
}
