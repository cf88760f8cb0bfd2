//! Signature patterns.
//!
//! A signature is the declarative description of one primitive: which
//! receiver it accepts, the syntactic shape of the call, and a type
//! predicate per parameter. Primitive libraries declare signatures as text,
//! e.g. `(is List)[index is Int] = (item)`, and [`parse_signature`] turns
//! them into a [`Signature`] at registration time.
//!
//! # Module Structure
//!
//! - [`token`]: logos token set for signature text
//! - [`parser`]: recursive-descent parser producing [`Signature`]

mod parser;
mod token;

use std::borrow::Cow;
use std::fmt;

use kiln_value::ValueTag;

pub use parser::parse_signature;

/// Type constraint on a receiver or parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypePredicate {
    /// Matches every tag. Written by omitting the type test: `(item)`.
    Any,
    /// Matches exactly one tag: `is Int` or bare `Int`.
    Exact(ValueTag),
}

impl TypePredicate {
    /// Check a runtime tag against this predicate.
    #[inline]
    pub fn matches(self, tag: ValueTag) -> bool {
        match self {
            TypePredicate::Any => true,
            TypePredicate::Exact(expected) => expected == tag,
        }
    }

    /// Whether this predicate names a concrete tag.
    #[inline]
    pub fn is_exact(self) -> bool {
        matches!(self, TypePredicate::Exact(_))
    }
}

impl fmt::Display for TypePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypePredicate::Any => f.write_str("any"),
            TypePredicate::Exact(tag) => write!(f, "{tag}"),
        }
    }
}

/// A receiver or parameter clause: optional binding name plus predicate.
///
/// The binding name is documentation only; matching ignores it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub binding: Option<Box<str>>,
    pub predicate: TypePredicate,
}

impl Param {
    pub fn new(binding: Option<&str>, predicate: TypePredicate) -> Self {
        Self {
            binding: binding.map(Into::into),
            predicate,
        }
    }

    /// An unnamed parameter with the given predicate.
    pub fn typed(predicate: TypePredicate) -> Self {
        Self {
            binding: None,
            predicate,
        }
    }
}

/// Field-less discriminant of [`CallShape`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    /// `receiver.name`
    Getter,
    /// `receiver.name(args)`
    Method,
    /// `receiver[args]`
    Indexer,
    /// `receiver[args] = value`
    IndexedAssign,
    /// `receiver <symbol> arg`
    Operator,
}

impl ShapeKind {
    /// Name used for this call in diagnostics.
    ///
    /// Indexers have no name of their own and render as `[]` and `[]=`.
    pub fn call_name(self, name: &str) -> Cow<'_, str> {
        match self {
            ShapeKind::Getter | ShapeKind::Method | ShapeKind::Operator => Cow::Borrowed(name),
            ShapeKind::Indexer => Cow::Borrowed("[]"),
            ShapeKind::IndexedAssign => Cow::Borrowed("[]="),
        }
    }
}

/// The syntactic shape of a call, with its parameter clauses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallShape {
    Getter {
        name: Box<str>,
    },
    Method {
        name: Box<str>,
        params: Vec<Param>,
    },
    Indexer {
        params: Vec<Param>,
    },
    IndexedAssign {
        params: Vec<Param>,
        value: Param,
    },
    Operator {
        symbol: Box<str>,
        params: Vec<Param>,
    },
}

impl CallShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            CallShape::Getter { .. } => ShapeKind::Getter,
            CallShape::Method { .. } => ShapeKind::Method,
            CallShape::Indexer { .. } => ShapeKind::Indexer,
            CallShape::IndexedAssign { .. } => ShapeKind::IndexedAssign,
            CallShape::Operator { .. } => ShapeKind::Operator,
        }
    }

    /// Method name or operator symbol; empty for indexers.
    pub fn name(&self) -> &str {
        match self {
            CallShape::Getter { name } | CallShape::Method { name, .. } => name,
            CallShape::Operator { symbol, .. } => symbol,
            CallShape::Indexer { .. } | CallShape::IndexedAssign { .. } => "",
        }
    }
}

/// A parsed signature pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub receiver: Param,
    pub shape: CallShape,
    /// The text the signature was parsed from.
    pub source: Box<str>,
}

impl Signature {
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Method name or operator symbol; empty for indexers.
    pub fn name(&self) -> &str {
        self.shape.name()
    }

    /// Name used for this signature in diagnostics (`[]` for indexers).
    pub fn call_name(&self) -> Cow<'_, str> {
        self.kind().call_name(self.name())
    }

    /// Parameters in packing order.
    ///
    /// For an indexed assignment the value parameter comes last, after the
    /// index parameters.
    pub fn params(&self) -> impl Iterator<Item = &Param> {
        let (params, value): (&[Param], Option<&Param>) = match &self.shape {
            CallShape::Getter { .. } => (&[], None),
            CallShape::Method { params, .. }
            | CallShape::Indexer { params }
            | CallShape::Operator { params, .. } => (params, None),
            CallShape::IndexedAssign { params, value } => (params, Some(value)),
        };
        params.iter().chain(value)
    }

    /// Number of parameters, the indexed-assignment value included.
    pub fn arity(&self) -> usize {
        self.params().count()
    }

    /// Check the receiver and argument tags against every predicate.
    pub fn accepts(&self, receiver: ValueTag, args: &[ValueTag]) -> bool {
        self.receiver.predicate.matches(receiver)
            && self.arity() == args.len()
            && self
                .params()
                .zip(args)
                .all(|(param, &tag)| param.predicate.matches(tag))
    }

    /// Check whether two signatures describe the same pattern.
    ///
    /// Binding names and source spelling are ignored: `(is List) add(item)`
    /// and `(list List) add(x)` are the same pattern.
    pub fn same_pattern(&self, other: &Signature) -> bool {
        self.receiver.predicate == other.receiver.predicate
            && self.kind() == other.kind()
            && self.name() == other.name()
            && self.arity() == other.arity()
            && self
                .params()
                .zip(other.params())
                .all(|(a, b)| a.predicate == b.predicate)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests;
