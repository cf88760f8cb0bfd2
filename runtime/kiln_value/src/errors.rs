//! Error types for primitive dispatch and evaluation.
//!
//! These are the call-time errors: recoverable, surfaced to the running
//! program as catchable exceptions, never a process fault. Registration
//! failures (malformed or duplicate signatures) live in `kiln_dispatch`.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` carries the structured data of each failure. Factory
//! functions (e.g., `out_of_bounds()`) are the public API; they populate
//! both `kind` and `message`.

use std::fmt;

use crate::value::{Value, ValueTag};

/// Result of evaluating a primitive operation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category for structured diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// No registered primitive matches the receiver tag, call shape, name,
    /// arity and argument tags.
    NoMatchingMethod {
        receiver: ValueTag,
        name: String,
        arity: usize,
    },
    /// Several candidates match and none is strictly more specific.
    ///
    /// Indicates a defect in a library's registrations.
    AmbiguousMethod {
        receiver: ValueTag,
        name: String,
        candidates: Vec<String>,
    },
    /// Packed argument shape disagrees with the resolved binding.
    ///
    /// Indicates a defect in the evaluator's argument packing.
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    /// Index outside `[0, len)` after negative-index normalization.
    ///
    /// `index` is the index as supplied by the program and `len` is the
    /// sequence length. Positions between elements, where `len` itself is
    /// valid, carry a message naming `[0, len]` instead.
    OutOfBounds { index: i64, len: usize },
    /// A marshalled value does not have the variant a native expected.
    TypeMismatch { expected: String, got: ValueTag },
}

impl EvalErrorKind {
    /// The language-level error class name, as seen by catch clauses.
    pub const fn class_name(&self) -> &'static str {
        match self {
            Self::NoMatchingMethod { .. } => "NoMatchingMethodError",
            Self::AmbiguousMethod { .. } => "AmbiguousMethodError",
            Self::ArityMismatch { .. } => "ArityMismatchError",
            Self::OutOfBounds { .. } => "OutOfBoundsError",
            Self::TypeMismatch { .. } => "TypeMismatchError",
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatchingMethod {
                receiver,
                name,
                arity,
            } => {
                let arg_word = if *arity == 1 { "argument" } else { "arguments" };
                write!(
                    f,
                    "no method '{name}' on {receiver} accepting {arity} {arg_word}"
                )
            }
            Self::AmbiguousMethod {
                receiver,
                name,
                candidates,
            } => write!(
                f,
                "ambiguous call to '{name}' on {receiver}: {}",
                candidates.join(" | ")
            ),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} packed {arg_word}, got {got}")
            }
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} is out of bounds [0, {len})")
            }
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable error message.
    ///
    /// For factory-created errors, this equals `kind.to_string()`.
    pub message: String,
    /// Additional context notes, e.g. the signature of the binding involved.
    pub notes: Vec<String>,
}

impl EvalError {
    /// Create an error from a structured kind.
    ///
    /// The message is computed from the kind's `Display` impl.
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            notes: Vec::new(),
        }
    }

    /// Create an error with a structured kind and a caller-supplied message.
    pub fn with_message(kind: EvalErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    /// Add a context note to this error.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.class_name(), self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Dispatch Errors

/// No registered primitive matches the call.
#[cold]
pub fn no_matching_method(receiver: ValueTag, name: &str, arity: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoMatchingMethod {
        receiver,
        name: name.to_string(),
        arity,
    })
}

/// More than one equally specific candidate matches the call.
#[cold]
pub fn ambiguous_method(receiver: ValueTag, name: &str, candidates: Vec<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AmbiguousMethod {
        receiver,
        name: name.to_string(),
        candidates,
    })
}

/// Packed argument field count differs from the binding's expectation.
#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

// Primitive Errors

/// Index outside the valid range of a sequence of length `len`.
#[cold]
pub fn out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OutOfBounds { index, len })
}

/// Value has the wrong variant for the operation.
#[cold]
pub fn type_mismatch(expected: &str, got: ValueTag) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_carries_index_and_range() {
        let err = out_of_bounds(5, 3);
        assert_eq!(err.kind, EvalErrorKind::OutOfBounds { index: 5, len: 3 });
        assert_eq!(err.message, "index 5 is out of bounds [0, 3)");
        assert_eq!(
            err.to_string(),
            "OutOfBoundsError: index 5 is out of bounds [0, 3)"
        );
    }

    #[test]
    fn no_matching_method_pluralizes() {
        assert_eq!(
            no_matching_method(ValueTag::List, "add", 1).message,
            "no method 'add' on List accepting 1 argument"
        );
        assert_eq!(
            no_matching_method(ValueTag::Int, "[]", 2).message,
            "no method '[]' on Int accepting 2 arguments"
        );
    }

    #[test]
    fn ambiguous_method_lists_candidates() {
        let err = ambiguous_method(
            ValueTag::List,
            "[]",
            vec!["(is List)[a is Int, b]".into(), "(is List)[a, b is Int]".into()],
        );
        assert_eq!(
            err.message,
            "ambiguous call to '[]' on List: (is List)[a is Int, b] | (is List)[a, b is Int]"
        );
    }

    #[test]
    fn notes_render_after_message() {
        let err = arity_mismatch("add", 2, 3).with_note("binding: (is List) add(item)");
        assert_eq!(
            err.to_string(),
            "ArityMismatchError: add expects 2 packed arguments, got 3\n  \
             note: binding: (is List) add(item)"
        );
    }

    #[test]
    fn custom_message_keeps_kind() {
        let err = EvalError::with_message(
            EvalErrorKind::TypeMismatch {
                expected: "Int".into(),
                got: ValueTag::String,
            },
            "index must be an Int",
        );
        assert_eq!(err.kind.class_name(), "TypeMismatchError");
        assert_eq!(err.message, "index must be an Int");
    }
}
