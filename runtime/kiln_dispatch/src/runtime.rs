//! The runtime context handed to every native implementation.
//!
//! The evaluator that drives dispatch implements [`Runtime`]. Natives use it
//! to build result values and to raise recoverable errors; they never panic
//! on bad input.

use kiln_value::{EvalError, EvalErrorKind, Value};

/// Services the evaluator provides to primitive implementations.
///
/// Every method has a default, so an evaluator only overrides what it needs
/// (for example, to attach a source span or a backtrace to raised errors).
pub trait Runtime {
    /// Build a recoverable runtime error with an explicit message.
    ///
    /// The native returns the error through `Err`; the evaluator catches or
    /// propagates it like any language-level exception.
    fn raise_error(&self, kind: EvalErrorKind, message: String) -> EvalError {
        tracing::debug!(class = kind.class_name(), %message, "primitive raised error");
        EvalError::with_message(kind, message)
    }

    /// Build a recoverable runtime error whose message is derived from `kind`.
    fn raise(&self, kind: EvalErrorKind) -> EvalError {
        let message = kind.to_string();
        self.raise_error(kind, message)
    }

    fn nothing(&self) -> Value {
        Value::Nothing
    }

    fn int(&self, n: i64) -> Value {
        Value::int(n)
    }

    fn string(&self, s: String) -> Value {
        Value::string(s)
    }

    fn bool(&self, b: bool) -> Value {
        Value::Bool(b)
    }
}

/// Runtime context with no customization.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRuntime;

impl Runtime for DefaultRuntime {}
