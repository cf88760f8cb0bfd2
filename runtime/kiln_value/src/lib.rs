#![allow(
    clippy::result_large_err,
    reason = "EvalError is returned from every native; boxing would add churn across the runtime"
)]
//! Kiln Value - runtime values and evaluation errors for the Kiln runtime.
//!
//! This crate provides:
//! - Runtime value types (`Value`, `ValueTag`, `Heap`, `SharedList`)
//! - Evaluation error types (`EvalError`, `EvalErrorKind`, `EvalResult`)
//!
//! # Value Types
//!
//! The value set is closed. Every primitive operation and every dispatch
//! decision switches on `ValueTag`, so adding a variant is a compile error
//! everywhere it matters.
//!
//! - All heap allocations go through `Value::` factory methods
//! - `Heap<T>` wraps immutable shared data (strings, tuples)
//! - `SharedList` wraps mutable storage aliased by every holder

mod errors;
mod value;

pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use value::{Heap, SharedList, Value, ValueTag};

// Re-export error constructors for use by other crates
pub use errors::{
    ambiguous_method, arity_mismatch, no_matching_method, out_of_bounds, type_mismatch,
};
