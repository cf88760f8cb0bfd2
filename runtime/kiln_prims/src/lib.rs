#![deny(clippy::arithmetic_side_effects)]
#![allow(
    clippy::result_large_err,
    reason = "EvalError is returned from every native; boxing would add churn across the runtime"
)]
//! Kiln Prims - built-in primitive operations.
//!
//! Each library is a table of `(signature, native)` pairs registered on a
//! [`DispatchTableBuilder`] at start-up:
//!
//! - [`LIST_PRIMITIVES`]: `count`, indexing, `add`, `clear`, `insert`, `removeAt`
//! - [`STRING_PRIMITIVES`]: indexing, `count`, `+`, `==`, `!=`, `contains?`,
//!   `split`, `substring`, `compareTo`
//!
//! Indexable primitives share one convention: a negative index counts back
//! from the end, and an index still outside the sequence raises
//! `OutOfBoundsError` naming the index as supplied.

mod helpers;
mod list;
mod string;

use kiln_dispatch::{DispatchConfig, DispatchTable, DispatchTableBuilder, RegistrationError};

pub use list::LIST_PRIMITIVES;
pub use string::STRING_PRIMITIVES;

/// Register every built-in library on `builder`.
///
/// A failure here is a defect in the built-in declarations; hosts should
/// treat it as fatal.
pub fn register_builtins(builder: &mut DispatchTableBuilder) -> Result<(), RegistrationError> {
    builder.register_all(LIST_PRIMITIVES)?;
    builder.register_all(STRING_PRIMITIVES)?;
    tracing::debug!(bindings = builder.len(), "registered built-in primitives");
    Ok(())
}

/// Build a frozen table holding every built-in primitive.
pub fn builtin_table(config: DispatchConfig) -> Result<DispatchTable, RegistrationError> {
    let mut builder = DispatchTableBuilder::new().with_config(config);
    register_builtins(&mut builder)?;
    Ok(builder.build())
}
