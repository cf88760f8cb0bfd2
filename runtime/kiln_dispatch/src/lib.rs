//! Kiln Dispatch - signature-driven primitive dispatch.
//!
//! Primitive operations are declared by textual signature patterns such as
//! `(is List)[index is Int]` and resolved at call time against the runtime
//! tags of the receiver and arguments.
//!
//! # Architecture
//!
//! - `signature`: logos tokenizer and parser for signature text
//! - `table`: `DispatchTableBuilder`, the frozen `DispatchTable`, specificity
//!   ranking and the optional resolution cache
//! - `marshal`: packing and unpacking of call argument tuples
//! - `runtime`: the `Runtime` context handed to natives
//! - `config`: `DispatchConfig` and its environment overrides
//!
//! Value types and call-time errors come from `kiln_value`.

#![allow(
    clippy::result_large_err,
    reason = "EvalError carries notes and candidate lists; boxing would obscure the API"
)]

mod config;
mod error;
mod marshal;
mod runtime;
mod signature;
mod table;

use std::sync::Once;

pub use config::{AmbiguityPolicy, DispatchConfig, AMBIGUITY_VAR, CACHE_VAR};
pub use error::RegistrationError;
pub use marshal::{pack_args, CallArgs};
pub use runtime::{DefaultRuntime, Runtime};
pub use signature::{parse_signature, CallShape, Param, ShapeKind, Signature, TypePredicate};
pub use table::{Binding, BindingId, DispatchKey, DispatchTable, DispatchTableBuilder, NativeFn};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for dispatch diagnostics.
///
/// Hosts call this once at start-up; later calls do nothing. Nothing is
/// installed unless `RUST_LOG` holds a valid filter, e.g.
/// `RUST_LOG=kiln_dispatch=trace` to see every resolution. A subscriber the
/// host installed first is left in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(filter) = EnvFilter::try_from_default_env() else {
            return;
        };
        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter)
            .try_init();
        if installed.is_err() {
            tracing::debug!("global subscriber already set; keeping it");
        }
    });
}
