//! Registration-time errors.
//!
//! These surface while a primitive library registers its signatures at
//! start-up. They are programming errors in the runtime's own declarations,
//! so the host treats them as fatal.

/// Failure to register a primitive.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// The signature text does not parse.
    #[error("malformed signature `{signature}` at offset {offset}: {reason}")]
    MalformedSignature {
        signature: String,
        offset: usize,
        reason: String,
    },
    /// A signature with the same receiver, shape, name and parameter
    /// predicates is already registered.
    #[error("duplicate signature `{signature}` (already registered as `{existing}`)")]
    DuplicateSignature { signature: String, existing: String },
}
