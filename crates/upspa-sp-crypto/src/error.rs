//! Error types for `upspa-sp-crypto`.
//!
//! Two channels exist and they never mix:
//! - [`CryptoError`]: recoverable rejection of client input. The boundary
//!   layer maps every variant to a 400 using [`CryptoError::code`].
//! - [`contract_violation`]: a caller skipped a precondition the type
//!   system could not express. This panics and is never turned into a
//!   [`CryptoError`].
//!
//! No variant carries the offending value: field names and byte counts only.

use thiserror::Error;

/// Errors produced when decoding or evaluating client-supplied material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Input is not base64url in any accepted form.
    #[error("invalid base64url encoding")]
    InvalidEncoding,

    /// Decoded bytes do not match the length required for the field's role.
    #[error("{field}: expected {expected} bytes, got {actual}")]
    WrongLength {
        /// Role of the rejected value (e.g. `"blinded point"`).
        field: &'static str,
        /// Length required by the wire contract.
        expected: usize,
        /// Length actually received.
        actual: usize,
    },

    /// 32 bytes were supplied but they are not a valid ristretto255 element.
    #[error("invalid ristretto255 point encoding")]
    InvalidPoint,

    /// Scalar is not the canonical encoding of an integer below the group order.
    #[error("invalid scalar encoding")]
    InvalidScalar,

    /// Key material was rejected by the signature primitive.
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(&'static str),
}

impl CryptoError {
    /// Stable machine-readable code for protocol-level error bodies.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidEncoding => "invalid_base64",
            Self::WrongLength { .. } => "wrong_byte_length",
            Self::InvalidPoint => "invalid_ristretto_point",
            Self::InvalidScalar => "invalid_scalar",
            Self::InvalidKeyMaterial(_) => "invalid_key_material",
        }
    }
}

/// Abort on a violated caller precondition.
///
/// Used where the calling code, not the client, is at fault (for example
/// handing unvalidated slices to the signature verifier). The panic message
/// always starts with `contract violation:` and names the lengths involved.
#[track_caller]
#[cold]
pub fn contract_violation(operation: &str, field: &str, expected: usize, actual: usize) -> ! {
    panic!("contract violation: {operation}: {field} must be {expected} bytes, got {actual}")
}
