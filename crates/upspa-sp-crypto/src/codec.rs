//! Canonical base64url codec and fixed-length decoding.
//!
//! This module provides:
//! - [`canonicalize`]: decode base64url (unpadded, or padded as a fallback)
//!   and re-encode to the single canonical unpadded form
//! - [`decode_fixed`]: the same, plus an exact decoded-length check
//! - [`decode_material`] / [`decode_array`]: length taken from a
//!   [`Material`] role or a const generic
//! - [`encode`]: the canonical encoder; never emits `=`
//!
//! # Canonical form
//!
//! URL-safe alphabet (RFC 4648 §5), no padding, zero trailing bits. Two
//! canonical strings are equal iff their decoded bytes are equal, so the
//! canonical string is what the SP stores and compares.
//!
//! Decoded bytes and canonical strings may belong to secret fields. Neither
//! appears in [`Debug`] output, errors, or log events.

use crate::config::Base64Policy;
use crate::error::CryptoError;
use crate::material::Material;
use data_encoding::{BASE64URL, BASE64URL_NOPAD};
use std::fmt;
use zeroize::Zeroizing;

/// Field name reported by [`decode_fixed`], which has no material role.
const UNNAMED_FIELD: &str = "value";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A decoded value together with its canonical text.
///
/// `raw` is zeroized on drop. `Debug` shows only the decoded length.
#[must_use = "decoded material must be used or explicitly dropped"]
#[derive(Clone, PartialEq, Eq)]
pub struct Canonical {
    /// Canonical unpadded base64url text.
    pub canonical: String,
    /// Decoded bytes.
    pub raw: Zeroizing<Vec<u8>>,
}

impl Canonical {
    /// Canonical text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Decoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Number of decoded bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the input decoded to zero bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl fmt::Debug for Canonical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Canonical(*** {} bytes)", self.raw.len())
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode bytes in canonical unpadded base64url.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    BASE64URL_NOPAD.encode(bytes)
}

// ---------------------------------------------------------------------------
// Canonicalization
// ---------------------------------------------------------------------------

/// Decode base64url text and re-encode it canonically, using the default
/// [`Base64Policy::Lenient`] policy.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidEncoding`] if `s` is neither canonical nor
/// padded base64url.
pub fn canonicalize(s: &str) -> Result<Canonical, CryptoError> {
    canonicalize_with(s, Base64Policy::default())
}

/// Decode base64url text under an explicit policy and re-encode it
/// canonically.
///
/// The canonical form is always tried first; the padded form only when the
/// policy allows it and the canonical decode failed.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidEncoding`] if no accepted form decodes.
pub fn canonicalize_with(s: &str, policy: Base64Policy) -> Result<Canonical, CryptoError> {
    let raw = match BASE64URL_NOPAD.decode(s.as_bytes()) {
        Ok(raw) => raw,
        Err(_) if policy.accepts_padding() => BASE64URL.decode(s.as_bytes()).map_err(|_| {
            tracing::debug!(code = "invalid_base64", "rejected base64url input");
            CryptoError::InvalidEncoding
        })?,
        Err(_) => {
            tracing::debug!(code = "invalid_base64", strict = true, "rejected base64url input");
            return Err(CryptoError::InvalidEncoding);
        }
    };
    let raw = Zeroizing::new(raw);
    Ok(Canonical {
        canonical: encode(&raw),
        raw,
    })
}

// ---------------------------------------------------------------------------
// Fixed-length decoding
// ---------------------------------------------------------------------------

/// Decode base64url text and require exactly `expected_len` bytes.
///
/// # Errors
///
/// - [`CryptoError::InvalidEncoding`] if the text does not decode
/// - [`CryptoError::WrongLength`] if the decoded length differs
pub fn decode_fixed(s: &str, expected_len: usize) -> Result<Canonical, CryptoError> {
    decode_checked(s, UNNAMED_FIELD, expected_len, Base64Policy::default())
}

/// [`decode_fixed`] under an explicit policy.
///
/// # Errors
///
/// See [`decode_fixed`].
pub fn decode_fixed_with(
    s: &str,
    expected_len: usize,
    policy: Base64Policy,
) -> Result<Canonical, CryptoError> {
    decode_checked(s, UNNAMED_FIELD, expected_len, policy)
}

/// Decode a value whose length is fixed by its protocol role.
///
/// # Errors
///
/// See [`decode_fixed`]; `WrongLength` names the material role.
pub fn decode_material(s: &str, material: Material) -> Result<Canonical, CryptoError> {
    decode_checked(s, material.name(), material.len(), Base64Policy::default())
}

/// [`decode_material`] under an explicit policy.
///
/// # Errors
///
/// See [`decode_fixed`].
pub fn decode_material_with(
    s: &str,
    material: Material,
    policy: Base64Policy,
) -> Result<Canonical, CryptoError> {
    decode_checked(s, material.name(), material.len(), policy)
}

/// Decode a value of caller-agreed length, reporting `field` on mismatch.
///
/// For lengths fixed by the envelope rather than the material table, such as
/// the `cid` ciphertext.
///
/// # Errors
///
/// See [`decode_fixed`].
pub fn decode_field(
    s: &str,
    field: &'static str,
    expected_len: usize,
) -> Result<Canonical, CryptoError> {
    decode_checked(s, field, expected_len, Base64Policy::default())
}

/// [`decode_field`] under an explicit policy.
///
/// # Errors
///
/// See [`decode_fixed`].
pub fn decode_field_with(
    s: &str,
    field: &'static str,
    expected_len: usize,
    policy: Base64Policy,
) -> Result<Canonical, CryptoError> {
    decode_checked(s, field, expected_len, policy)
}

/// Decode into a fixed-size array, reporting `field` on length mismatch.
///
/// # Errors
///
/// See [`decode_fixed`].
pub fn decode_array<const N: usize>(
    s: &str,
    field: &'static str,
) -> Result<Zeroizing<[u8; N]>, CryptoError> {
    decode_array_with(s, field, Base64Policy::default())
}

/// [`decode_array`] under an explicit policy.
///
/// # Errors
///
/// See [`decode_fixed`].
pub fn decode_array_with<const N: usize>(
    s: &str,
    field: &'static str,
    policy: Base64Policy,
) -> Result<Zeroizing<[u8; N]>, CryptoError> {
    let decoded = decode_checked(s, field, N, policy)?;
    let mut out = Zeroizing::new([0u8; N]);
    out.copy_from_slice(&decoded.raw);
    Ok(out)
}

fn decode_checked(
    s: &str,
    field: &'static str,
    expected: usize,
    policy: Base64Policy,
) -> Result<Canonical, CryptoError> {
    let decoded = canonicalize_with(s, policy)?;
    check_len(field, expected, decoded.len())?;
    Ok(decoded)
}

/// Reject `actual != expected` with a [`CryptoError::WrongLength`] naming `field`.
pub(crate) fn check_len(
    field: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), CryptoError> {
    if actual == expected {
        return Ok(());
    }
    tracing::debug!(
        field,
        expected,
        actual,
        code = "wrong_byte_length",
        "rejected fixed-length input"
    );
    Err(CryptoError::WrongLength {
        field,
        expected,
        actual,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
