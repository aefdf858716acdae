//! TOPRF server-side evaluation over ristretto255.
//!
//! This module provides:
//! - [`evaluate`]: `y = k_i · B` for the SP's share `k_i` and a client
//!   blinded element `B`
//! - [`evaluate_with`]: the same with an explicit [`ScalarDecoding`]
//! - [`evaluate_b64`]: boundary helper: decode, evaluate, re-encode
//! - [`ScalarShare`]: secret 32-byte share, zeroized on drop
//!
//! # Validation order
//!
//! 1. both inputs are 32 bytes (`WrongLength`, naming the argument)
//! 2. `B` decompresses to a ristretto255 element other than the identity
//!    (`InvalidPoint`); non-canonical encodings fail decompression
//! 3. `k_i` becomes a scalar (clamped by default)
//! 4. constant-time variable-base multiplication
//! 5. canonical 32-byte compression of the result
//!
//! Evaluation is deterministic: no randomness is drawn.

use crate::codec;
use crate::config::ScalarDecoding;
use crate::error::CryptoError;
use crate::material::{Material, RISTRETTO_POINT_LEN, SCALAR_SHARE_LEN};
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::{clamp_integer, Scalar};
use curve25519_dalek::traits::IsIdentity;
use secrecy::{ExposeSecret, SecretBox};
use std::fmt;
use zeroize::Zeroizing;

/// Field name for the share argument in errors.
const SHARE_FIELD: &str = "scalar share";

/// Field name for the blinded element argument in errors.
const POINT_FIELD: &str = "blinded point";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The SP's TOPRF scalar share `k_i`.
///
/// Held in a [`SecretBox`]; zeroized on drop and masked in `Debug`.
pub struct ScalarShare(SecretBox<[u8; SCALAR_SHARE_LEN]>);

impl ScalarShare {
    /// Wrap raw share bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; SCALAR_SHARE_LEN]) -> Self {
        Self(SecretBox::new(Box::new(bytes)))
    }

    /// Decode a base64url share, enforcing its 32-byte length.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidEncoding`] or [`CryptoError::WrongLength`].
    pub fn from_b64(s: &str) -> Result<Self, CryptoError> {
        let decoded = codec::decode_array::<SCALAR_SHARE_LEN>(s, Material::ScalarShare.name())?;
        Ok(Self::from_bytes(*decoded))
    }

    /// Expose the share bytes for a cryptographic operation.
    #[must_use]
    pub fn expose(&self) -> &[u8; SCALAR_SHARE_LEN] {
        self.0.expose_secret()
    }
}

impl fmt::Debug for ScalarShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ScalarShare(***)")
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Compute `scalar_share · blinded_point` with the default clamped decoding.
///
/// # Errors
///
/// - [`CryptoError::WrongLength`] if either input is not 32 bytes
/// - [`CryptoError::InvalidPoint`] if `blinded_point` is not a valid,
///   non-identity ristretto255 encoding
pub fn evaluate(
    scalar_share: &[u8],
    blinded_point: &[u8],
) -> Result<[u8; RISTRETTO_POINT_LEN], CryptoError> {
    evaluate_with(scalar_share, blinded_point, ScalarDecoding::default())
}

/// Compute `scalar_share · blinded_point` under an explicit scalar decoding.
///
/// # Errors
///
/// As [`evaluate`], plus [`CryptoError::InvalidScalar`] when `decoding` is
/// [`ScalarDecoding::Canonical`] and the share is not below the group order.
pub fn evaluate_with(
    scalar_share: &[u8],
    blinded_point: &[u8],
    decoding: ScalarDecoding,
) -> Result<[u8; RISTRETTO_POINT_LEN], CryptoError> {
    let share = fixed::<SCALAR_SHARE_LEN>(scalar_share, SHARE_FIELD)?;
    let point_bytes = fixed::<RISTRETTO_POINT_LEN>(blinded_point, POINT_FIELD)?;

    let point = decode_point(&point_bytes)?;
    let scalar = decode_scalar(&share, decoding)?;

    Ok(scalar_mul(&point, &scalar).compress().to_bytes())
}

/// Decode base64url inputs, evaluate, and return the canonical base64url result.
///
/// # Errors
///
/// [`CryptoError::InvalidEncoding`] for undecodable text, otherwise as
/// [`evaluate`].
pub fn evaluate_b64(
    scalar_share_b64: &str,
    blinded_point_b64: &str,
) -> Result<String, CryptoError> {
    let share = ScalarShare::from_b64(scalar_share_b64)?;
    let point = codec::decode_array::<RISTRETTO_POINT_LEN>(blinded_point_b64, POINT_FIELD)?;
    let y = evaluate(share.expose(), &*point)?;
    Ok(codec::encode(&y))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fixed<const N: usize>(
    bytes: &[u8],
    field: &'static str,
) -> Result<Zeroizing<[u8; N]>, CryptoError> {
    codec::check_len(field, N, bytes.len())?;
    let mut out = Zeroizing::new([0u8; N]);
    out.copy_from_slice(bytes);
    Ok(out)
}

fn decode_point(bytes: &[u8; RISTRETTO_POINT_LEN]) -> Result<RistrettoPoint, CryptoError> {
    // The all-zero string is the canonical identity encoding and decompresses;
    // it is rejected explicitly below.
    match CompressedRistretto(*bytes).decompress() {
        Some(point) if !point.is_identity() => Ok(point),
        _ => {
            tracing::debug!(
                field = POINT_FIELD,
                code = "invalid_ristretto_point",
                "rejected group element"
            );
            Err(CryptoError::InvalidPoint)
        }
    }
}

fn decode_scalar(
    bytes: &[u8; SCALAR_SHARE_LEN],
    decoding: ScalarDecoding,
) -> Result<Zeroizing<Scalar>, CryptoError> {
    match decoding {
        ScalarDecoding::Clamped => {
            let clamped = Zeroizing::new(clamp_integer(*bytes));
            Ok(Zeroizing::new(Scalar::from_bytes_mod_order(*clamped)))
        }
        ScalarDecoding::Canonical => Option::<Scalar>::from(Scalar::from_canonical_bytes(*bytes))
            .map(Zeroizing::new)
            .ok_or_else(|| {
                tracing::debug!(field = SHARE_FIELD, code = "invalid_scalar", "rejected scalar");
                CryptoError::InvalidScalar
            }),
    }
}

/// Group operation, not integer arithmetic.
#[allow(clippy::arithmetic_side_effects)]
fn scalar_mul(point: &RistrettoPoint, scalar: &Scalar) -> RistrettoPoint {
    point * scalar
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
