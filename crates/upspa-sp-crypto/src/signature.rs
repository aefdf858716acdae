//! Ed25519 request authentication.
//!
//! This module provides:
//! - [`verify`]: verify a signature with typed, length-checked inputs
//! - [`verify_slices`]: the same for raw slices; wrong lengths are a
//!   contract violation (panic), not a verification failure
//! - [`sign`]: client-direction signing from a 32-byte seed
//! - [`Ed25519PublicKey`] / [`Ed25519Signature`]: fixed-length newtypes,
//!   built from base64url through the fixed-length decoder
//!
//! Verification is RFC 8032 pure Ed25519 via `ring`. Any cryptographically
//! invalid input (all-zero signature, wrong key, tampered message,
//! non-canonical encodings) yields `false`.

use crate::codec;
use crate::error::{contract_violation, CryptoError};
use crate::material::{Material, ED25519_PUBLIC_KEY_LEN, ED25519_SEED_LEN, ED25519_SIGNATURE_LEN};
use ring::signature::{self, Ed25519KeyPair, KeyPair, UnparsedPublicKey};
use std::fmt;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Client Ed25519 verification key (32 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey(pub [u8; ED25519_PUBLIC_KEY_LEN]);

impl Ed25519PublicKey {
    /// Decode a base64url public key, enforcing its 32-byte length.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidEncoding`] or [`CryptoError::WrongLength`].
    pub fn from_b64(s: &str) -> Result<Self, CryptoError> {
        let decoded = codec::decode_material(s, Material::PublicKey)?;
        let mut out = [0u8; ED25519_PUBLIC_KEY_LEN];
        out.copy_from_slice(decoded.as_bytes());
        Ok(Self(out))
    }

    /// Canonical base64url encoding.
    #[must_use]
    pub fn to_b64(&self) -> String {
        codec::encode(&self.0)
    }

    /// Raw key bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ED25519_PUBLIC_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ed25519PublicKey(***)")
    }
}

/// Detached Ed25519 signature (64 bytes).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519Signature(pub [u8; ED25519_SIGNATURE_LEN]);

impl Ed25519Signature {
    /// Decode a base64url signature, enforcing its 64-byte length.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidEncoding`] or [`CryptoError::WrongLength`].
    pub fn from_b64(s: &str) -> Result<Self, CryptoError> {
        let decoded = codec::decode_material(s, Material::Signature)?;
        let mut out = [0u8; ED25519_SIGNATURE_LEN];
        out.copy_from_slice(decoded.as_bytes());
        Ok(Self(out))
    }

    /// Canonical base64url encoding.
    #[must_use]
    pub fn to_b64(&self) -> String {
        codec::encode(&self.0)
    }

    /// Raw signature bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ED25519_SIGNATURE_LEN] {
        &self.0
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ed25519Signature(***)")
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Returns `true` iff `sig` is a valid signature over `message` by `public_key`.
#[must_use]
pub fn verify(public_key: &Ed25519PublicKey, message: &[u8], sig: &Ed25519Signature) -> bool {
    UnparsedPublicKey::new(&signature::ED25519, public_key.as_bytes())
        .verify(message, sig.as_bytes())
        .is_ok()
}

/// Verify with raw slices that the caller has already length-checked.
///
/// # Panics
///
/// Panics with a `contract violation:` message if `public_key` is not
/// 32 bytes or `sig` is not 64 bytes. Those lengths must be enforced with
/// [`codec::decode_material`] before this call; reaching the panic means
/// the calling code is wrong, not the client input.
#[must_use]
#[track_caller]
pub fn verify_slices(public_key: &[u8], message: &[u8], sig: &[u8]) -> bool {
    let Ok(public_key) = <[u8; ED25519_PUBLIC_KEY_LEN]>::try_from(public_key) else {
        contract_violation(
            "verify",
            Material::PublicKey.name(),
            ED25519_PUBLIC_KEY_LEN,
            public_key.len(),
        );
    };
    let Ok(sig) = <[u8; ED25519_SIGNATURE_LEN]>::try_from(sig) else {
        contract_violation(
            "verify",
            Material::Signature.name(),
            ED25519_SIGNATURE_LEN,
            sig.len(),
        );
    };
    verify(&Ed25519PublicKey(public_key), message, &Ed25519Signature(sig))
}

// ---------------------------------------------------------------------------
// Signing (client direction)
// ---------------------------------------------------------------------------

/// Sign `message` with the Ed25519 key derived from a 32-byte seed.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyMaterial`] if `ring` rejects the seed.
pub fn sign(
    seed: &[u8; ED25519_SEED_LEN],
    message: &[u8],
) -> Result<Ed25519Signature, CryptoError> {
    let key_pair = Ed25519KeyPair::from_seed_unchecked(seed)
        .map_err(|_| CryptoError::InvalidKeyMaterial("Ed25519 seed rejected"))?;
    let mut out = [0u8; ED25519_SIGNATURE_LEN];
    out.copy_from_slice(key_pair.sign(message).as_ref());
    Ok(Ed25519Signature(out))
}

/// Derive the public key for a 32-byte seed.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidKeyMaterial`] if `ring` rejects the seed.
pub fn public_key_from_seed(
    seed: &[u8; ED25519_SEED_LEN],
) -> Result<Ed25519PublicKey, CryptoError> {
    let key_pair = Ed25519KeyPair::from_seed_unchecked(seed)
        .map_err(|_| CryptoError::InvalidKeyMaterial("Ed25519 seed rejected"))?;
    let mut out = [0u8; ED25519_PUBLIC_KEY_LEN];
    out.copy_from_slice(key_pair.public_key().as_ref());
    Ok(Ed25519PublicKey(out))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
