//! Password-update signed message.
//!
//! This module provides:
//! - [`build_message`]: the exact byte sequence a client signs and the SP
//!   verifies for a password update
//! - [`PasswordUpdateMessage`]: the six signed fields, owned
//! - [`PasswordUpdateRequestB64`] / [`PasswordUpdateRequest`]: the textual
//!   request envelope and its decoded, length-checked form
//!
//! # Wire format
//!
//! ```text
//! offset   len  field
//! 0        24   cid_nonce
//! 24       N    cid_ct
//! 24+N     16   cid_tag
//! 40+N     32   k_i_new          (new TOPRF scalar share)
//! 72+N     8    timestamp        (u64, little-endian)
//! 80+N     4    sp_id            (u32, little-endian)
//! ```
//!
//! Total `84 + N`. There is no length prefix for `cid_ct`: signer and
//! verifier must agree on `N` out of band, which is why
//! [`PasswordUpdateRequestB64::decode`] takes it as an explicit argument.
//!
//! The message contains key material (`k_i_new`); it is returned in a
//! [`Zeroizing`] buffer and must not be logged.

use crate::codec;
use crate::error::CryptoError;
use crate::config::Base64Policy;
use crate::material::{
    Material, CT_BLOB_NONCE_LEN, CT_BLOB_TAG_LEN, ED25519_SEED_LEN, ED25519_SIGNATURE_LEN,
    SCALAR_SHARE_LEN,
};
use crate::signature::{self, Ed25519PublicKey, Ed25519Signature};
use crate::toprf::ScalarShare;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

/// Encoded timestamp width.
pub const TIMESTAMP_LEN: usize = 8;

/// Encoded storage-provider id width.
pub const SP_ID_LEN: usize = 4;

/// Message length excluding the ciphertext: `24 + 16 + 32 + 8 + 4`.
pub const SIG_MSG_OVERHEAD: usize =
    CT_BLOB_NONCE_LEN + CT_BLOB_TAG_LEN + SCALAR_SHARE_LEN + TIMESTAMP_LEN + SP_ID_LEN;

/// Ciphertext length of `cid` as produced by the UPSPA client
/// (`ssk(32) || Rsp(32) || K0(32)`).
pub const CIPHERID_CT_LEN: usize = 96;

/// Signed message length for a standard `cid`.
pub const CIPHERID_SIG_MSG_LEN: usize = SIG_MSG_OVERHEAD + CIPHERID_CT_LEN;

/// Total signed message length for a ciphertext of `ct_len` bytes.
#[must_use]
pub const fn message_len(ct_len: usize) -> usize {
    SIG_MSG_OVERHEAD.saturating_add(ct_len)
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Serialize the password-update fields into the signed byte layout.
///
/// Used on both sides: the client signs the result, the SP rebuilds it from
/// the request and verifies the signature against it.
#[must_use]
pub fn build_message(
    cid_nonce: &[u8; CT_BLOB_NONCE_LEN],
    cid_ct: &[u8],
    cid_tag: &[u8; CT_BLOB_TAG_LEN],
    k_i_new: &[u8; SCALAR_SHARE_LEN],
    timestamp: u64,
    sp_id: u32,
) -> Zeroizing<Vec<u8>> {
    let mut msg = Zeroizing::new(Vec::with_capacity(message_len(cid_ct.len())));
    msg.extend_from_slice(cid_nonce);
    msg.extend_from_slice(cid_ct);
    msg.extend_from_slice(cid_tag);
    msg.extend_from_slice(k_i_new);
    msg.extend_from_slice(&timestamp.to_le_bytes());
    msg.extend_from_slice(&sp_id.to_le_bytes());
    msg
}

// ---------------------------------------------------------------------------
// Typed message
// ---------------------------------------------------------------------------

/// The fields covered by a password-update signature.
pub struct PasswordUpdateMessage {
    /// Nonce of the new `cid` blob.
    pub cid_nonce: [u8; CT_BLOB_NONCE_LEN],
    /// Ciphertext of the new `cid` blob.
    pub cid_ct: Vec<u8>,
    /// Tag of the new `cid` blob.
    pub cid_tag: [u8; CT_BLOB_TAG_LEN],
    /// New TOPRF share for this SP.
    pub k_i_new: ScalarShare,
    /// Client timestamp.
    pub timestamp: u64,
    /// Target storage provider.
    pub sp_id: u32,
}

impl PasswordUpdateMessage {
    /// Signed byte layout of this message.
    #[must_use]
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        build_message(
            &self.cid_nonce,
            &self.cid_ct,
            &self.cid_tag,
            self.k_i_new.expose(),
            self.timestamp,
            self.sp_id,
        )
    }

    /// Sign this message with the client's Ed25519 seed.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyMaterial`] if the seed is rejected.
    pub fn sign(&self, seed: &[u8; ED25519_SEED_LEN]) -> Result<Ed25519Signature, CryptoError> {
        signature::sign(seed, &self.to_bytes())
    }

    /// Verify `sig` over this message.
    #[must_use]
    pub fn verify(&self, public_key: &Ed25519PublicKey, sig: &Ed25519Signature) -> bool {
        signature::verify(public_key, &self.to_bytes(), sig)
    }
}

impl fmt::Debug for PasswordUpdateMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordUpdateMessage")
            .field("cid_ct_len", &self.cid_ct.len())
            .field("timestamp", &self.timestamp)
            .field("sp_id", &self.sp_id)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Request envelope
// ---------------------------------------------------------------------------

/// Password-update request fields as they arrive from the API layer.
///
/// Byte fields are base64url (unpadded, or padded leniently).
#[derive(Clone, Serialize, Deserialize)]
pub struct PasswordUpdateRequestB64 {
    /// `cid_new` nonce.
    pub cid_nonce: String,
    /// `cid_new` ciphertext.
    pub cid_ct: String,
    /// `cid_new` tag.
    pub cid_tag: String,
    /// New TOPRF share for this SP.
    pub k_i_new: String,
    /// Client signature over [`build_message`].
    pub sig: String,
    /// Client timestamp.
    pub timestamp: u64,
    /// Target storage provider.
    pub sp_id: u32,
}

impl fmt::Debug for PasswordUpdateRequestB64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordUpdateRequestB64")
            .field("timestamp", &self.timestamp)
            .field("sp_id", &self.sp_id)
            .finish_non_exhaustive()
    }
}

impl PasswordUpdateRequestB64 {
    /// Decode every byte field, enforcing fixed lengths and `cid_ct_len`.
    ///
    /// # Errors
    ///
    /// [`CryptoError::InvalidEncoding`] or [`CryptoError::WrongLength`] for
    /// the first field that fails, in wire order.
    pub fn decode(&self, cid_ct_len: usize) -> Result<PasswordUpdateRequest, CryptoError> {
        self.decode_with(cid_ct_len, Base64Policy::default())
    }

    /// [`Self::decode`] under an explicit [`Base64Policy`].
    ///
    /// # Errors
    ///
    /// See [`Self::decode`].
    pub fn decode_with(
        &self,
        cid_ct_len: usize,
        policy: Base64Policy,
    ) -> Result<PasswordUpdateRequest, CryptoError> {
        let cid_nonce =
            codec::decode_array_with::<CT_BLOB_NONCE_LEN>(&self.cid_nonce, "cid nonce", policy)?;
        let cid_ct = codec::decode_field_with(&self.cid_ct, "cid ciphertext", cid_ct_len, policy)?
            .as_bytes()
            .to_vec();
        let cid_tag =
            codec::decode_array_with::<CT_BLOB_TAG_LEN>(&self.cid_tag, "cid tag", policy)?;
        let k_i_new = codec::decode_array_with::<SCALAR_SHARE_LEN>(
            &self.k_i_new,
            Material::ScalarShare.name(),
            policy,
        )?;
        let sig = codec::decode_array_with::<ED25519_SIGNATURE_LEN>(
            &self.sig,
            Material::Signature.name(),
            policy,
        )?;
        Ok(PasswordUpdateRequest {
            message: PasswordUpdateMessage {
                cid_nonce: *cid_nonce,
                cid_ct,
                cid_tag: *cid_tag,
                k_i_new: ScalarShare::from_bytes(*k_i_new),
                timestamp: self.timestamp,
                sp_id: self.sp_id,
            },
            sig: Ed25519Signature(*sig),
        })
    }
}

/// A decoded password-update request: the signed fields plus the signature.
#[derive(Debug)]
pub struct PasswordUpdateRequest {
    /// Signed fields.
    pub message: PasswordUpdateMessage,
    /// Client signature.
    pub sig: Ed25519Signature,
}

impl PasswordUpdateRequest {
    /// Verify the client signature over the rebuilt message.
    #[must_use]
    pub fn verify(&self, public_key: &Ed25519PublicKey) -> bool {
        let ok = self.message.verify(public_key, &self.sig);
        if !ok {
            tracing::debug!(
                field = Material::Signature.name(),
                sp_id = self.message.sp_id,
                "password-update signature rejected"
            );
        }
        ok
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
