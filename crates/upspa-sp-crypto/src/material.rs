//! Fixed-length table for cryptographic material crossing the SP boundary.
//!
//! These lengths are part of the shared protocol contract. They are
//! compile-time constants; nothing in this crate can change them at runtime.

/// Ed25519 public key length in bytes.
pub const ED25519_PUBLIC_KEY_LEN: usize = 32;

/// Ed25519 signature length in bytes.
pub const ED25519_SIGNATURE_LEN: usize = 64;

/// Ed25519 seed length in bytes (client-side signing only).
pub const ED25519_SEED_LEN: usize = 32;

/// XChaCha20-Poly1305 nonce length of a ciphertext blob.
pub const CT_BLOB_NONCE_LEN: usize = 24;

/// Poly1305 tag length of a ciphertext blob.
pub const CT_BLOB_TAG_LEN: usize = 16;

/// Compressed ristretto255 element length.
pub const RISTRETTO_POINT_LEN: usize = 32;

/// TOPRF scalar share (`k_i`) length.
pub const SCALAR_SHARE_LEN: usize = 32;

/// Role of a fixed-length value in the protocol.
///
/// Every decode at the request boundary names one of these, so the expected
/// length always comes from this table and never from the caller's guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    /// Client Ed25519 verification key.
    PublicKey,
    /// Ed25519 signature.
    Signature,
    /// Ciphertext blob nonce.
    AeadNonce,
    /// Ciphertext blob authentication tag.
    AeadTag,
    /// Compressed ristretto255 element (e.g. a blinded point).
    GroupElement,
    /// TOPRF scalar share.
    ScalarShare,
}

impl Material {
    /// Every material role, in table order.
    pub const ALL: [Self; 6] = [
        Self::PublicKey,
        Self::Signature,
        Self::AeadNonce,
        Self::AeadTag,
        Self::GroupElement,
        Self::ScalarShare,
    ];

    /// Exact decoded length required for this role.
    #[must_use]
    pub const fn len(self) -> usize {
        match self {
            Self::PublicKey => ED25519_PUBLIC_KEY_LEN,
            Self::Signature => ED25519_SIGNATURE_LEN,
            Self::AeadNonce => CT_BLOB_NONCE_LEN,
            Self::AeadTag => CT_BLOB_TAG_LEN,
            Self::GroupElement => RISTRETTO_POINT_LEN,
            Self::ScalarShare => SCALAR_SHARE_LEN,
        }
    }

    /// Field name used in errors and log events.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PublicKey => "public key",
            Self::Signature => "signature",
            Self::AeadNonce => "nonce",
            Self::AeadTag => "tag",
            Self::GroupElement => "group element",
            Self::ScalarShare => "scalar share",
        }
    }
}
