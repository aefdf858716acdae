//! Immutable decoding policies.
//!
//! Both policies are plain `Copy` values handed to the `*_with` functions.
//! The functions without a suffix use [`Default`].

/// Which textual forms the codec accepts on input.
///
/// Output is always the canonical unpadded form, whatever the policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Base64Policy {
    /// Accept unpadded base64url, falling back to padded base64url.
    #[default]
    Lenient,
    /// Accept unpadded base64url only.
    Strict,
}

impl Base64Policy {
    /// Whether the padded fallback is tried after the canonical form fails.
    #[must_use]
    pub const fn accepts_padding(self) -> bool {
        matches!(self, Self::Lenient)
    }
}

/// How the 32 scalar-share bytes are turned into a group scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScalarDecoding {
    /// Clamp (clear bits 0..3 and 255, set bit 254), then reduce mod ℓ.
    #[default]
    Clamped,
    /// Require a canonical little-endian integer below ℓ; used unchanged.
    Canonical,
}
