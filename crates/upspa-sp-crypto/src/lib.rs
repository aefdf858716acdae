//! `upspa-sp-crypto`: Cryptographic core of the UPSPA storage provider.
//!
//! This crate is the audit target: zero network, zero async, zero global state.
//! Every operation is a pure function of its inputs and safe to call from any
//! number of request threads at once.
//!
//! Nothing here logs, formats or returns the value of a secret field. Log
//! events (via `tracing`, `debug` level) and errors carry field names and
//! byte counts only.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod config;
pub mod error;
pub mod material;

pub mod codec;

pub mod signature;

pub mod toprf;

pub mod password_update;

pub use codec::{
    canonicalize, canonicalize_with, decode_array, decode_array_with, decode_field,
    decode_field_with, decode_fixed, decode_fixed_with, decode_material, decode_material_with,
    encode, Canonical,
};
pub use config::{Base64Policy, ScalarDecoding};
pub use error::{contract_violation, CryptoError};
pub use material::{
    Material, CT_BLOB_NONCE_LEN, CT_BLOB_TAG_LEN, ED25519_PUBLIC_KEY_LEN, ED25519_SEED_LEN,
    ED25519_SIGNATURE_LEN, RISTRETTO_POINT_LEN, SCALAR_SHARE_LEN,
};
pub use password_update::{
    build_message, message_len, PasswordUpdateMessage, PasswordUpdateRequest,
    PasswordUpdateRequestB64, CIPHERID_CT_LEN, CIPHERID_SIG_MSG_LEN, SIG_MSG_OVERHEAD,
};
pub use signature::{sign, verify, verify_slices, Ed25519PublicKey, Ed25519Signature};
pub use toprf::{evaluate, evaluate_b64, evaluate_with, ScalarShare};
