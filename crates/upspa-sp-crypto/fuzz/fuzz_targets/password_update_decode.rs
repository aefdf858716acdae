//! Fuzz target for password-update request decoding.
//!
//! Feeds arbitrary JSON to the request envelope, decodes with the standard
//! ciphertext length and verifies against a fixed key. Must never panic.
//!
//! # Usage
//!
//! ```sh
//! cd crates/upspa-sp-crypto
//! cargo +nightly fuzz run password_update_decode -- -max_len=2048
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use upspa_sp_crypto::{Ed25519PublicKey, PasswordUpdateRequestB64, CIPHERID_CT_LEN};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(wire) = serde_json::from_str::<PasswordUpdateRequestB64>(s) else {
        return;
    };
    if let Ok(request) = wire.decode(CIPHERID_CT_LEN) {
        let _ = request.verify(&Ed25519PublicKey([0x42; 32]));
    }
});
