//! Fuzz target for the base64url canonicalizer.
//!
//! Any accepted input must canonicalize to a string that is its own
//! canonical form and decodes to the same bytes.
//!
//! # Usage
//!
//! ```sh
//! cd crates/upspa-sp-crypto
//! cargo +nightly fuzz run canonicalize -- -max_len=4096
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use upspa_sp_crypto::{canonicalize, canonicalize_with, Base64Policy};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(decoded) = canonicalize(s) {
        let again = canonicalize_with(decoded.as_str(), Base64Policy::Strict)
            .expect("canonical output must be accepted strictly");
        assert_eq!(again.as_str(), decoded.as_str());
        assert_eq!(again.as_bytes(), decoded.as_bytes());
        assert!(!decoded.as_str().contains('='));
    }
});
