//! Fuzz target for TOPRF evaluation.
//!
//! Splits the input into a share and a point; evaluation must return a
//! result or an error, never panic, for every length and encoding.
//!
//! # Usage
//!
//! ```sh
//! cd crates/upspa-sp-crypto
//! cargo +nightly fuzz run evaluate -- -max_len=96
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use upspa_sp_crypto::{evaluate, evaluate_with, ScalarDecoding};

fuzz_target!(|data: &[u8]| {
    let split = data.len().min(32);
    let (share, point) = data.split_at(split);
    let _ = evaluate(share, point);
    let _ = evaluate_with(share, point, ScalarDecoding::Canonical);
});
