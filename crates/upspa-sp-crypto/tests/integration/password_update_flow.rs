//! Integration tests for the password-update request path.
//!
//! The client side builds the signed message and signs it; the request
//! crosses the boundary as JSON with base64url fields; the SP side decodes
//! with an explicit ciphertext length and verifies.

use data_encoding::{BASE64URL, HEXLOWER};
use rand::rngs::OsRng;
use rand::RngCore;
use upspa_sp_crypto::password_update::{
    build_message, PasswordUpdateMessage, PasswordUpdateRequestB64, CIPHERID_CT_LEN,
    CIPHERID_SIG_MSG_LEN,
};
use upspa_sp_crypto::signature::{public_key_from_seed, verify_slices};
use upspa_sp_crypto::{encode, CryptoError, ScalarShare};

fn random_seed() -> [u8; 32] {
    let mut seed = [0u8; 32];
    OsRng.fill_bytes(&mut seed);
    seed
}

fn random_message(sp_id: u32) -> PasswordUpdateMessage {
    let mut cid_nonce = [0u8; 24];
    let mut cid_ct = vec![0u8; CIPHERID_CT_LEN];
    let mut cid_tag = [0u8; 16];
    let mut share = [0u8; 32];
    OsRng.fill_bytes(&mut cid_nonce);
    OsRng.fill_bytes(&mut cid_ct);
    OsRng.fill_bytes(&mut cid_tag);
    OsRng.fill_bytes(&mut share);
    PasswordUpdateMessage {
        cid_nonce,
        cid_ct,
        cid_tag,
        k_i_new: ScalarShare::from_bytes(share),
        timestamp: 1_735_689_600,
        sp_id,
    }
}

fn to_wire(message: &PasswordUpdateMessage, seed: &[u8; 32]) -> PasswordUpdateRequestB64 {
    PasswordUpdateRequestB64 {
        cid_nonce: encode(&message.cid_nonce),
        cid_ct: encode(&message.cid_ct),
        cid_tag: encode(&message.cid_tag),
        k_i_new: encode(message.k_i_new.expose()),
        sig: message.sign(seed).expect("signing should succeed").to_b64(),
        timestamp: message.timestamp,
        sp_id: message.sp_id,
    }
}

/// Client signs, request crosses as JSON, SP verifies.
#[test]
fn signed_request_verifies_after_json_transport() {
    let seed = random_seed();
    let pk = public_key_from_seed(&seed).expect("public key");
    let message = random_message(3);

    let json = serde_json::to_string(&to_wire(&message, &seed)).expect("serialize");
    let wire: PasswordUpdateRequestB64 = serde_json::from_str(&json).expect("deserialize");

    let request = wire.decode(CIPHERID_CT_LEN).expect("decode should succeed");
    assert!(request.verify(&pk));
    assert_eq!(request.message.to_bytes().len(), CIPHERID_SIG_MSG_LEN);
    assert_eq!(request.message.k_i_new.expose(), message.k_i_new.expose());
}

/// Padded base64url fields are accepted and verify identically.
#[test]
fn padded_fields_verify() {
    let seed = random_seed();
    let pk = public_key_from_seed(&seed).expect("public key");
    let message = random_message(1);

    let mut wire = to_wire(&message, &seed);
    wire.cid_nonce = BASE64URL.encode(&message.cid_nonce);
    wire.cid_tag = BASE64URL.encode(&message.cid_tag);
    assert!(wire.cid_tag.ends_with("=="));

    let request = wire.decode(CIPHERID_CT_LEN).expect("decode should succeed");
    assert!(request.verify(&pk));
}

/// The signature binds every field: flipping any one breaks verification.
#[test]
fn every_field_is_bound_by_the_signature() {
    let seed = random_seed();
    let pk = public_key_from_seed(&seed).expect("public key");
    let message = random_message(2);
    let wire = to_wire(&message, &seed);

    let flip = |text: &str| {
        let mut raw = upspa_sp_crypto::canonicalize(text).unwrap().as_bytes().to_vec();
        raw[0] ^= 0x01;
        encode(&raw)
    };

    let mut tampered = Vec::new();
    let mut w = wire.clone();
    w.cid_nonce = flip(&w.cid_nonce);
    tampered.push(w);
    let mut w = wire.clone();
    w.cid_ct = flip(&w.cid_ct);
    tampered.push(w);
    let mut w = wire.clone();
    w.cid_tag = flip(&w.cid_tag);
    tampered.push(w);
    let mut w = wire.clone();
    w.k_i_new = flip(&w.k_i_new);
    tampered.push(w);
    let mut w = wire.clone();
    w.timestamp += 1;
    tampered.push(w);
    let mut w = wire.clone();
    w.sp_id += 1;
    tampered.push(w);

    for (i, w) in tampered.into_iter().enumerate() {
        let request = w.decode(CIPHERID_CT_LEN).expect("tampered request still decodes");
        assert!(!request.verify(&pk), "tampered field #{i} must fail verification");
    }

    assert!(wire.decode(CIPHERID_CT_LEN).unwrap().verify(&pk));
}

/// Verification by another client's key fails.
#[test]
fn other_client_key_is_rejected() {
    let seed = random_seed();
    let other = public_key_from_seed(&random_seed()).expect("public key");
    let message = random_message(4);
    let request = to_wire(&message, &seed).decode(CIPHERID_CT_LEN).unwrap();
    assert!(!request.verify(&other));
}

/// A verifier that assumes a different ciphertext length rejects the
/// request before any signature check.
#[test]
fn mismatched_ciphertext_length_is_wrong_length() {
    let seed = random_seed();
    let message = random_message(5);
    let err = to_wire(&message, &seed).decode(CIPHERID_CT_LEN - 1).unwrap_err();
    assert_eq!(
        err,
        CryptoError::WrongLength {
            field: "cid ciphertext",
            expected: CIPHERID_CT_LEN - 1,
            actual: CIPHERID_CT_LEN,
        }
    );
    insta::assert_snapshot!(err.to_string(), @"cid ciphertext: expected 95 bytes, got 96");
}

/// Field validation order follows the wire order.
#[test]
fn first_bad_field_is_reported() {
    let seed = random_seed();
    let message = random_message(6);

    let mut wire = to_wire(&message, &seed);
    wire.k_i_new = encode(&[0u8; 16]);
    wire.sig = "!!!".to_owned();
    assert_eq!(
        wire.decode(CIPHERID_CT_LEN).unwrap_err(),
        CryptoError::WrongLength {
            field: "scalar share",
            expected: 32,
            actual: 16,
        }
    );

    let mut wire = to_wire(&message, &seed);
    wire.sig = "!!!".to_owned();
    assert_eq!(
        wire.decode(CIPHERID_CT_LEN).unwrap_err(),
        CryptoError::InvalidEncoding
    );
}

/// The builder and `verify_slices` agree with an externally held signature.
#[test]
fn raw_builder_and_slice_verifier_agree() {
    let seed = random_seed();
    let pk = public_key_from_seed(&seed).expect("public key");
    let message = random_message(7);
    let sig = message.sign(&seed).expect("sign");

    let bytes = build_message(
        &message.cid_nonce,
        &message.cid_ct,
        &message.cid_tag,
        message.k_i_new.expose(),
        message.timestamp,
        message.sp_id,
    );
    assert!(verify_slices(pk.as_bytes(), &bytes, sig.as_bytes()));
}

/// Byte-exact layout of the reference message.
#[test]
fn reference_layout_snapshot() {
    let msg = build_message(
        &[0xAA; 24],
        &[0xBB; 10],
        &[0xCC; 16],
        &[0xDD; 32],
        0xDEAD_BEEF_CAFE_BABE,
        0x0102_0304,
    );
    assert_eq!(msg.len(), 94);
    insta::assert_snapshot!(
        HEXLOWER.encode(&msg),
        @"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaabbbbbbbbbbbbbbbbbbbbccccccccccccccccccccccccccccccccddddddddddddddddddddddddddddddddddddddddddddddddddddddddddddddddbebafecaefbeadde04030201"
    );
}

/// JSON shape of the request envelope as the API layer receives it.
#[test]
fn request_envelope_json_snapshot() {
    let wire = PasswordUpdateRequestB64 {
        cid_nonce: encode(&[0x01; 24]),
        cid_ct: encode(&[0x02; 4]),
        cid_tag: encode(&[0x03; 16]),
        k_i_new: encode(&[0x04; 32]),
        sig: encode(&[0x05; 64]),
        timestamp: 1_700_000_000,
        sp_id: 2,
    };
    insta::assert_json_snapshot!(wire, @r###"
    {
      "cid_nonce": "AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEB",
      "cid_ct": "AgICAg",
      "cid_tag": "AwMDAwMDAwMDAwMDAwMDAw",
      "k_i_new": "BAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQ",
      "sig": "BQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQUFBQ",
      "timestamp": 1700000000,
      "sp_id": 2
    }
    "###);

    let decoded = wire.decode(4).unwrap();
    assert_eq!(decoded.message.cid_ct, vec![0x02; 4]);
}
