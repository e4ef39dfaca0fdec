// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session credential tests.
//!
//! These tests verify that credentials round-trip, lapse at 90% of the
//! provider lifetime, and that forged and expired credentials fail the
//! same way.

use spotify_relay::credential::{CredentialError, SessionCodec, SessionTokens};

const KEY: &[u8] = b"test_signing_key_32_bytes_long!!";
const T0: u64 = 1_700_000_000;

fn tokens(access: &str, refresh: &str) -> SessionTokens {
    SessionTokens {
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
    }
}

#[test]
fn test_credential_roundtrip() {
    let codec = SessionCodec::new(KEY);

    for lifetime in [1, 60, 3600, 86_400] {
        let credential = codec
            .encode("access-123", "refresh-456", lifetime)
            .unwrap();
        assert_eq!(
            codec.decode(&credential).unwrap(),
            tokens("access-123", "refresh-456")
        );
    }
}

#[test]
fn test_ninety_percent_margin_boundary() {
    let codec = SessionCodec::new(KEY);
    let lifetime = 3600;
    let credential = codec.encode_at("AT", "RT", lifetime, T0).unwrap();

    // 0.89 × 3600 = 3204, 0.91 × 3600 = 3276
    assert!(codec.decode_at(&credential, T0 + 3204).is_ok());
    assert!(codec.decode_at(&credential, T0 + 3276).is_err());
}

#[test]
fn test_tampered_and_expired_fail_identically() {
    let codec = SessionCodec::new(KEY);
    let credential = codec.encode_at("AT", "RT", 3600, T0).unwrap();

    // Flip one character inside the signature segment
    let mut tampered = credential.clone().into_bytes();
    let pos = credential.rfind('.').unwrap() + 5;
    tampered[pos] = if tampered[pos] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();

    let forged = codec.decode_at(&tampered, T0 + 1).unwrap_err();
    let expired = codec.decode_at(&credential, T0 + 3600).unwrap_err();

    assert!(matches!(forged, CredentialError::Invalid));
    assert!(matches!(expired, CredentialError::Invalid));
    assert_eq!(forged.to_string(), expired.to_string());
}

#[test]
fn test_wrong_key_rejected() {
    let issuer = SessionCodec::new(KEY);
    let other = SessionCodec::new(b"another_signing_key_32_bytes!!!!");

    let credential = issuer.encode("AT", "RT", 3600).unwrap();

    assert!(matches!(
        other.decode(&credential),
        Err(CredentialError::Invalid)
    ));
}

#[test]
fn test_malformed_rejected() {
    let codec = SessionCodec::new(KEY);

    for garbage in ["", "invalid_token", "not.a.valid.jwt", "a.b.c"] {
        assert!(
            matches!(codec.decode(garbage), Err(CredentialError::Invalid)),
            "{garbage:?} should be rejected"
        );
    }
}
