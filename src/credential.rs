// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session credential codec.
//!
//! The credential is an HS256 JWT carrying the Spotify access and refresh
//! tokens. Its `exp` is set to 90% of the provider-reported lifetime so it
//! lapses before the access token inside it does. Nothing is stored
//! server-side; the signature and `exp` are the whole validity check.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Percentage of the provider lifetime granted to the credential.
const LIFETIME_MARGIN_PERCENT: u64 = 90;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub access_token: String,
    pub refresh_token: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Provider tokens recovered from a valid credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Bad signature, malformed, or expired. Deliberately one variant.
    #[error("invalid credential")]
    Invalid,

    #[error("credential encoding failed: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
}

/// Encodes and verifies session credentials with one process-wide key.
#[derive(Clone)]
pub struct SessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionCodec {
    pub fn new(signing_key: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an explicit clock in `decode_at`
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(signing_key),
            decoding_key: DecodingKey::from_secret(signing_key),
            validation,
        }
    }

    /// Wrap provider tokens in a credential valid for 90% of `lifetime_secs`.
    pub fn encode(
        &self,
        access_token: &str,
        refresh_token: &str,
        lifetime_secs: u64,
    ) -> Result<String, CredentialError> {
        self.encode_at(access_token, refresh_token, lifetime_secs, now_unix())
    }

    pub fn encode_at(
        &self,
        access_token: &str,
        refresh_token: &str,
        lifetime_secs: u64,
        now: u64,
    ) -> Result<String, CredentialError> {
        let claims = Claims {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
            iat: now,
            exp: now.saturating_add(credential_lifetime(lifetime_secs)),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(CredentialError::Encode)
    }

    /// Verify a credential and return the tokens inside it.
    pub fn decode(&self, credential: &str) -> Result<SessionTokens, CredentialError> {
        self.decode_at(credential, now_unix())
    }

    pub fn decode_at(&self, credential: &str, now: u64) -> Result<SessionTokens, CredentialError> {
        let data = jsonwebtoken::decode::<Claims>(credential, &self.decoding_key, &self.validation)
            .map_err(|_| CredentialError::Invalid)?;

        if now > data.claims.exp {
            return Err(CredentialError::Invalid);
        }

        Ok(SessionTokens {
            access_token: data.claims.access_token,
            refresh_token: data.claims.refresh_token,
        })
    }
}

/// floor(lifetime × 0.9) in whole seconds.
pub fn credential_lifetime(lifetime_secs: u64) -> u64 {
    lifetime_secs.saturating_mul(LIFETIME_MARGIN_PERCENT) / 100
}

fn now_unix() -> u64 {
    jsonwebtoken::get_current_timestamp()
}
