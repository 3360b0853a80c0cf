//! Stateless HS256 signer/verifier for access tokens

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use std::fmt;

use crate::domain::entities::{AccessTokenClaims, UserId};
use crate::errors::{DomainError, TokenError};

/// The only algorithm access tokens are signed and accepted with
pub const ACCESS_TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Symmetric key for signing access tokens
///
/// Never empty. `Debug` output does not reveal the key.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, DomainError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(DomainError::Validation {
                message: "signing secret must not be empty".to_string(),
            });
        }
        Ok(Self(secret))
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret([redacted])")
    }
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Signs and verifies access tokens with a single secret
///
/// Cheap to clone; holds no mutable state and performs no I/O.
#[derive(Clone)]
pub struct AccessTokenCoder {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AccessTokenCoder {
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(ACCESS_TOKEN_ALGORITHM);
        // Expiry is checked against the caller's clock with zero leeway
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign an access token for `subject` valid for `ttl`
    pub fn generate(&self, subject: UserId, ttl: Duration) -> Result<String, TokenError> {
        self.generate_at(subject, Utc::now(), ttl)
    }

    pub fn generate_at(
        &self,
        subject: UserId,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let claims =
            AccessTokenClaims::new(subject, now, ttl).ok_or(TokenError::TokenGenerationFailed)?;
        encode(&Header::new(ACCESS_TOKEN_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|_| TokenError::TokenGenerationFailed)
    }

    /// Verify an access token and return its subject
    pub fn validate(&self, token: &str) -> Result<UserId, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Verify an access token as of `now`
    ///
    /// The signature is checked before expiry, so a forged token is reported
    /// as `BadSignature` even when it is also expired.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenError> {
        let mut parts = token.split('.');
        let (Some(header), Some(_), Some(_), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };
        self.check_algorithm(header)?;

        let data = decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::InvalidAlgorithm => TokenError::WrongAlgorithm,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        if data.claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        data.claims.user_id().map_err(|_| TokenError::Malformed)
    }

    fn check_algorithm(&self, encoded_header: &str) -> Result<(), TokenError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(encoded_header)
            .map_err(|_| TokenError::Malformed)?;
        let header: RawHeader = serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)?;

        if header.alg != "HS256" {
            return Err(TokenError::WrongAlgorithm);
        }
        Ok(())
    }
}

impl fmt::Debug for AccessTokenCoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessTokenCoder")
            .field("algorithm", &ACCESS_TOKEN_ALGORITHM)
            .finish_non_exhaustive()
    }
}
