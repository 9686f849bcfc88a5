use crate::{AuthError, Claims, Result as AuthErrorResult, SigningKey, TokenPolicy, UnsignedToken};

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::Value;

/// A signed, encoded token.
///
/// Produced either by [`UnsignedToken::encode_at`] or by [`Token::decode`];
/// both paths yield the same value for the same wire string and key. The
/// time window is not checked on construction, only by
/// [`Token::validate_at`].
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    claims: Claims,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    signing_key: SigningKey,
    encoded: String,
}

impl Token {
    /// Start an unsigned token, rejecting an unusable policy immediately.
    #[track_caller]
    pub fn build(
        issuer: impl Into<String>,
        signing_key: impl Into<SigningKey>,
        ttl_hours: i64,
    ) -> AuthErrorResult<UnsignedToken> {
        Ok(TokenPolicy::new(issuer, signing_key, ttl_hours)?.token())
    }

    /// Parse and verify a `header.payload.signature` string.
    ///
    /// Fails with [`AuthError::Format`] for anything that is not three
    /// non-empty base64url parts carrying valid claims JSON, and with
    /// [`AuthError::Signature`] when the MAC does not match `signing_key`.
    #[track_caller]
    pub fn decode(encoded: &str, signing_key: impl Into<SigningKey>) -> AuthErrorResult<Self> {
        let signing_key = signing_key.into();

        let parts: Vec<&str> = encoded.split('.').collect();
        if parts.len() != 3 || parts.iter().any(|part| part.is_empty()) {
            return Err(AuthError::Format {
                message: format!(
                    "expected 3 non-empty dot-separated parts, got {}",
                    parts.len()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let claims = Self::verify(encoded, &signing_key)?;
        claims.validate()?;

        Self::from_parts(claims, signing_key, encoded.to_string())
    }

    #[track_caller]
    pub(crate) fn from_parts(
        claims: Claims,
        signing_key: SigningKey,
        encoded: String,
    ) -> AuthErrorResult<Self> {
        Ok(Self {
            issued_at: claims.issued_at()?,
            expires_at: claims.expires_at()?,
            claims,
            signing_key,
            encoded,
        })
    }

    /// Re-verify the signature, then check `issued_at <= now < expires_at`.
    ///
    /// A token issued in the future is rejected outright rather than
    /// treated as not-yet-active.
    #[track_caller]
    pub fn validate_at(&self, now: DateTime<Utc>) -> AuthErrorResult<()> {
        Self::verify(&self.encoded, &self.signing_key)?;

        let now = now.timestamp();
        if now < self.claims.iat {
            return Err(AuthError::NotYetValid {
                issued_at: self.claims.iat,
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if now >= self.claims.exp {
            return Err(AuthError::Expired {
                expires_at: self.claims.exp,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        self.validate_at(Utc::now())
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.validate_at(now).is_ok()
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn issuer(&self) -> &str {
        &self.claims.iss
    }

    pub fn subject_id(&self) -> &str {
        &self.claims.sub
    }

    pub fn display_name(&self) -> &str {
        &self.claims.name
    }

    pub fn role(&self) -> &str {
        &self.claims.role
    }

    pub fn custom(&self) -> &BTreeMap<String, Value> {
        &self.claims.custom
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whole hours between issue and expiry
    pub fn ttl_hours(&self) -> i64 {
        (self.claims.exp - self.claims.iat) / 3600
    }

    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    #[track_caller]
    fn verify(encoded: &str, signing_key: &SigningKey) -> AuthErrorResult<Claims> {
        if signing_key.is_empty() {
            return Err(AuthError::Configuration {
                message: "signing key cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // Time checks happen in validate_at, not here
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();

        jsonwebtoken::decode::<Claims>(
            encoded,
            &DecodingKey::from_secret(signing_key.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::Signature {
                location: ErrorLocation::from(Location::caller()),
            },
            _ => AuthError::Format {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}
