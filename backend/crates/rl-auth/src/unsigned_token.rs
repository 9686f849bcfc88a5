use crate::{AuthError, Claims, Result as AuthErrorResult, Token, TokenPolicy};

use std::collections::BTreeMap;
use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::Value;

/// A token whose claims can still change.
///
/// Every `with_*` call consumes the builder and returns the updated value.
/// [`UnsignedToken::encode_at`] fixes the issue/expiry times, signs, and
/// yields an immutable [`Token`].
#[derive(Debug, Clone)]
pub struct UnsignedToken {
    policy: TokenPolicy,
    subject_id: String,
    display_name: String,
    role: String,
    custom: BTreeMap<String, Value>,
    issued_at: Option<DateTime<Utc>>,
}

impl UnsignedToken {
    pub(crate) fn new(policy: TokenPolicy) -> Self {
        Self {
            policy,
            subject_id: String::new(),
            display_name: String::new(),
            role: String::new(),
            custom: BTreeMap::new(),
            issued_at: None,
        }
    }

    pub fn with_subject(
        mut self,
        subject_id: impl Into<String>,
        display_name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        self.subject_id = subject_id.into();
        self.display_name = display_name.into();
        self.role = role.into();
        self
    }

    /// Merge extra claims; later keys overwrite earlier ones.
    pub fn with_custom_claims<I, K>(mut self, claims: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.custom
            .extend(claims.into_iter().map(|(key, value)| (key.into(), value)));
        self
    }

    /// Pin the issue time instead of using the encode time.
    pub fn with_issued_at(mut self, issued_at: DateTime<Utc>) -> Self {
        self.issued_at = Some(issued_at);
        self
    }

    pub fn policy(&self) -> &TokenPolicy {
        &self.policy
    }

    /// Encode using the system clock.
    #[track_caller]
    pub fn encode(self) -> AuthErrorResult<Token> {
        self.encode_at(Utc::now())
    }

    /// Sign and serialize. `now` is the issue time unless one was pinned.
    #[track_caller]
    pub fn encode_at(self, now: DateTime<Utc>) -> AuthErrorResult<Token> {
        let iat = self.issued_at.unwrap_or(now).timestamp();
        let exp = iat
            .checked_add(self.policy.ttl_seconds())
            .ok_or_else(|| AuthError::Encoding {
                message: format!("expiry overflows for iat={iat}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let claims = Claims {
            iss: self.policy.issuer().to_string(),
            sub: self.subject_id,
            name: self.display_name,
            role: self.role,
            iat,
            exp,
            custom: self.custom,
        };

        let encoded = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.policy.signing_key().as_bytes()),
        )
        .map_err(|e| AuthError::Encoding {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Token::from_parts(claims, self.policy.signing_key().clone(), encoded)
    }
}
