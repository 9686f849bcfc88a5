use crate::{AuthError, Result as AuthErrorResult, SigningKey, UnsignedToken};

use rl_core::Identity;
use rl_core::models::identity::DEFAULT_ROLE;

use std::panic::Location;

use error_location::ErrorLocation;

const SECONDS_PER_HOUR: i64 = 3600;

/// Issuer, key and lifetime shared by every token the service mints.
///
/// Validated on construction so a bad configuration fails at startup rather
/// than on the first login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPolicy {
    issuer: String,
    signing_key: SigningKey,
    ttl_hours: i64,
}

impl TokenPolicy {
    #[track_caller]
    pub fn new(
        issuer: impl Into<String>,
        signing_key: impl Into<SigningKey>,
        ttl_hours: i64,
    ) -> AuthErrorResult<Self> {
        let issuer = issuer.into();
        let signing_key = signing_key.into();

        let problem = if issuer.is_empty() {
            Some("issuer cannot be empty".to_string())
        } else if signing_key.is_empty() {
            Some("signing key cannot be empty".to_string())
        } else if ttl_hours <= 0 {
            Some(format!("ttl_hours must be positive, got {ttl_hours}"))
        } else if ttl_hours.checked_mul(SECONDS_PER_HOUR).is_none() {
            Some(format!("ttl_hours is too large: {ttl_hours}"))
        } else {
            None
        };

        if let Some(message) = problem {
            return Err(AuthError::Configuration {
                message,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            issuer,
            signing_key,
            ttl_hours,
        })
    }

    /// Start an unsigned token under this policy
    pub fn token(&self) -> UnsignedToken {
        UnsignedToken::new(self.clone())
    }

    /// Unsigned token carrying the identity's subject claims
    pub fn token_for(&self, identity: &Identity) -> UnsignedToken {
        self.token().with_subject(
            identity.id.to_string(),
            identity.display_name(),
            DEFAULT_ROLE,
        )
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    pub fn ttl_hours(&self) -> i64 {
        self.ttl_hours
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_hours * SECONDS_PER_HOUR
    }
}
