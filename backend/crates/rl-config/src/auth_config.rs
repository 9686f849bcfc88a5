use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_TOKEN_ISSUER, DEFAULT_TOKEN_TTL_HOURS,
    MAX_TOKEN_TTL_HOURS, MIN_SIGNING_KEY_LENGTH,
};

use std::fmt;

use serde::Deserialize;

/// Credential and token settings.
///
/// `password_salt` and `token_signing_key` have no defaults: both must come
/// from the config file or the environment.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub password_salt: String,
    pub token_issuer: String,
    pub token_signing_key: String,
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_salt: String::new(),
            token_issuer: String::from(DEFAULT_TOKEN_ISSUER),
            token_signing_key: String::new(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.password_salt.is_empty() {
            return Err(ConfigError::auth("auth.password_salt must be set"));
        }

        if self.token_issuer.trim().is_empty() {
            return Err(ConfigError::auth("auth.token_issuer must be set"));
        }

        if self.token_signing_key.len() < MIN_SIGNING_KEY_LENGTH {
            return Err(ConfigError::auth(format!(
                "auth.token_signing_key must be at least {} characters",
                MIN_SIGNING_KEY_LENGTH
            )));
        }

        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&self.token_ttl_hours) {
            return Err(ConfigError::auth(format!(
                "auth.token_ttl_hours must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_HOURS, self.token_ttl_hours
            )));
        }

        Ok(())
    }
}

// Secrets stay out of Debug output
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("password_salt", &"<redacted>")
            .field("token_issuer", &self.token_issuer)
            .field("token_signing_key", &"<redacted>")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}
