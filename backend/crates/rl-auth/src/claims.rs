use crate::{AuthError, Result as AuthErrorResult};

use std::collections::BTreeMap;
use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    pub iss: String,
    /// Subject (identity id)
    pub sub: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
    /// Caller-supplied extras
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, Value>,
}

impl Claims {
    #[track_caller]
    pub fn issued_at(&self) -> AuthErrorResult<DateTime<Utc>> {
        Self::timestamp("iat", self.iat)
    }

    #[track_caller]
    pub fn expires_at(&self) -> AuthErrorResult<DateTime<Utc>> {
        Self::timestamp("exp", self.exp)
    }

    /// Structural checks on a decoded payload
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.iss.is_empty() {
            return Err(AuthError::Format {
                message: "iss cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.exp <= self.iat {
            return Err(AuthError::Format {
                message: format!("exp ({}) must be after iat ({})", self.exp, self.iat),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    #[track_caller]
    fn timestamp(claim: &str, seconds: i64) -> AuthErrorResult<DateTime<Utc>> {
        DateTime::from_timestamp(seconds, 0).ok_or_else(|| AuthError::Format {
            message: format!("{claim} is out of range: {seconds}"),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
