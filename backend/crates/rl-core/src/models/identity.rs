//! Identity entity - the account authenticated and authorized by this service.

use crate::{CoreError, Result as CoreErrorResult, SavedSearch};

use std::collections::BTreeSet;
use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role carried in every token minted for an identity.
pub const DEFAULT_ROLE: &str = "user";

/// A reader account.
///
/// The id is assigned on construction so the password salt can be derived
/// before the first save. `password_hash` is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all identities
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// New accounts stay locked until the emailed confirmation key is used
    pub locked: bool,
    pub categories: BTreeSet<String>,
    pub searches: Vec<SavedSearch>,
    /// Next notification time; `None` means notifications were never configured
    pub notification_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Create a new, locked identity with no credential set.
    pub fn new(first_name: String, last_name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            password_hash: String::new(),
            locked: true,
            categories: BTreeSet::new(),
            searches: Vec::new(),
            notification_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name placed in the token `name` claim
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check required fields before the identity is persisted.
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        let missing = if self.first_name.trim().is_empty() {
            Some("first name is missing")
        } else if self.last_name.trim().is_empty() {
            Some("last name is missing")
        } else if self.email.trim().is_empty() {
            Some("email is missing")
        } else if self.password_hash.is_empty() {
            Some("password hash is missing")
        } else {
            None
        };

        match missing {
            Some(message) => Err(CoreError::Validation {
                message: message.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            None => Ok(()),
        }
    }
}
