use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

/// Partial change to an identity's profile. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Ignored when empty
    pub password: Option<String>,
    pub categories: Option<BTreeSet<String>>,
    /// `Some(None)` clears the schedule
    pub notification_at: Option<Option<DateTime<Utc>>>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
