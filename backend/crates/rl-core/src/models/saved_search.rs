use crate::search_set;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A search query a reader asked us to remember.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearch {
    pub query: String,
    pub created_at: DateTime<Utc>,
}

impl SavedSearch {
    pub fn new(query: String, created_at: DateTime<Utc>) -> Self {
        Self { query, created_at }
    }

    /// Case-folded, whitespace-collapsed form used for duplicate detection
    pub fn normalized_key(&self) -> String {
        search_set::normalized_key(&self.query)
    }

    pub fn matches(&self, query: &str) -> bool {
        search_set::normalize(&self.query) == search_set::normalize(query)
    }
}
