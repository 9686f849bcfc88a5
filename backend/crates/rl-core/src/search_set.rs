//! Saved-search set rules.
//!
//! Two queries are the same search when their lower-cased, whitespace-split
//! term sequences are equal. Term order and punctuation are significant:
//! `"heart failure"` and `"failure heart"` are different searches, while
//! `"Heart  Failure "` and `"heart failure"` are the same one.
//!
//! These functions are pure; persisting the result is the caller's job.

use crate::{CoreError, Result as CoreErrorResult, SavedSearch};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;

/// Split a query into its case-folded terms.
pub fn normalize(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Normalized terms joined by single spaces.
pub fn normalized_key(query: &str) -> String {
    normalize(query).join(" ")
}

/// True if any saved entry is the same search as `query`.
pub fn contains(searches: &[SavedSearch], query: &str) -> bool {
    let wanted = normalize(query);
    searches
        .iter()
        .any(|search| normalize(&search.query) == wanted)
}

/// Append `query` to the set, rejecting an equivalent existing entry.
#[track_caller]
pub fn add(
    searches: &[SavedSearch],
    query: &str,
    now: DateTime<Utc>,
) -> CoreErrorResult<Vec<SavedSearch>> {
    if normalize(query).is_empty() {
        return Err(CoreError::Validation {
            message: "search query cannot be blank".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if contains(searches, query) {
        return Err(CoreError::DuplicateSearch {
            query: query.to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let mut updated = searches.to_vec();
    updated.push(SavedSearch::new(query.to_string(), now));
    Ok(updated)
}

/// Drop every entry equivalent to `query`.
#[track_caller]
pub fn remove(searches: &[SavedSearch], query: &str) -> CoreErrorResult<Vec<SavedSearch>> {
    if !contains(searches, query) {
        return Err(CoreError::SearchNotFound {
            query: query.to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(searches
        .iter()
        .filter(|search| !search.matches(query))
        .cloned()
        .collect())
}
