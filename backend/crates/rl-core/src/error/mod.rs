use crate::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Search already saved: '{query}' {location}")]
    DuplicateSearch {
        query: String,
        location: ErrorLocation,
    },

    #[error("Saved search not found: '{query}' {location}")]
    SearchNotFound {
        query: String,
        location: ErrorLocation,
    },

    #[error("Identity {identity_id} has no notification scheduled {location}")]
    NoNotificationScheduled {
        identity_id: Uuid,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
