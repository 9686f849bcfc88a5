use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Email already belongs to another identity: {email} {location}")]
    DuplicateEmail {
        email: String,
        location: ErrorLocation,
    },

    #[error("Identity not found: {identity_id} {location}")]
    IdentityNotFound {
        identity_id: Uuid,
        location: ErrorLocation,
    },

    #[error("Search already saved: {query} {location}")]
    DuplicateSearch {
        query: String,
        location: ErrorLocation,
    },

    #[error("Search not saved: {query} {location}")]
    SearchNotFound {
        query: String,
        location: ErrorLocation,
    },

    #[error("Reading log not found: {log_id} {location}")]
    LogNotFound {
        log_id: Uuid,
        location: ErrorLocation,
    },

    #[error("Invalid stored row: {message} {location}")]
    InvalidRow {
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    #[track_caller]
    pub(crate) fn invalid_row(message: impl Into<String>) -> Self {
        Self::InvalidRow {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
