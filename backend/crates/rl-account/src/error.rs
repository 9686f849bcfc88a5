use rl_auth::AuthError;
use rl_core::CoreError;
use rl_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Outcome of an account operation as seen by callers.
///
/// Every credential or token failure is reported as `Unauthorized` with no
/// further detail. Data-integrity failures carry enough detail for the
/// caller to correct the request.
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Unauthorized {location}")]
    Unauthorized { location: ErrorLocation },

    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid or expired key {location}")]
    InvalidKey { location: ErrorLocation },

    #[error("Store error: {source}")]
    Store {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Token error: {source}")]
    Token {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },
}

impl AccountError {
    #[track_caller]
    pub(crate) fn unauthorized() -> Self {
        Self::Unauthorized {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn invalid_key() -> Self {
        Self::InvalidKey {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

impl From<CoreError> for AccountError {
    #[track_caller]
    fn from(err: CoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match err {
            CoreError::DuplicateSearch { query, .. } => Self::Conflict {
                message: format!("search '{query}' is already saved"),
                location,
            },
            CoreError::SearchNotFound { query, .. } => Self::NotFound {
                message: format!("search '{query}' is not saved"),
                location,
            },
            CoreError::NoNotificationScheduled { identity_id, .. } => Self::Validation {
                message: format!("identity {identity_id} has no notification scheduled"),
                location,
            },
            CoreError::Validation { message, .. } => Self::Validation { message, location },
        }
    }
}

impl From<DbError> for AccountError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match err {
            DbError::DuplicateEmail { email, .. } => Self::Conflict {
                message: format!("email '{email}' already belongs to another identity"),
                location,
            },
            DbError::DuplicateSearch { query, .. } => Self::Conflict {
                message: format!("search '{query}' is already saved"),
                location,
            },
            DbError::IdentityNotFound { identity_id, .. } => Self::NotFound {
                message: format!("identity {identity_id}"),
                location,
            },
            DbError::SearchNotFound { query, .. } => Self::NotFound {
                message: format!("search '{query}' is not saved"),
                location,
            },
            DbError::LogNotFound { log_id, .. } => Self::NotFound {
                message: format!("reading log {log_id}"),
                location,
            },
            source => Self::Store { source, location },
        }
    }
}

impl From<AuthError> for AccountError {
    #[track_caller]
    fn from(source: AuthError) -> Self {
        Self::Token {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AccountError>;
