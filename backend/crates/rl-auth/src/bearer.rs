use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// Exactly two whitespace-separated fields are accepted.
#[track_caller]
pub fn parse_bearer(header_value: &str) -> AuthErrorResult<&str> {
    let mut fields = header_value.split_whitespace();

    match (fields.next(), fields.next(), fields.next()) {
        (None, _, _) => Err(AuthError::MissingHeader {
            location: ErrorLocation::from(Location::caller()),
        }),
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AuthError::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}
