use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid token policy: {message} {location}")]
    Configuration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token encoding failed: {message} {location}")]
    Encoding {
        message: String,
        location: ErrorLocation,
    },

    #[error("Malformed token: {message} {location}")]
    Format {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token signature mismatch {location}")]
    Signature { location: ErrorLocation },

    #[error("Token issued in the future (iat={issued_at}) {location}")]
    NotYetValid {
        issued_at: i64,
        location: ErrorLocation,
    },

    #[error("Token expired (exp={expires_at}) {location}")]
    Expired {
        expires_at: i64,
        location: ErrorLocation,
    },

    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer <token>' {location}")]
    InvalidScheme { location: ErrorLocation },
}

impl AuthError {
    /// Machine-readable code, safe to log
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "TOKEN_CONFIGURATION",
            Self::Encoding { .. } => "TOKEN_ENCODING",
            Self::Format { .. } => "TOKEN_FORMAT",
            Self::Signature { .. } => "TOKEN_SIGNATURE",
            Self::NotYetValid { .. } => "TOKEN_NOT_YET_VALID",
            Self::Expired { .. } => "TOKEN_EXPIRED",
            Self::MissingHeader { .. } => "MISSING_AUTH_HEADER",
            Self::InvalidScheme { .. } => "INVALID_AUTH_SCHEME",
        }
    }

    /// True for signature and time-window failures
    pub fn is_validity_failure(&self) -> bool {
        matches!(
            self,
            Self::Signature { .. } | Self::NotYetValid { .. } | Self::Expired { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
