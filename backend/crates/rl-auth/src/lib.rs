pub mod bearer;
pub mod claims;
pub mod confirmation_key;
pub mod credential;
pub mod error;
mod hasher;
pub mod signing_key;
pub mod token;
pub mod token_policy;
pub mod unsigned_token;

pub use bearer::parse_bearer;
pub use claims::Claims;
pub use error::{AuthError, Result};
pub use signing_key::SigningKey;
pub use token::Token;
pub use token_policy::TokenPolicy;
pub use unsigned_token::UnsignedToken;

#[cfg(test)]
mod tests;
