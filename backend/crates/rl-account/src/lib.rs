pub mod account_service;
pub mod error;
pub mod profile_update;

pub use account_service::AccountService;
pub use error::{AccountError, Result};
pub use profile_update::ProfileUpdate;

#[cfg(test)]
mod tests;
