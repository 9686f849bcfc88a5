pub mod connection;
pub mod error;
pub mod identity_store;
pub mod reading_log_store;
pub mod repositories;

pub use connection::{connect, connect_in_memory, run_migrations};
pub use error::{DbError, Result};
pub use identity_store::IdentityStore;
pub use reading_log_store::ReadingLogStore;
pub use repositories::identity_repository::IdentityRepository;
