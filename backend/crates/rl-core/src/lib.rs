pub mod clock;
pub mod error;
pub mod models;
pub mod notification_schedule;
pub mod search_set;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::identity::Identity;
pub use models::reading_log::ReadingLog;
pub use models::saved_search::SavedSearch;

#[cfg(test)]
mod tests;
