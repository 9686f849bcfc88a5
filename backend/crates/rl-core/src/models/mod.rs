pub mod identity;
pub mod reading_log;
pub mod saved_search;
