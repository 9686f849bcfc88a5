pub mod identity_repository;
pub mod reading_log_repository;
