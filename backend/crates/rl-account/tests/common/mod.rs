#![allow(dead_code)]

use rl_account::AccountService;
use rl_auth::TokenPolicy;
use rl_core::FixedClock;
use rl_db::IdentityRepository;

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

pub const ISSUER: &str = "TestTokenIssuer";
pub const SIGNING_KEY: &str = "testTokenSigningKey-0123456789abcdef";
pub const TTL_HOURS: i64 = 1;
pub const SALT: &str = "pepper";

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap()
}

/// Service over a fresh in-memory SQLite database
pub async fn create_test_service(clock: &FixedClock) -> AccountService<IdentityRepository> {
    let pool = rl_db::connect_in_memory()
        .await
        .expect("Failed to create test pool");

    AccountService::new(
        IdentityRepository::new(pool),
        Arc::new(clock.clone()),
        TokenPolicy::new(ISSUER, SIGNING_KEY, TTL_HOURS).unwrap(),
        SALT,
    )
}

/// Service over a file-backed SQLite database with a multi-connection pool
///
/// Keep the returned `TempDir` alive for as long as the service is used.
pub async fn create_file_service(
    clock: &FixedClock,
) -> (tempfile::TempDir, AccountService<IdentityRepository>) {
    let temp = tempfile::TempDir::new().expect("Failed to create temp dir");
    let pool = rl_db::connect(&temp.path().join("identities.db"))
        .await
        .expect("Failed to create file pool");

    let service = AccountService::new(
        IdentityRepository::new(pool),
        Arc::new(clock.clone()),
        TokenPolicy::new(ISSUER, SIGNING_KEY, TTL_HOURS).unwrap(),
        SALT,
    );
    (temp, service)
}
