use rl_core::{Identity, ReadingLog, SavedSearch};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap()
}

/// Identity with a password hash set and whole-second timestamps
pub fn create_test_identity(email: &str) -> Identity {
    let mut identity = Identity::new(
        "Ada".to_string(),
        "Lovelace".to_string(),
        email.to_string(),
    );
    identity.password_hash = "f".repeat(64);
    identity.created_at = utc(2024, 1, 15, 9, 0);
    identity.updated_at = utc(2024, 1, 15, 9, 0);
    identity
}

pub fn create_test_search(query: &str) -> SavedSearch {
    SavedSearch::new(query.to_string(), utc(2024, 2, 1, 12, 0))
}

pub fn create_test_log(identity_id: Uuid, day: u32, pmid: &str) -> ReadingLog {
    let mut log = ReadingLog::new(
        identity_id,
        NaiveDate::from_ymd_opt(2018, 9, day).unwrap(),
        pmid.to_string(),
    );
    log.minutes = 15;
    log.title = "Direct observation of cargo transfer".to_string();
    log.url = "https://doi.org/10.1186/s12968-018-0482-7".to_string();
    log
}
