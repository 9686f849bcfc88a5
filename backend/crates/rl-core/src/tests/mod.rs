
use crate::Identity;

use chrono::{DateTime, TimeZone, Utc};

pub(crate) fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap()
}

pub(crate) fn test_identity() -> Identity {
    let mut identity = Identity::new(
        "Ada".to_string(),
        "Lovelace".to_string(),
        "ada@example.com".to_string(),
    );
    identity.password_hash = "a".repeat(64);
    identity
}
