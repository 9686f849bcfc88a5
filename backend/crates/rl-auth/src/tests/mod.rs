mod bearer;
mod token_properties;

use chrono::{DateTime, TimeZone, Utc};

pub(crate) const ISSUER: &str = "TestTokenIssuer";
pub(crate) const SIGNING_KEY: &str = "testTokenSigningKey";
pub(crate) const TTL_HOURS: i64 = 4;

pub(crate) fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap()
}
