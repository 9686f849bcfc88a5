//! Stateless, day-scoped action keys for confirmation and reset links.
//!
//! Nothing is stored: the key is recomputed at verification time from the
//! identity's email, its current password hash and the UTC calendar date.
//! A key therefore stays valid until UTC midnight or until the password
//! changes, whichever comes first. Good enough for account confirmation;
//! too coarse for anything high-stakes.

use crate::hasher::digest;

use chrono::{DateTime, Datelike, Utc};
use subtle::ConstantTimeEq;

pub fn derive(email: &str, password_hash: &str, now: DateTime<Utc>) -> String {
    digest(format!(
        "{}{}{}{}",
        email.to_lowercase(),
        password_hash,
        now.format("%B"),
        now.day()
    ))
}

pub fn verify(email: &str, password_hash: &str, now: DateTime<Utc>, candidate: &str) -> bool {
    derive(email, password_hash, now)
        .as_bytes()
        .ct_eq(candidate.as_bytes())
        .into()
}
