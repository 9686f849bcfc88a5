//! Periodic notification scheduling.
//!
//! An identity is due when its `notification_at` is set, later than the Unix
//! epoch and earlier than `now`. Selecting due identities never mutates
//! anything: the caller advances an identity only after its notification was
//! actually delivered, so a failed send leaves it due (at-least-once).

use crate::{CoreError, Identity, Result as CoreErrorResult};

use std::panic::Location;

use chrono::{DateTime, Days, TimeZone, Utc};
use error_location::ErrorLocation;

/// True when a notification scheduled at `at` should go out at `now`.
pub fn is_due(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match at {
        Some(at) => at > DateTime::<Utc>::UNIX_EPOCH && at < now,
        None => false,
    }
}

/// Identities with a notification due at `now`.
pub fn due_now(identities: &[Identity], now: DateTime<Utc>) -> Vec<&Identity> {
    identities
        .iter()
        .filter(|identity| is_due(identity.notification_at, now))
        .collect()
}

/// Move `at` forward by whole calendar days in its own time zone.
///
/// Local wall-clock time is preserved across DST changes and month/year
/// boundaries. Returns `None` on overflow or when the shifted local time
/// does not exist.
pub fn add_calendar_days<Tz: TimeZone>(at: DateTime<Tz>, days: u32) -> Option<DateTime<Tz>> {
    at.checked_add_days(Days::new(u64::from(days)))
}

/// Copy of `identity` with its next notification `days` calendar days later.
#[track_caller]
pub fn advance(identity: &Identity, days: u32) -> CoreErrorResult<Identity> {
    let current = identity
        .notification_at
        .ok_or_else(|| CoreError::NoNotificationScheduled {
            identity_id: identity.id,
            location: ErrorLocation::from(Location::caller()),
        })?;

    let next = add_calendar_days(current, days).ok_or_else(|| CoreError::Validation {
        message: format!("cannot advance notification {} by {} days", current, days),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let mut updated = identity.clone();
    updated.notification_at = Some(next);
    Ok(updated)
}

/// Copy of `identity` with its schedule set to `at` (or cleared).
pub fn schedule(identity: &Identity, at: Option<DateTime<Utc>>) -> Identity {
    let mut updated = identity.clone();
    updated.notification_at = at;
    updated
}
