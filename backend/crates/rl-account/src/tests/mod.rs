mod reading_logs;

use crate::AccountService;

use rl_auth::TokenPolicy;
use rl_core::search_set::normalized_key;
use rl_core::{FixedClock, Identity, ReadingLog, SavedSearch};
use rl_db::{DbError, IdentityStore, ReadingLogStore, Result as DbErrorResult};

use std::panic::Location;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use error_location::ErrorLocation;
use uuid::Uuid;

pub(crate) const ISSUER: &str = "TestTokenIssuer";
pub(crate) const SIGNING_KEY: &str = "testTokenSigningKey-0123456789abcdef";
pub(crate) const TTL_HOURS: i64 = 4;
pub(crate) const SALT: &str = "pepper";
pub(crate) const PASSWORD: &str = "correct horse battery staple";

pub(crate) fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap()
}

/// Vec-backed store with the same uniqueness rules as the SQLite one
#[derive(Default)]
pub(crate) struct MemoryStore {
    identities: Mutex<Vec<Identity>>,
    logs: Mutex<Vec<ReadingLog>>,
}

impl MemoryStore {
    fn with<T>(&self, f: impl FnOnce(&mut Vec<Identity>) -> T) -> T {
        let mut identities = self.identities.lock().unwrap();
        f(&mut identities)
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Identity>> {
        Ok(self.with(|all| all.iter().find(|i| i.id == id).cloned()))
    }

    async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<Identity>> {
        Ok(self.with(|all| all.iter().find(|i| i.email == email).cloned()))
    }

    async fn find_with_notification_between(
        &self,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> DbErrorResult<Vec<Identity>> {
        Ok(self.with(|all| {
            all.iter()
                .filter(|i| matches!(i.notification_at, Some(at) if at > after && at < before))
                .cloned()
                .collect()
        }))
    }

    async fn upsert(&self, identity: &Identity) -> DbErrorResult<()> {
        self.with(|all| {
            if all
                .iter()
                .any(|i| i.email == identity.email && i.id != identity.id)
            {
                return Err(DbError::DuplicateEmail {
                    email: identity.email.clone(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            match all.iter_mut().find(|i| i.id == identity.id) {
                Some(existing) => {
                    let searches = std::mem::take(&mut existing.searches);
                    *existing = identity.clone();
                    existing.searches = searches;
                }
                None => all.push(identity.clone()),
            }
            Ok(())
        })
    }

    async fn add_search(&self, identity_id: Uuid, search: &SavedSearch) -> DbErrorResult<()> {
        self.with(|all| {
            let identity = all.iter_mut().find(|i| i.id == identity_id).ok_or(
                DbError::IdentityNotFound {
                    identity_id,
                    location: ErrorLocation::from(Location::caller()),
                },
            )?;
            if identity
                .searches
                .iter()
                .any(|s| s.normalized_key() == search.normalized_key())
            {
                return Err(DbError::DuplicateSearch {
                    query: search.query.clone(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            identity.searches.push(search.clone());
            Ok(())
        })
    }

    async fn remove_search(&self, identity_id: Uuid, query: &str) -> DbErrorResult<()> {
        self.with(|all| {
            let identity = all.iter_mut().find(|i| i.id == identity_id).ok_or(
                DbError::IdentityNotFound {
                    identity_id,
                    location: ErrorLocation::from(Location::caller()),
                },
            )?;
            let before = identity.searches.len();
            let key = normalized_key(query);
            identity.searches.retain(|s| s.normalized_key() != key);
            if identity.searches.len() == before {
                return Err(DbError::SearchNotFound {
                    query: query.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            Ok(())
        })
    }
}

#[async_trait]
impl ReadingLogStore for MemoryStore {
    async fn find_log(&self, id: Uuid) -> DbErrorResult<Option<ReadingLog>> {
        let logs = self.logs.lock().unwrap();
        Ok(logs.iter().find(|l| l.id == id).cloned())
    }

    async fn logs_for(&self, identity_id: Uuid) -> DbErrorResult<Vec<ReadingLog>> {
        let logs = self.logs.lock().unwrap();
        let mut owned: Vec<ReadingLog> = logs
            .iter()
            .filter(|l| l.identity_id == identity_id)
            .cloned()
            .collect();
        owned.sort_by_key(|l| l.date);
        Ok(owned)
    }

    async fn upsert_log(&self, log: &ReadingLog) -> DbErrorResult<()> {
        if !self.with(|all| all.iter().any(|i| i.id == log.identity_id)) {
            return Err(DbError::IdentityNotFound {
                identity_id: log.identity_id,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut logs = self.logs.lock().unwrap();
        match logs.iter_mut().find(|l| l.id == log.id) {
            Some(existing) if existing.identity_id != log.identity_id => {
                Err(DbError::LogNotFound {
                    log_id: log.id,
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            Some(existing) => {
                *existing = log.clone();
                Ok(())
            }
            None => {
                logs.push(log.clone());
                Ok(())
            }
        }
    }

    async fn delete_log(&self, id: Uuid) -> DbErrorResult<()> {
        let mut logs = self.logs.lock().unwrap();
        let before = logs.len();
        logs.retain(|l| l.id != id);
        if logs.len() == before {
            return Err(DbError::LogNotFound {
                log_id: id,
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}

pub(crate) fn test_service(clock: &FixedClock) -> AccountService<MemoryStore> {
    AccountService::new(
        MemoryStore::default(),
        Arc::new(clock.clone()),
        TokenPolicy::new(ISSUER, SIGNING_KEY, TTL_HOURS).unwrap(),
        SALT,
    )
}

/// Service plus one registered, confirmed identity
pub(crate) async fn service_with_reader(
    clock: &FixedClock,
) -> (AccountService<MemoryStore>, Identity) {
    let service = test_service(clock);
    let identity = service
        .register("Mike", "Reader", "reader@example.com", Some(PASSWORD))
        .await
        .unwrap();
    let key = service.confirmation_key(identity.id).await.unwrap();
    let identity = service.confirm(identity.id, &key).await.unwrap();
    (service, identity)
}
