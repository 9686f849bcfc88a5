//! Persistence seam for identities.

use crate::Result as DbErrorResult;

use rl_core::{Identity, SavedSearch};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Storage for identities and their saved searches.
///
/// Implementations must keep `email` unique across identities and must make
/// `add_search`/`remove_search` atomic with respect to each other, so that
/// two concurrent adds of equivalent queries store exactly one entry.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Identity>>;

    /// Exact (case-sensitive) email match.
    async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<Identity>>;

    /// Identities whose `notification_at` lies strictly between `after` and
    /// `before`. Identities without a schedule are never returned.
    async fn find_with_notification_between(
        &self,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> DbErrorResult<Vec<Identity>>;

    /// Insert or replace the identity record.
    ///
    /// Fails with `DuplicateEmail` when the email belongs to a different id.
    /// `identity.searches` is ignored; saved searches change only through
    /// `add_search` and `remove_search`.
    async fn upsert(&self, identity: &Identity) -> DbErrorResult<()>;

    /// Add a search unless an equivalent one is already saved.
    async fn add_search(&self, identity_id: Uuid, search: &SavedSearch) -> DbErrorResult<()>;

    /// Remove every saved search equivalent to `query`.
    async fn remove_search(&self, identity_id: Uuid, query: &str) -> DbErrorResult<()>;
}
