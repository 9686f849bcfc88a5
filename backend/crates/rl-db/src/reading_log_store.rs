//! Persistence seam for reading logs.

use crate::Result as DbErrorResult;

use rl_core::ReadingLog;

use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ReadingLogStore: Send + Sync {
    async fn find_log(&self, id: Uuid) -> DbErrorResult<Option<ReadingLog>>;

    /// Every log of `identity_id`, oldest date first.
    async fn logs_for(&self, identity_id: Uuid) -> DbErrorResult<Vec<ReadingLog>>;

    /// Insert or replace a log.
    ///
    /// A log never changes owner: replacing one that belongs to another
    /// identity fails with `LogNotFound`. An unknown owner fails with
    /// `IdentityNotFound`.
    async fn upsert_log(&self, log: &ReadingLog) -> DbErrorResult<()>;

    /// Fails with `LogNotFound` when nothing was deleted.
    async fn delete_log(&self, id: Uuid) -> DbErrorResult<()>;
}
