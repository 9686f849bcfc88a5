use crate::{DbError, IdentityStore, Result as DbErrorResult};

use rl_core::search_set::normalized_key;
use rl_core::{Identity, SavedSearch};

use std::collections::BTreeSet;
use std::panic::Location;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use log::debug;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqlitePool};
use uuid::Uuid;

const IDENTITY_COLUMNS: &str = r#"
    id, first_name, last_name, email, password_hash, locked,
    categories, notification_at, created_at, updated_at
"#;

/// SQLite-backed [`IdentityStore`], also the [`ReadingLogStore`](crate::ReadingLogStore)
/// for the logs those identities own.
#[derive(Debug, Clone)]
pub struct IdentityRepository {
    pool: SqlitePool,
}

impl IdentityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn load_searches(&self, identity_id: &str) -> DbErrorResult<Vec<SavedSearch>> {
        let rows = sqlx::query(
            r#"
              SELECT query, created_at
              FROM rl_saved_searches
              WHERE identity_id = ?
              ORDER BY id ASC
              "#,
        )
        .bind(identity_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(SavedSearch::new(
                    row.try_get("query")?,
                    from_micros(row.try_get("created_at")?)?,
                ))
            })
            .collect()
    }

    async fn hydrate(&self, row: &SqliteRow) -> DbErrorResult<Identity> {
        let id_str: String = row.try_get("id")?;
        let mut identity = identity_from_row(row)?;
        identity.searches = self.load_searches(&id_str).await?;
        Ok(identity)
    }

    async fn exists(&self, identity_id: &str) -> DbErrorResult<bool> {
        let row = sqlx::query("SELECT 1 FROM rl_identities WHERE id = ?")
            .bind(identity_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}

#[async_trait]
impl IdentityStore for IdentityRepository {
    async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Identity>> {
        let row = sqlx::query(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM rl_identities WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(&row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<Identity>> {
        let row = sqlx::query(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM rl_identities WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(&row).await?)),
            None => Ok(None),
        }
    }

    async fn find_with_notification_between(
        &self,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> DbErrorResult<Vec<Identity>> {
        let rows = sqlx::query(&format!(
            r#"
              SELECT {IDENTITY_COLUMNS}
              FROM rl_identities
              WHERE notification_at IS NOT NULL
                AND notification_at > ?
                AND notification_at < ?
              ORDER BY notification_at ASC, id ASC
              "#
        ))
        .bind(after.timestamp_micros())
        .bind(before.timestamp_micros())
        .fetch_all(&self.pool)
        .await?;

        let mut identities = Vec::with_capacity(rows.len());
        for row in &rows {
            identities.push(self.hydrate(row).await?);
        }
        Ok(identities)
    }

    async fn upsert(&self, identity: &Identity) -> DbErrorResult<()> {
        let id = identity.id.to_string();
        let categories = serde_json::to_string(&identity.categories)
            .map_err(|e| DbError::invalid_row(format!("categories: {e}")))?;

        let result = sqlx::query(
            r#"
              INSERT INTO rl_identities (
                  id, first_name, last_name, email, password_hash, locked,
                  categories, notification_at, created_at, updated_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              ON CONFLICT(id) DO UPDATE SET
                  first_name = excluded.first_name,
                  last_name = excluded.last_name,
                  email = excluded.email,
                  password_hash = excluded.password_hash,
                  locked = excluded.locked,
                  categories = excluded.categories,
                  notification_at = excluded.notification_at,
                  updated_at = excluded.updated_at
              "#,
        )
        .bind(&id)
        .bind(&identity.first_name)
        .bind(&identity.last_name)
        .bind(&identity.email)
        .bind(&identity.password_hash)
        .bind(identity.locked)
        .bind(&categories)
        .bind(identity.notification_at.map(|at| at.timestamp_micros()))
        .bind(identity.created_at.timestamp_micros())
        .bind(identity.updated_at.timestamp_micros())
        .execute(&self.pool)
        .await;

        if let Err(sqlx::Error::Database(e)) = &result
            && e.is_unique_violation()
        {
            return Err(DbError::DuplicateEmail {
                email: identity.email.clone(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        result?;

        debug!("Upserted identity {}", identity.id);
        Ok(())
    }

    async fn add_search(&self, identity_id: Uuid, search: &SavedSearch) -> DbErrorResult<()> {
        let id = identity_id.to_string();

        match insert_search(&self.pool, &id, search).await {
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(DbError::DuplicateSearch {
                    query: search.query.clone(),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Err(DbError::IdentityNotFound {
                    identity_id,
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            Err(e) => Err(e.into()),
            Ok(_) => Ok(()),
        }
    }

    async fn remove_search(&self, identity_id: Uuid, query: &str) -> DbErrorResult<()> {
        let id = identity_id.to_string();

        let result = sqlx::query(
            "DELETE FROM rl_saved_searches WHERE identity_id = ? AND normalized_query = ?",
        )
        .bind(&id)
        .bind(normalized_key(query))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        if self.exists(&id).await? {
            Err(DbError::SearchNotFound {
                query: query.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
        } else {
            Err(DbError::IdentityNotFound {
                identity_id,
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}

async fn insert_search<'e, E>(
    executor: E,
    identity_id: &str,
    search: &SavedSearch,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
          INSERT INTO rl_saved_searches (identity_id, query, normalized_query, created_at)
          VALUES (?, ?, ?, ?)
          "#,
    )
        .bind(identity_id)
        .bind(&search.query)
        .bind(search.normalized_key())
        .bind(search.created_at.timestamp_micros())
        .execute(executor)
        .await?;

    Ok(())
}

#[track_caller]
fn from_micros(micros: i64) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| DbError::invalid_row(format!("timestamp out of range: {micros}")))
}

fn identity_from_row(row: &SqliteRow) -> DbErrorResult<Identity> {
    let id: String = row.try_get("id")?;
    let categories: String = row.try_get("categories")?;
    let notification_at: Option<i64> = row.try_get("notification_at")?;

    Ok(Identity {
        id: Uuid::parse_str(&id).map_err(|e| DbError::invalid_row(format!("id {id}: {e}")))?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        locked: row.try_get("locked")?,
        categories: serde_json::from_str::<BTreeSet<String>>(&categories)
            .map_err(|e| DbError::invalid_row(format!("categories of {id}: {e}")))?,
        searches: Vec::new(),
        notification_at: notification_at.map(from_micros).transpose()?,
        created_at: from_micros(row.try_get("created_at")?)?,
        updated_at: from_micros(row.try_get("updated_at")?)?,
    })
}
