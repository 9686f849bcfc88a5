use crate::repositories::identity_repository::IdentityRepository;
use crate::{DbError, ReadingLogStore, Result as DbErrorResult};

use rl_core::ReadingLog;

use std::panic::Location;

use async_trait::async_trait;
use chrono::NaiveDate;
use error_location::ErrorLocation;
use log::debug;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

const LOG_COLUMNS: &str = r#"
    id, identity_id, date, pmid, minutes, title, source, url, comment
"#;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[async_trait]
impl ReadingLogStore for IdentityRepository {
    async fn find_log(&self, id: Uuid) -> DbErrorResult<Option<ReadingLog>> {
        let row = sqlx::query(&format!(
            "SELECT {LOG_COLUMNS} FROM rl_reading_logs WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(self.pool())
        .await?;

        row.as_ref().map(log_from_row).transpose()
    }

    async fn logs_for(&self, identity_id: Uuid) -> DbErrorResult<Vec<ReadingLog>> {
        let rows = sqlx::query(&format!(
            r#"
              SELECT {LOG_COLUMNS}
              FROM rl_reading_logs
              WHERE identity_id = ?
              ORDER BY date ASC, rowid ASC
              "#
        ))
        .bind(identity_id.to_string())
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(log_from_row).collect()
    }

    async fn upsert_log(&self, log: &ReadingLog) -> DbErrorResult<()> {
        // The WHERE clause turns a cross-owner replace into a no-op
        let result = sqlx::query(
            r#"
              INSERT INTO rl_reading_logs (
                  id, identity_id, date, pmid, minutes, title, source, url, comment
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
              ON CONFLICT(id) DO UPDATE SET
                  date = excluded.date,
                  pmid = excluded.pmid,
                  minutes = excluded.minutes,
                  title = excluded.title,
                  source = excluded.source,
                  url = excluded.url,
                  comment = excluded.comment
              WHERE rl_reading_logs.identity_id = excluded.identity_id
              "#,
        )
        .bind(log.id.to_string())
        .bind(log.identity_id.to_string())
        .bind(log.date.format(DATE_FORMAT).to_string())
        .bind(&log.pmid)
        .bind(i64::from(log.minutes))
        .bind(&log.title)
        .bind(&log.source)
        .bind(&log.url)
        .bind(&log.comment)
        .execute(self.pool())
        .await;

        match result {
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Err(DbError::IdentityNotFound {
                    identity_id: log.identity_id,
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            Err(e) => Err(e.into()),
            Ok(done) if done.rows_affected() == 0 => Err(DbError::LogNotFound {
                log_id: log.id,
                location: ErrorLocation::from(Location::caller()),
            }),
            Ok(_) => {
                debug!("Upserted reading log {}", log.id);
                Ok(())
            }
        }
    }

    async fn delete_log(&self, id: Uuid) -> DbErrorResult<()> {
        let result = sqlx::query("DELETE FROM rl_reading_logs WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::LogNotFound {
                log_id: id,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        debug!("Deleted reading log {}", id);
        Ok(())
    }
}

fn log_from_row(row: &SqliteRow) -> DbErrorResult<ReadingLog> {
    let id: String = row.try_get("id")?;
    let identity_id: String = row.try_get("identity_id")?;
    let date: String = row.try_get("date")?;
    let minutes: i64 = row.try_get("minutes")?;

    Ok(ReadingLog {
        id: Uuid::parse_str(&id).map_err(|e| DbError::invalid_row(format!("log id {id}: {e}")))?,
        identity_id: Uuid::parse_str(&identity_id)
            .map_err(|e| DbError::invalid_row(format!("owner of log {id}: {e}")))?,
        date: NaiveDate::parse_from_str(&date, DATE_FORMAT)
            .map_err(|e| DbError::invalid_row(format!("date of log {id}: {e}")))?,
        pmid: row.try_get("pmid")?,
        minutes: u32::try_from(minutes)
            .map_err(|e| DbError::invalid_row(format!("minutes of log {id}: {e}")))?,
        title: row.try_get("title")?,
        source: row.try_get("source")?,
        url: row.try_get("url")?,
        comment: row.try_get("comment")?,
    })
}
