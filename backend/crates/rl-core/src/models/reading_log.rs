//! ReadingLog entity - one article a reader recorded having read.

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use chrono::NaiveDate;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingLog {
    pub id: Uuid,
    /// Owner; only this identity may change or delete the entry
    pub identity_id: Uuid,
    pub date: NaiveDate,
    /// PubMed id or citation of the article. Required.
    pub pmid: String,
    pub minutes: u32,
    pub title: String,
    pub source: String,
    pub url: String,
    pub comment: String,
}

impl ReadingLog {
    pub fn new(identity_id: Uuid, date: NaiveDate, pmid: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity_id,
            date,
            pmid,
            minutes: 0,
            title: String::new(),
            source: String::new(),
            url: String::new(),
            comment: String::new(),
        }
    }

    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.identity_id.is_nil() {
            return Err(CoreError::Validation {
                message: "reading log has no owner".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.pmid.trim().is_empty() {
            return Err(CoreError::Validation {
                message: "PMID is missing".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
