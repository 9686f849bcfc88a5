use crate::AccountError;
use crate::tests::{service_with_reader, utc};

use rl_core::{FixedClock, ReadingLog};

use chrono::NaiveDate;
use googletest::prelude::*;
use uuid::Uuid;

fn article(day: u32, pmid: &str) -> ReadingLog {
    let mut log = ReadingLog::new(
        Uuid::nil(),
        NaiveDate::from_ymd_opt(2018, 9, day).unwrap(),
        pmid.to_string(),
    );
    log.minutes = 15;
    log.source = "J Cardiovasc Magn Reson 2018-09-03; 20(1): 60".to_string();
    log
}

#[tokio::test]
async fn given_reader_when_log_saved_then_owned_by_reader_and_listed() {
    // Given
    let clock = FixedClock::new(utc(2024, 7, 9, 10, 0));
    let (service, reader) = service_with_reader(&clock).await;

    // When
    let saved = service
        .save_log(reader.id, article(3, "Atherosclerosis 2018-08-27; 277: 53-59"))
        .await
        .unwrap();

    // Then
    assert_that!(saved.identity_id, eq(reader.id));
    assert_that!(service.logs_for(reader.id).await.unwrap(), eq(&vec![saved]));
}

#[tokio::test]
async fn given_missing_pmid_when_log_saved_then_validation_error() {
    let clock = FixedClock::new(utc(2024, 7, 9, 10, 0));
    let (service, reader) = service_with_reader(&clock).await;

    let result = service.save_log(reader.id, article(3, "")).await;

    assert!(matches!(result, Err(AccountError::Validation { .. })));
    assert_that!(service.logs_for(reader.id).await.unwrap(), is_empty());
}

#[tokio::test]
async fn given_unknown_identity_when_log_saved_or_listed_then_unauthorized() {
    let clock = FixedClock::new(utc(2024, 7, 9, 10, 0));
    let (service, _reader) = service_with_reader(&clock).await;
    let stranger = Uuid::new_v4();

    let saved = service.save_log(stranger, article(3, "PMID-1")).await;
    let listed = service.logs_for(stranger).await;

    assert!(matches!(saved, Err(AccountError::Unauthorized { .. })));
    assert!(matches!(listed, Err(AccountError::Unauthorized { .. })));
}

#[tokio::test]
async fn given_saved_log_when_saved_again_by_owner_then_replaced() {
    // Given
    let clock = FixedClock::new(utc(2024, 7, 9, 10, 0));
    let (service, reader) = service_with_reader(&clock).await;
    let mut log = service
        .save_log(reader.id, article(3, "PMID-1"))
        .await
        .unwrap();

    // When
    log.comment = "This was an excellent article.".to_string();
    service.save_log(reader.id, log.clone()).await.unwrap();

    // Then
    let logs = service.logs_for(reader.id).await.unwrap();
    assert_that!(logs, len(eq(1)));
    assert_that!(logs[0].comment, eq("This was an excellent article."));
}

#[tokio::test]
async fn given_log_of_other_reader_when_saved_then_unauthorized_and_untouched() {
    // Given
    let clock = FixedClock::new(utc(2024, 7, 9, 10, 0));
    let (service, reader) = service_with_reader(&clock).await;
    let intruder = service
        .register("Eve", "Intruder", "eve@example.com", Some("pw"))
        .await
        .unwrap();
    let log = service
        .save_log(reader.id, article(3, "PMID-1"))
        .await
        .unwrap();

    // When
    let mut tampered = log.clone();
    tampered.comment = "overwritten".to_string();
    let result = service.save_log(intruder.id, tampered).await;

    // Then
    assert!(matches!(result, Err(AccountError::Unauthorized { .. })));
    assert_that!(service.logs_for(reader.id).await.unwrap(), eq(&vec![log]));
    assert_that!(service.logs_for(intruder.id).await.unwrap(), is_empty());
}

#[tokio::test]
async fn given_own_log_when_deleted_then_gone() {
    let clock = FixedClock::new(utc(2024, 7, 9, 10, 0));
    let (service, reader) = service_with_reader(&clock).await;
    let log = service
        .save_log(reader.id, article(3, "PMID-1"))
        .await
        .unwrap();

    service.delete_log(reader.id, log.id).await.unwrap();

    assert_that!(service.logs_for(reader.id).await.unwrap(), is_empty());
}

#[tokio::test]
async fn given_log_of_other_reader_when_deleted_then_unauthorized_and_kept() {
    // Given
    let clock = FixedClock::new(utc(2024, 7, 9, 10, 0));
    let (service, reader) = service_with_reader(&clock).await;
    let intruder = service
        .register("Eve", "Intruder", "eve@example.com", Some("pw"))
        .await
        .unwrap();
    let log = service
        .save_log(reader.id, article(3, "PMID-1"))
        .await
        .unwrap();

    // When
    let result = service.delete_log(intruder.id, log.id).await;

    // Then
    assert!(matches!(result, Err(AccountError::Unauthorized { .. })));
    assert_that!(service.logs_for(reader.id).await.unwrap(), len(eq(1)));
}

#[tokio::test]
async fn given_unknown_log_when_deleted_then_not_found() {
    let clock = FixedClock::new(utc(2024, 7, 9, 10, 0));
    let (service, reader) = service_with_reader(&clock).await;

    let result = service.delete_log(reader.id, Uuid::new_v4()).await;

    assert!(matches!(result, Err(AccountError::NotFound { .. })));
}

#[tokio::test]
async fn given_logs_on_several_dates_when_listed_then_oldest_first() {
    let clock = FixedClock::new(utc(2024, 7, 9, 10, 0));
    let (service, reader) = service_with_reader(&clock).await;
    for (day, pmid) in [(20, "late"), (2, "early"), (11, "middle")] {
        service.save_log(reader.id, article(day, pmid)).await.unwrap();
    }

    let logs = service.logs_for(reader.id).await.unwrap();

    let pmids: Vec<&str> = logs.iter().map(|l| l.pmid.as_str()).collect();
    assert_that!(pmids, eq(&vec!["early", "middle", "late"]));
}
