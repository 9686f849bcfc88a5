//! One pass over the due notifications.
//!
//! An identity is advanced only after its delivery succeeded, so a failed
//! delivery is retried on the next pass. A failure for one identity never
//! stops the pass.

use crate::{Notification, NotificationSink, Result as NotifierErrorResult};

use rl_account::AccountService;
use rl_db::IdentityStore;

use log::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobReport {
    pub due: usize,
    pub delivered: usize,
    pub failed: usize,
}

pub async fn run_once<S, N>(
    service: &AccountService<S>,
    sink: &N,
    interval_days: u32,
    dry_run: bool,
) -> NotifierErrorResult<JobReport>
where
    S: IdentityStore,
    N: NotificationSink + ?Sized,
{
    let due = service.due_notifications().await?;
    let mut report = JobReport {
        due: due.len(),
        ..JobReport::default()
    };

    info!("{} notification(s) due", report.due);

    if dry_run {
        for identity in &due {
            info!(
                "[dry-run] {} <{}> due at {:?}",
                identity.id, identity.email, identity.notification_at
            );
        }
        return Ok(report);
    }

    for identity in &due {
        if let Err(e) = sink.deliver(identity, &Notification::Digest).await {
            warn!("Delivery to {} failed, will retry: {}", identity.id, e);
            report.failed += 1;
            continue;
        }

        match service.advance_notification(identity.id, interval_days).await {
            Ok(_) => report.delivered += 1,
            Err(e) => {
                warn!("Delivered to {} but could not reschedule: {}", identity.id, e);
                report.failed += 1;
            }
        }
    }

    info!(
        "Notification pass complete: delivered={}, failed={}",
        report.delivered, report.failed
    );

    Ok(report)
}
