use crate::Result as NotifierErrorResult;

use rl_core::Identity;

use std::fmt;

use async_trait::async_trait;
use log::info;

/// What is being sent to a reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Periodic reminder about the reader's saved searches
    Digest,
    /// Account activation; `key` unlocks the account today
    Welcome { key: String },
    /// Password reset; `key` authorizes a new password today
    PasswordReset { key: String },
}

impl Notification {
    pub fn subject(&self) -> &'static str {
        match self {
            Self::Digest => "Your reading-log searches",
            Self::Welcome { .. } => "Welcome to the reading log",
            Self::PasswordReset { .. } => "Reading-log password reset",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Digest => "digest",
            Self::Welcome { .. } => "welcome",
            Self::PasswordReset { .. } => "password-reset",
        };
        f.write_str(kind)
    }
}

/// Where notifications are delivered.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(
        &self,
        identity: &Identity,
        notification: &Notification,
    ) -> NotifierErrorResult<()>;
}

/// Records each delivery in the log instead of sending mail.
///
/// Confirmation keys are never written to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn deliver(
        &self,
        identity: &Identity,
        notification: &Notification,
    ) -> NotifierErrorResult<()> {
        info!(
            "Sending {} message '{}' to {} <{}> ({} saved searches)",
            notification,
            notification.subject(),
            identity.display_name(),
            identity.email,
            identity.searches.len()
        );
        Ok(())
    }
}
