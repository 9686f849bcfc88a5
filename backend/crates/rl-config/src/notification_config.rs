use crate::{ConfigError, ConfigErrorResult, DEFAULT_NOTIFICATION_INTERVAL_DAYS};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Calendar days between two notifications for the same identity
    pub interval_days: u32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            interval_days: DEFAULT_NOTIFICATION_INTERVAL_DAYS,
        }
    }
}

impl NotificationConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.interval_days == 0 {
            return Err(ConfigError::notification(
                "notification.interval_days must be at least 1",
            ));
        }
        Ok(())
    }
}
