pub mod account_message;
pub mod cli;
pub mod error;
pub mod job;
pub mod logger;
pub mod notification_sink;

pub use account_message::{AccountMessage, send_account_message};
pub use cli::{Cli, Commands};
pub use error::{NotifierError, Result};
pub use job::{JobReport, run_once};
pub use notification_sink::{LogSink, Notification, NotificationSink};
