use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rl-notifier")]
#[command(about = "Sends reading-log notifications and account messages")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Deliver every due notification, then advance each schedule
    Run {
        /// List due identities without delivering or rescheduling
        #[arg(long)]
        dry_run: bool,

        /// Override notification.interval_days from the config
        #[arg(long)]
        interval_days: Option<u32>,
    },

    /// List identities with a notification due now
    Due,

    /// Send the account activation message with today's confirmation key
    Welcome {
        /// Identity id or email address
        id_or_email: String,
    },

    /// Send the password reset message with today's confirmation key
    Reset {
        /// Identity id or email address
        id_or_email: String,
    },
}
