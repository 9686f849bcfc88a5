//! rl-notifier - delivers due reading-log notifications.
//!
//! ```bash
//! # See who is due without sending anything
//! rl-notifier run --dry-run
//!
//! # Deliver and reschedule two weeks out
//! rl-notifier run --interval-days 14
//!
//! # Resend the activation message
//! rl-notifier welcome reader@example.com
//! ```

use rl_account::AccountService;
use rl_config::Config;
use rl_core::SystemClock;
use rl_db::IdentityRepository;
use rl_notifier::{
    AccountMessage, Cli, Commands, LogSink, NotifierError, logger, run_once, send_account_message,
};

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is normal
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("rl-notifier: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), NotifierError> {
    let config = Config::load()?;
    config.validate()?;

    let log_file = config.log_file_path()?;
    if let Some(dir) = log_file.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(dir).map_err(|e| NotifierError::Logger {
            message: format!("Failed to create log directory {}: {}", dir.display(), e),
        })?;
    }
    logger::initialize(config.logging.level, log_file, config.logging.colored)?;

    info!("Starting rl-notifier v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let pool = rl_db::connect(&config.database_path()?).await?;
    let service = AccountService::from_config(
        IdentityRepository::new(pool),
        Arc::new(SystemClock),
        &config.auth,
    )?;

    match cli.command {
        Commands::Run {
            dry_run,
            interval_days,
        } => {
            let days = interval_days.unwrap_or(config.notification.interval_days);
            let report = run_once(&service, &LogSink, days, dry_run).await?;
            if report.failed > 0 {
                error!("{} notification(s) could not be completed", report.failed);
            }
        }
        Commands::Due => {
            for identity in service.due_notifications().await? {
                println!(
                    "{}\t{}\t{}",
                    identity.id,
                    identity.email,
                    identity
                        .notification_at
                        .map(|at| at.to_rfc3339())
                        .unwrap_or_default()
                );
            }
        }
        Commands::Welcome { id_or_email } => {
            send_account_message(&service, &LogSink, &id_or_email, AccountMessage::Welcome)
                .await?;
        }
        Commands::Reset { id_or_email } => {
            send_account_message(
                &service,
                &LogSink,
                &id_or_email,
                AccountMessage::PasswordReset,
            )
            .await?;
        }
    }

    Ok(())
}
