use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Config error: {0}")]
    Config(#[from] rl_config::ConfigError),

    #[error("Database error: {0}")]
    Db(#[from] rl_db::DbError),

    #[error("Account error: {0}")]
    Account(#[from] rl_account::AccountError),

    #[error("Delivery failed for {identity}: {message}")]
    Delivery { identity: String, message: String },

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, NotifierError>;
