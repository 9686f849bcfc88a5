
use std::env;

use tempfile::TempDir;

pub(crate) const VALID_SIGNING_KEY: &str = "0123456789abcdef0123456789abcdef";

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Create a temp config directory, point RL_CONFIG_DIR at it and clear
/// every other RL_* override so the host environment cannot leak in.
pub(crate) fn setup_config_dir() -> (TempDir, Vec<EnvGuard>) {
    let temp = TempDir::new().unwrap();
    let mut guards = vec![EnvGuard::set(
        "RL_CONFIG_DIR",
        temp.path().to_str().unwrap(),
    )];
    for key in [
        "RL_DATABASE_PATH",
        "RL_PASSWORD_SALT",
        "RL_TOKEN_ISSUER",
        "RL_TOKEN_SIGNING_KEY",
        "RL_TOKEN_TTL_HOURS",
        "RL_LOG_LEVEL",
        "RL_LOG_COLORED",
        "RL_LOG_FILE",
        "RL_NOTIFICATION_INTERVAL_DAYS",
    ] {
        guards.push(EnvGuard::remove(key));
    }
    (temp, guards)
}

/// Env overrides that make the auth section valid
pub(crate) fn valid_auth_env() -> Vec<EnvGuard> {
    vec![
        EnvGuard::set("RL_PASSWORD_SALT", "pepper"),
        EnvGuard::set("RL_TOKEN_SIGNING_KEY", VALID_SIGNING_KEY),
    ]
}
