mod config;
pub mod database;

pub use config::{Config, NotificationsConfig, RecoveryConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the application data directory, creating it if needed.
///
/// `CLEANTIME_HOME` names the directory outright. Otherwise it is
/// `~/.config/cleantime`, or `~/.config/cleantime-dev` with CLEANTIME_ENV=dev.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("CLEANTIME_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("CLEANTIME_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("cleantime-dev")
            } else {
                base_dir.join("cleantime")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
