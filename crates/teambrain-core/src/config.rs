//! Shared configuration for Team Brain.
//!
//! Provides functions to locate the state directory and environment files
//! used by the server and CLI.
//!
//! # Storage Structure
//!
//! All application data is stored under `~/.teambrain/`:
//!
//! ```text
//! ~/.teambrain/
//! ├── config/       # User configuration (.env.local with secrets)
//! ├── logs/         # Application logs
//! └── state/        # Teams, members, cached availability, sync tokens
//! ```
//!
//! # Environment Variables
//!
//! - `TEAMBRAIN_STATE_DIR`: Override the base directory
//! - `TEAMBRAIN_CONFIG_DIR`: Override the config directory
//! - `TEAMBRAIN_LOG_DIR`: Override the log directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::debug;

/// Environment variable for custom base directory.
pub const STATE_DIR_ENV: &str = "TEAMBRAIN_STATE_DIR";

/// Environment variable for custom config directory.
pub const CONFIG_DIR_ENV: &str = "TEAMBRAIN_CONFIG_DIR";

/// Environment variable for custom log directory.
pub const LOG_DIR_ENV: &str = "TEAMBRAIN_LOG_DIR";

/// Default base directory name under home.
const DEFAULT_STATE_DIR: &str = ".teambrain";

const CONFIG_SUBDIR: &str = "config";
const LOGS_SUBDIR: &str = "logs";
const STATE_SUBDIR: &str = "state";

static STATE_DIR_CACHE: OnceLock<PathBuf> = OnceLock::new();

/// Get the Team Brain base directory.
///
/// Resolved once, in order:
/// 1. `TEAMBRAIN_STATE_DIR` environment variable if set
/// 2. `~/.teambrain` if the home directory is available
/// 3. `.teambrain` in the current directory
pub fn state_dir() -> PathBuf {
    STATE_DIR_CACHE
        .get_or_init(|| {
            std::env::var(STATE_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_state_dir())
        })
        .clone()
}

fn default_state_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(DEFAULT_STATE_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
}

/// Get the config directory.
pub fn config_dir() -> PathBuf {
    std::env::var(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir().join(CONFIG_SUBDIR))
}

/// Get the logs directory.
pub fn logs_dir() -> PathBuf {
    std::env::var(LOG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir().join(LOGS_SUBDIR))
}

/// Directory holding persisted teams, members and availability under `base`.
pub fn data_dir(base: &Path) -> PathBuf {
    base.join(STATE_SUBDIR)
}

/// Get the .env.local file path (API keys, relay URL).
pub fn env_file() -> PathBuf {
    config_dir().join(".env.local")
}

/// Load environment files.
///
/// The config directory's `.env.local` wins; a `.env.local` or `.env` in the
/// working directory is also read. Variables already set are never
/// overwritten.
pub fn load_env() {
    let env_path = env_file();
    if env_path.exists() {
        if let Err(e) = dotenvy::from_path(&env_path) {
            debug!(path = %env_path.display(), error = %e, "Failed to load env file");
        }
    }
    let _ = dotenvy::from_filename(".env.local").or_else(|_| dotenvy::dotenv());
}

/// Ensure the config, log and data directories exist under `base`.
///
/// # Errors
/// Returns an error if any directory cannot be created.
pub fn ensure_dirs(base: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(base.join(CONFIG_SUBDIR))?;
    std::fs::create_dir_all(base.join(LOGS_SUBDIR))?;
    std::fs::create_dir_all(data_dir(base))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_state_dir_not_empty() {
        assert!(!state_dir().as_os_str().is_empty());
    }

    #[test]
    fn test_env_file_in_config_dir() {
        let path = env_file();
        assert!(path.ends_with(".env.local"));
    }

    #[test]
    fn test_data_dir_under_base() {
        let base = PathBuf::from("/tmp/teambrain");
        assert_eq!(data_dir(&base), PathBuf::from("/tmp/teambrain/state"));
    }

    #[test]
    fn test_ensure_dirs_creates_layout() {
        let dir = tempdir().unwrap();
        ensure_dirs(dir.path()).unwrap();

        assert!(dir.path().join("config").is_dir());
        assert!(dir.path().join("logs").is_dir());
        assert!(dir.path().join("state").is_dir());
    }
}
