//! Runtime configuration resolved from the environment.
//!
//! | Variable                     | Default                         |
//! |------------------------------|---------------------------------|
//! | `ATHENAEUM_DB_PATH`          | `<temp_dir>/athenaeum.sqlite3`  |
//! | `ATHENAEUM_LOG_DIR`          | logging disabled                |
//! | `ATHENAEUM_LOG_LEVEL`        | [`default_log_level`]           |
//! | `ATHENAEUM_POLL_INTERVAL_MS` | `2000`                          |
//! | `GEMINI_API_KEY` / `API_KEY` | none (offline librarian)        |

use crate::logging::default_log_level;
use crate::sync::poller::DEFAULT_POLL_INTERVAL;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const DB_PATH_ENV: &str = "ATHENAEUM_DB_PATH";
pub const LOG_DIR_ENV: &str = "ATHENAEUM_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "ATHENAEUM_LOG_LEVEL";
pub const POLL_INTERVAL_ENV: &str = "ATHENAEUM_POLL_INTERVAL_MS";
pub const API_KEY_ENVS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

const DEFAULT_DB_FILE_NAME: &str = "athenaeum.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidPollInterval(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPollInterval(value) => write!(
                f,
                "{POLL_INTERVAL_ENV} must be a positive integer of milliseconds, got `{value}`"
            ),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
    pub poll_interval: Duration,
    pub api_key: Option<String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_dir: None,
            log_level: default_log_level().to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            api_key: None,
        }
    }
}

impl CoreConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let poll_interval = match read(POLL_INTERVAL_ENV) {
            Some(raw) => parse_poll_interval(&raw)?,
            None => defaults.poll_interval,
        };

        Ok(Self {
            db_path: read(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
            log_level: read(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            poll_interval,
            api_key: API_KEY_ENVS.iter().find_map(|name| read(*name)),
        })
    }
}

fn parse_poll_interval(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(millis) if millis > 0 => Ok(Duration::from_millis(millis)),
        _ => Err(ConfigError::InvalidPollInterval(raw.to_string())),
    }
}
