//! Slot-backed stores for the archive catalog and the community ledger.
//!
//! # Responsibility
//! - Own the persisted collections; callers only see freshly decoded copies.
//! - Keep every mutation a single whole-slot write.
//!
//! # Invariants
//! - Read paths reject undecodable slots with [`RepoError::CorruptSlot`]
//!   instead of masking them.
//! - Unknown ids on delete/resonate are silent no-ops.

pub mod archive_repo;
pub mod ledger_repo;
pub mod slot_store;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level error for slot persistence and decoding.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Persisted slot value is not a valid JSON collection of the slot's type.
    CorruptSlot { key: String, message: String },
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::CorruptSlot { key, message } => {
                write!(f, "persisted slot `{key}` is corrupt: {message}")
            }
            Self::Serialize(err) => write!(f, "failed to encode slot value: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::CorruptSlot { .. } => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Generates a fresh record id: 32 lowercase hex chars from a v4 uuid.
fn generate_record_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Generates record ids until one is not `taken`.
pub(crate) fn unused_record_id(taken: impl Fn(&str) -> bool) -> String {
    loop {
        let candidate = generate_record_id();
        if !taken(&candidate) {
            return candidate;
        }
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
