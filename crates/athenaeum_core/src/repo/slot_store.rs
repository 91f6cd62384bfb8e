//! Key-value slot contract and its SQLite implementation.
//!
//! A slot is one string key mapped to one string value. The archive and the
//! ledger each own a single slot holding a JSON array.
//!
//! # Invariants
//! - `write_slot` replaces the whole value in one statement.
//! - Missing slots read as `None`, never as an empty string.

use crate::repo::{RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storage contract for string-keyed slots.
pub trait SlotStore {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>>;
    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()>;
    fn remove_slot(&self, key: &str) -> RepoResult<()>;
}

impl<S: SlotStore + ?Sized> SlotStore for &S {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).read_slot(key)
    }

    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).write_slot(key, value)
    }

    fn remove_slot(&self, key: &str) -> RepoResult<()> {
        (**self).remove_slot(key)
    }
}

/// SQLite-backed slot store over the `kv_slots` table.
pub struct SqliteSlotStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStore<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Epoch-ms timestamp of the last write to `key`, if the slot exists.
    pub fn slot_updated_at(&self, key: &str) -> RepoResult<Option<i64>> {
        let updated_at = self
            .conn
            .query_row(
                "SELECT updated_at FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(updated_at)
    }
}

impl SlotStore for SqliteSlotStore<'_> {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_slots WHERE key = ?1;", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value, crate::repo::now_epoch_ms()],
        )?;
        debug!(
            "event=slot_write module=repo status=ok key={} bytes={}",
            key,
            value.len()
        );
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM kv_slots WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// Reads and decodes a JSON slot; `None` when the slot was never written.
pub(crate) fn read_json<T: DeserializeOwned>(
    slots: &impl SlotStore,
    key: &str,
) -> RepoResult<Option<T>> {
    let Some(raw) = slots.read_slot(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| RepoError::CorruptSlot {
            key: key.to_string(),
            message: err.to_string(),
        })
}

/// Encodes `value` as JSON and replaces the slot.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    slots: &impl SlotStore,
    key: &str,
    value: &T,
) -> RepoResult<()> {
    let encoded = serde_json::to_string(value).map_err(RepoError::Serialize)?;
    slots.write_slot(key, &encoded)
}
