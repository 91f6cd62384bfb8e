//! Ledger store: community epiphanies kept in the `epiphanies` slot.
//!
//! # Invariants
//! - A never-written slot reads as an empty ledger; nothing is seeded.
//! - `resonance` only grows, by exactly one per `resonate` call.
//! - Content is stored as given; non-empty checks belong to callers.

use crate::model::epiphany::{seeker_or_anonymous, Epiphany};
use crate::repo::slot_store::{read_json, write_json, SlotStore};
use crate::repo::{now_epoch_ms, unused_record_id, RepoResult};
use log::{debug, info};

/// Slot key holding the JSON array of epiphanies.
pub const EPIPHANIES_SLOT: &str = "epiphanies";

pub struct LedgerStore<S: SlotStore> {
    slots: S,
}

impl<S: SlotStore> LedgerStore<S> {
    pub fn new(slots: S) -> Self {
        Self { slots }
    }

    pub fn list_epiphanies(&self) -> RepoResult<Vec<Epiphany>> {
        Ok(read_json::<Vec<Epiphany>>(&self.slots, EPIPHANIES_SLOT)?.unwrap_or_default())
    }

    /// Prepends a new entry; a blank `seeker` is stored as the anonymous name.
    pub fn add_epiphany(&self, content: &str, seeker: &str) -> RepoResult<Epiphany> {
        let mut entries = self.list_epiphanies()?;
        let id = unused_record_id(|candidate| entries.iter().any(|entry| entry.id == candidate));

        let entry = Epiphany {
            id,
            seeker: seeker_or_anonymous(seeker),
            content: content.to_string(),
            timestamp: now_epoch_ms(),
            resonance: 0,
        };
        entries.insert(0, entry.clone());
        write_json(&self.slots, EPIPHANIES_SLOT, &entries)?;
        info!(
            "event=epiphany_add module=repo status=ok id={} count={}",
            entry.id,
            entries.len()
        );
        Ok(entry)
    }

    /// Adds one resonance to the entry with `id`; unknown ids change nothing.
    pub fn resonate(&self, id: &str) -> RepoResult<()> {
        let mut entries = self.list_epiphanies()?;
        let Some(entry) = entries.iter_mut().find(|entry| entry.id == id) else {
            debug!("event=epiphany_resonate module=repo status=skipped id={id}");
            return Ok(());
        };

        entry.resonance = entry.resonance.saturating_add(1);
        let resonance = entry.resonance;
        write_json(&self.slots, EPIPHANIES_SLOT, &entries)?;
        info!("event=epiphany_resonate module=repo status=ok id={id} resonance={resonance}");
        Ok(())
    }

    /// Drops every entry. Recovery path for a corrupt `epiphanies` slot.
    pub fn clear(&self) -> RepoResult<()> {
        self.slots.remove_slot(EPIPHANIES_SLOT)?;
        info!("event=ledger_clear module=repo status=ok");
        Ok(())
    }
}
