use athenaeum_core::db::open_db_in_memory;
use athenaeum_core::repo::now_epoch_ms;
use athenaeum_core::{
    LedgerStore, RepoError, SlotStore, SqliteSlotStore, ANONYMOUS_SEEKER, EPIPHANIES_SLOT,
};

#[test]
fn empty_ledger_lists_nothing_and_is_not_seeded() {
    let conn = open_db_in_memory().unwrap();
    let slots = SqliteSlotStore::new(&conn);
    let store = LedgerStore::new(&slots);

    assert!(store.list_epiphanies().unwrap().is_empty());
    assert!(slots.read_slot(EPIPHANIES_SLOT).unwrap().is_none());
}

#[test]
fn seeker_names_are_stored_as_given_and_blank_becomes_anonymous() {
    let conn = open_db_in_memory().unwrap();
    let store = LedgerStore::new(SqliteSlotStore::new(&conn));

    let named = store.add_epiphany("As above, so below.", "  Hermes ").unwrap();
    let blank = store.add_epiphany("Silence.", " \t ").unwrap();

    assert_eq!(named.seeker, "  Hermes ");
    assert_eq!(blank.seeker, ANONYMOUS_SEEKER);
    assert_eq!(store.list_epiphanies().unwrap()[1].seeker, "  Hermes ");
}

#[test]
fn add_prepends_with_defaults() {
    let conn = open_db_in_memory().unwrap();
    let store = LedgerStore::new(SqliteSlotStore::new(&conn));

    let called_at = now_epoch_ms();
    let first = store.add_epiphany("The wound is the door.", "Rumi").unwrap();
    let second = store.add_epiphany("hello", "").unwrap();

    assert_eq!(first.seeker, "Rumi");
    assert_eq!(first.resonance, 0);
    assert!(first.timestamp >= called_at);
    assert_eq!(second.seeker, ANONYMOUS_SEEKER);
    assert_ne!(first.id, second.id);

    let listed = store.list_epiphanies().unwrap();
    assert_eq!(listed, vec![second, first]);
}

#[test]
fn store_itself_accepts_empty_content() {
    let conn = open_db_in_memory().unwrap();
    let store = LedgerStore::new(SqliteSlotStore::new(&conn));

    let entry = store.add_epiphany("", "x").unwrap();
    assert_eq!(entry.content, "");
    assert_eq!(store.list_epiphanies().unwrap().len(), 1);
}

#[test]
fn resonate_increments_exactly_one_entry_by_one() {
    let conn = open_db_in_memory().unwrap();
    let store = LedgerStore::new(SqliteSlotStore::new(&conn));
    let target = store.add_epiphany("Unlearn", "A").unwrap();
    let other = store.add_epiphany("Transcend", "B").unwrap();

    store.resonate(&target.id).unwrap();
    store.resonate(&target.id).unwrap();

    let listed = store.list_epiphanies().unwrap();
    let updated = listed.iter().find(|entry| entry.id == target.id).unwrap();
    assert_eq!(updated.resonance, 2);
    assert_eq!(updated.content, target.content);
    assert_eq!(updated.seeker, target.seeker);
    assert_eq!(updated.timestamp, target.timestamp);
    assert_eq!(listed.iter().find(|entry| entry.id == other.id), Some(&other));
}

#[test]
fn resonate_unknown_id_leaves_ledger_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let slots = SqliteSlotStore::new(&conn);
    let store = LedgerStore::new(&slots);
    store.add_epiphany("Only entry", "Seeker").unwrap();
    let before = slots.read_slot(EPIPHANIES_SLOT).unwrap();
    let updated_before = slots.slot_updated_at(EPIPHANIES_SLOT).unwrap();

    store.resonate("missing").unwrap();

    assert_eq!(slots.read_slot(EPIPHANIES_SLOT).unwrap(), before);
    assert_eq!(slots.slot_updated_at(EPIPHANIES_SLOT).unwrap(), updated_before);
}

#[test]
fn corrupt_ledger_is_reported_and_clear_recovers() {
    let conn = open_db_in_memory().unwrap();
    let slots = SqliteSlotStore::new(&conn);
    slots.write_slot(EPIPHANIES_SLOT, "[{\"id\": 3}]").unwrap();
    let store = LedgerStore::new(&slots);

    let err = store.list_epiphanies().unwrap_err();
    assert!(matches!(err, RepoError::CorruptSlot { ref key, .. } if key == EPIPHANIES_SLOT));

    store.clear().unwrap();
    assert!(store.list_epiphanies().unwrap().is_empty());
}
