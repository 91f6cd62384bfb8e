//! Archive store: the book catalog kept in the `books` slot.
//!
//! # Invariants
//! - The first read of a never-written slot seeds the built-in catalog.
//! - New books are prepended; stored order is otherwise preserved.
//! - `id` is unique and `created_at` is never rewritten.

use crate::model::book::{Book, BookDraft};
use crate::model::seed::seed_books;
use crate::repo::slot_store::{read_json, write_json, SlotStore};
use crate::repo::{now_epoch_ms, unused_record_id, RepoResult};
use log::info;

/// Slot key holding the JSON array of books.
pub const BOOKS_SLOT: &str = "books";

/// Book catalog over a slot store.
pub struct ArchiveStore<S: SlotStore> {
    slots: S,
}

impl<S: SlotStore> ArchiveStore<S> {
    pub fn new(slots: S) -> Self {
        Self { slots }
    }

    /// Returns every book in stored order, seeding on first access.
    pub fn list_books(&self) -> RepoResult<Vec<Book>> {
        if let Some(books) = read_json::<Vec<Book>>(&self.slots, BOOKS_SLOT)? {
            return Ok(books);
        }

        let seeded = seed_books(now_epoch_ms());
        write_json(&self.slots, BOOKS_SLOT, &seeded)?;
        info!(
            "event=archive_seed module=repo status=ok count={}",
            seeded.len()
        );
        Ok(seeded)
    }

    /// Looks up one book by id.
    pub fn get_book(&self, id: &str) -> RepoResult<Option<Book>> {
        Ok(self.list_books()?.into_iter().find(|book| book.id == id))
    }

    /// Stores `draft` as a new book at the front of the catalog.
    pub fn add_book(&self, draft: &BookDraft) -> RepoResult<Book> {
        let mut books = self.list_books()?;
        let id = unused_record_id(|candidate| books.iter().any(|book| book.id == candidate));
        let book = draft.clone().into_book(id, now_epoch_ms());

        books.insert(0, book.clone());
        write_json(&self.slots, BOOKS_SLOT, &books)?;
        info!(
            "event=book_add module=repo status=ok id={} count={}",
            book.id,
            books.len()
        );
        Ok(book)
    }

    /// Removes the book with `id`; absent ids are ignored.
    pub fn delete_book(&self, id: &str) -> RepoResult<()> {
        let mut books = self.list_books()?;
        let before = books.len();
        books.retain(|book| book.id != id);
        write_json(&self.slots, BOOKS_SLOT, &books)?;
        info!(
            "event=book_delete module=repo status=ok id={} removed={}",
            id,
            before - books.len()
        );
        Ok(())
    }

    /// Overwrites the catalog with the built-in seed set.
    ///
    /// This is the only recovery path for a corrupt `books` slot.
    pub fn reset_to_seed(&self) -> RepoResult<Vec<Book>> {
        let seeded = seed_books(now_epoch_ms());
        write_json(&self.slots, BOOKS_SLOT, &seeded)?;
        info!(
            "event=archive_reset module=repo status=ok count={}",
            seeded.len()
        );
        Ok(seeded)
    }
}
