//! Archive and ledger domain model.
//!
//! # Responsibility
//! - Define the records persisted in the `books` and `epiphanies` slots.
//! - Classify document/cover references stored on books.
//!
//! # Invariants
//! - Record ids are assigned by the owning store and never reused.
//! - `Book::created_at` and `Epiphany::timestamp` are set once at insertion.

pub mod book;
pub mod document;
pub mod epiphany;
pub mod seed;
