//! Cross-writer change observation.
//!
//! Writers share nothing but the database file. Changes made through another
//! connection become visible to a reader only when it re-reads the slot, so
//! the catalog is re-read on a fixed interval. Concurrent writers race with
//! last-write-wins semantics; there is no merge.

pub mod poller;
