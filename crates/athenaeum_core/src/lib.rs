//! Core data layer for the Athenaeum archive.
//! Owns the book catalog, the community ledger, and the query functions the
//! views render from.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod sync;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookDraft, BookId, Discipline, UnknownDiscipline};
pub use model::document::{DocumentRef, NO_DOCUMENT};
pub use model::epiphany::{Epiphany, EpiphanyId, ANONYMOUS_SEEKER};
pub use query::filter::{filter_books, search_admin, DisciplineFilter};
pub use query::sort::{
    sort_books, sort_epiphanies, AdminSortField, BookSortField, CatalogSortField,
    EpiphanySortField, SortOrder,
};
pub use query::ParseSelectorError;
pub use repo::archive_repo::{ArchiveStore, BOOKS_SLOT};
pub use repo::ledger_repo::{LedgerStore, EPIPHANIES_SLOT};
pub use repo::slot_store::{SlotStore, SqliteSlotStore};
pub use repo::{RepoError, RepoResult};
pub use service::archive_service::{ArchiveService, ArchiveServiceError, PLACEHOLDER_COVER_URL};
pub use service::ledger_service::{LedgerService, LedgerServiceError};
pub use service::librarian::{
    GenerativeModel, GeneratedImage, Librarian, ModelError, OfflineModel, TextRequest,
};
pub use service::session::AdminSession;
pub use sync::poller::{CatalogEvent, CatalogPoller, CatalogWatcher, DEFAULT_POLL_INTERVAL};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
