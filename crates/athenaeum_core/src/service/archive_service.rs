//! Archive use cases: curator CRUD, catalog views and librarian inquiries.
//!
//! # Invariants
//! - Writes require a curator session.
//! - Drafts with blank title/author or a non-PDF embedded document never
//!   reach the store.
//! - A book stored without a cover gets a generated one, or the static
//!   placeholder when generation yields nothing.

use crate::model::book::{Book, BookDraft};
use crate::model::document::DocumentRef;
use crate::query::filter::{filter_books, search_admin, DisciplineFilter};
use crate::query::sort::{sort_books, AdminSortField, SortOrder};
use crate::repo::archive_repo::ArchiveStore;
use crate::repo::slot_store::SlotStore;
use crate::repo::{RepoError, RepoResult};
use crate::service::librarian::{GenerativeModel, Librarian};
use crate::service::session::AdminSession;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Cover stored when none was supplied and generation returned nothing.
pub const PLACEHOLDER_COVER_URL: &str = "https://picsum.photos/seed/archive/400/600?grayscale";

#[derive(Debug)]
pub enum ArchiveServiceError {
    /// Operation requires a curator session.
    NotAuthorized,
    /// Required text input is blank.
    MissingField(&'static str),
    /// Attached document is neither absent, remote, nor an embedded PDF.
    UnsupportedDocument(String),
    Repo(RepoError),
}

impl Display for ArchiveServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAuthorized => write!(f, "curator access is required"),
            Self::MissingField(field) => write!(f, "`{field}` must not be empty"),
            Self::UnsupportedDocument(kind) => write!(
                f,
                "only PDF documents may be sealed within these archives (got {kind})"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ArchiveServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ArchiveServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub struct ArchiveService<S: SlotStore, M: GenerativeModel> {
    store: ArchiveStore<S>,
    librarian: Librarian<M>,
}

impl<S: SlotStore, M: GenerativeModel> ArchiveService<S, M> {
    pub fn new(store: ArchiveStore<S>, librarian: Librarian<M>) -> Self {
        Self { store, librarian }
    }

    pub fn store(&self) -> &ArchiveStore<S> {
        &self.store
    }

    /// Public catalog view: discipline selector plus free-text filter.
    pub fn catalog(&self, selector: DisciplineFilter, text: &str) -> RepoResult<Vec<Book>> {
        let books = self.store.list_books()?;
        Ok(filter_books(&books, selector, text))
    }

    /// Admin listing: title/author search, then sort.
    pub fn admin_listing(
        &self,
        text: &str,
        field: AdminSortField,
        order: SortOrder,
    ) -> RepoResult<Vec<Book>> {
        let books = self.store.list_books()?;
        Ok(sort_books(&search_admin(&books, text), field, order))
    }

    /// Validates and stores a new book, filling a missing cover.
    pub fn add_book(
        &self,
        session: &AdminSession,
        mut draft: BookDraft,
    ) -> Result<Book, ArchiveServiceError> {
        require_curator(session)?;
        draft.title = draft.title.trim().to_string();
        draft.author = draft.author.trim().to_string();
        if draft.title.is_empty() {
            return Err(ArchiveServiceError::MissingField("title"));
        }
        if draft.author.is_empty() {
            return Err(ArchiveServiceError::MissingField("author"));
        }

        let document = DocumentRef::parse(&draft.file_url);
        if !document.is_acceptable_document() {
            return Err(ArchiveServiceError::UnsupportedDocument(describe(&document)));
        }
        if document.is_none() {
            draft.file_url = crate::model::document::NO_DOCUMENT.to_string();
        }

        if DocumentRef::parse(&draft.cover_url).is_none() {
            let generated = self
                .librarian
                .generate_cover(&draft.title, draft.discipline.label());
            draft.cover_url = if generated.is_empty() {
                info!("event=cover_fallback module=service status=ok");
                PLACEHOLDER_COVER_URL.to_string()
            } else {
                generated
            };
        }

        Ok(self.store.add_book(&draft)?)
    }

    pub fn delete_book(&self, session: &AdminSession, id: &str) -> Result<(), ArchiveServiceError> {
        require_curator(session)?;
        Ok(self.store.delete_book(id)?)
    }

    /// Asks the librarian about the current catalog.
    pub fn consult(&self, query: &str) -> Result<String, ArchiveServiceError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ArchiveServiceError::MissingField("query"));
        }
        let books = self.store.list_books()?;
        Ok(self.librarian.recommend(query, &books))
    }
}

fn require_curator(session: &AdminSession) -> Result<(), ArchiveServiceError> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(ArchiveServiceError::NotAuthorized)
    }
}

fn describe(document: &DocumentRef<'_>) -> String {
    match document {
        DocumentRef::Embedded { mime } => mime.unwrap_or("untyped data").to_string(),
        DocumentRef::Other(raw) => format!("`{}`", raw.chars().take(32).collect::<String>()),
        DocumentRef::None | DocumentRef::Remote(_) => "acceptable document".to_string(),
    }
}
