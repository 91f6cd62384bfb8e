//! Ledger use cases: submission, resonance and collective synthesis.

use crate::model::epiphany::Epiphany;
use crate::query::sort::{sort_epiphanies, EpiphanySortField, SortOrder};
use crate::repo::ledger_repo::LedgerStore;
use crate::repo::slot_store::SlotStore;
use crate::repo::{RepoError, RepoResult};
use crate::service::librarian::{GenerativeModel, Librarian};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum LedgerServiceError {
    /// Submitted content is blank.
    EmptyContent,
    Repo(RepoError),
}

impl Display for LedgerServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "an epiphany must have content"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LedgerServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyContent => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for LedgerServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub struct LedgerService<S: SlotStore, M: GenerativeModel> {
    store: LedgerStore<S>,
    librarian: Librarian<M>,
}

impl<S: SlotStore, M: GenerativeModel> LedgerService<S, M> {
    pub fn new(store: LedgerStore<S>, librarian: Librarian<M>) -> Self {
        Self { store, librarian }
    }

    pub fn store(&self) -> &LedgerStore<S> {
        &self.store
    }

    /// Seals one epiphany. Blank content is rejected before the store.
    pub fn submit(&self, content: &str, seeker: &str) -> Result<Epiphany, LedgerServiceError> {
        if content.trim().is_empty() {
            return Err(LedgerServiceError::EmptyContent);
        }
        Ok(self.store.add_epiphany(content, seeker)?)
    }

    pub fn resonate(&self, id: &str) -> RepoResult<()> {
        self.store.resonate(id)
    }

    /// Ledger in stored order (newest submission first).
    pub fn list(&self) -> RepoResult<Vec<Epiphany>> {
        self.store.list_epiphanies()
    }

    pub fn list_sorted(
        &self,
        field: EpiphanySortField,
        order: SortOrder,
    ) -> RepoResult<Vec<Epiphany>> {
        Ok(sort_epiphanies(&self.store.list_epiphanies()?, field, order))
    }

    pub fn synthesize(&self) -> RepoResult<String> {
        let entries = self.store.list_epiphanies()?;
        Ok(self.librarian.synthesize(&entries))
    }
}
