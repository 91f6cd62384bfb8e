//! Subcommand handlers and shared output helpers.

pub mod books;
pub mod ledger;
pub mod librarian;
pub mod watch;

use anyhow::Result;
use athenaeum_core::{
    AdminSession, ArchiveService, ArchiveStore, GenerativeModel, LedgerService, LedgerStore,
    Librarian, SqliteSlotStore,
};
use serde::Serialize;

/// Everything a handler needs for one invocation.
pub struct Context<'a> {
    pub slots: SqliteSlotStore<'a>,
    pub model: &'a dyn GenerativeModel,
    pub session: AdminSession,
    pub json: bool,
}

pub type CliArchive<'c, 'a> = ArchiveService<&'c SqliteSlotStore<'a>, &'a dyn GenerativeModel>;
pub type CliLedger<'c, 'a> = LedgerService<&'c SqliteSlotStore<'a>, &'a dyn GenerativeModel>;

impl<'a> Context<'a> {
    pub fn archive(&self) -> CliArchive<'_, 'a> {
        ArchiveService::new(ArchiveStore::new(&self.slots), Librarian::new(self.model))
    }

    pub fn ledger(&self) -> CliLedger<'_, 'a> {
        LedgerService::new(LedgerStore::new(&self.slots), Librarian::new(self.model))
    }

    pub fn require_curator(&self, action: &str) -> Result<()> {
        anyhow::ensure!(
            self.session.is_admin(),
            "`{action}` requires curator access; pass --admin"
        );
        Ok(())
    }
}

/// Formatted terminal rendering of a command result.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Prints `value` as pretty JSON or in its human form.
pub fn output<T: Serialize + HumanReadable>(value: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        value.print_human();
    }
    Ok(())
}

/// Shortens `text` to `max_chars`, marking the cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let single_line = text.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let mut cut = single_line.chars().take(max_chars).collect::<String>();
    cut.push_str("...");
    cut
}
