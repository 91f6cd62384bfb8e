//! Fixed-interval catalog polling.
//!
//! # Invariants
//! - The first poll always reports a snapshot.
//! - Later polls report only when the catalog differs from the last report.
//! - A watcher reports a read failure once until reads succeed again or the
//!   failure changes.
//! - A watcher thread exits promptly once stopped or dropped.

use crate::db::{open_db, DbResult};
use crate::model::book::Book;
use crate::repo::archive_repo::ArchiveStore;
use crate::repo::slot_store::{SlotStore, SqliteSlotStore};
use crate::repo::{RepoError, RepoResult};
use log::{error, info};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Catalog re-read period used by the archive views.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Change detector over successive catalog reads.
#[derive(Debug, Default)]
pub struct CatalogPoller {
    last: Option<Vec<Book>>,
}

impl CatalogPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-reads the catalog; returns `Some` when it changed since the last
    /// reported snapshot.
    pub fn poll<S: SlotStore>(&mut self, store: &ArchiveStore<S>) -> RepoResult<Option<Vec<Book>>> {
        let books = store.list_books()?;
        if self.last.as_ref() == Some(&books) {
            return Ok(None);
        }
        self.last = Some(books.clone());
        Ok(Some(books))
    }

    pub fn last_snapshot(&self) -> Option<&[Book]> {
        self.last.as_deref()
    }
}

/// Message delivered by a [`CatalogWatcher`].
#[derive(Debug)]
pub enum CatalogEvent {
    Changed(Vec<Book>),
    Failed(RepoError),
}

/// Background poller over its own connection to a database file.
pub struct CatalogWatcher {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    events: Receiver<CatalogEvent>,
}

impl CatalogWatcher {
    /// Opens `db_path` and starts polling every `interval`.
    ///
    /// The connection is opened on the calling thread so open/migration
    /// failures surface here instead of on the channel.
    pub fn spawn(db_path: impl Into<PathBuf>, interval: Duration) -> DbResult<Self> {
        let db_path = db_path.into();
        let conn = open_db(&db_path)?;
        let stop = Arc::new(AtomicBool::new(false));
        let (sender, events) = mpsc::channel();

        let thread_stop = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            let store = ArchiveStore::new(SqliteSlotStore::new(&conn));
            let mut poller = CatalogPoller::new();
            info!(
                "event=catalog_watch module=sync status=start interval_ms={}",
                interval.as_millis()
            );

            let mut last_failure: Option<String> = None;

            while !thread_stop.load(Ordering::Acquire) {
                let event = match poller.poll(&store) {
                    Ok(changed) => {
                        last_failure = None;
                        changed.map(CatalogEvent::Changed)
                    }
                    Err(err) => {
                        let message = err.to_string();
                        if last_failure.as_deref() == Some(message.as_str()) {
                            None
                        } else {
                            error!("event=catalog_watch module=sync status=error error={message}");
                            last_failure = Some(message);
                            Some(CatalogEvent::Failed(err))
                        }
                    }
                };
                if let Some(event) = event {
                    if sender.send(event).is_err() {
                        break;
                    }
                }
                thread::park_timeout(interval);
            }

            info!("event=catalog_watch module=sync status=stopped");
        });

        Ok(Self {
            stop,
            handle: Some(handle),
            events,
        })
    }

    /// Waits up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<CatalogEvent> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Stops the polling thread and waits for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            let _ = handle.join();
        }
    }
}

impl Drop for CatalogWatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::CatalogPoller;
    use crate::db::open_db_in_memory;
    use crate::model::book::{BookDraft, Discipline};
    use crate::repo::archive_repo::ArchiveStore;
    use crate::repo::slot_store::SqliteSlotStore;

    #[test]
    fn poll_reports_first_snapshot_then_only_changes() {
        let conn = open_db_in_memory().unwrap();
        let store = ArchiveStore::new(SqliteSlotStore::new(&conn));
        let mut poller = CatalogPoller::new();

        let first = poller.poll(&store).unwrap().expect("first poll reports");
        assert_eq!(first.len(), 4);
        assert!(poller.poll(&store).unwrap().is_none());

        store
            .add_book(&BookDraft::new("Sidereal Messenger", "Galileo", Discipline::Science))
            .unwrap();
        let changed = poller.poll(&store).unwrap().expect("change is reported");
        assert_eq!(changed.len(), 5);
        assert_eq!(poller.last_snapshot().map(<[_]>::len), Some(5));
        assert!(poller.poll(&store).unwrap().is_none());
    }
}
