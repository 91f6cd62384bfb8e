//! WATCH command - follow catalog changes made elsewhere.

use anyhow::Result;
use athenaeum_core::{Book, CatalogEvent, CatalogWatcher};
use clap::Args;
use log::warn;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

use super::{output, Context, HumanReadable};

/// Arguments for the watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Stop after this many snapshots (runs until interrupted otherwise)
    #[arg(long, short = 'n')]
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    volumes: usize,
    books: &'a [Book],
}

impl HumanReadable for Snapshot<'_> {
    fn print_human(&self) {
        println!("-- catalog changed: {} volume(s)", self.volumes);
        for book in self.books {
            println!("   {} by {}", book.title, book.author);
        }
    }
}

/// Execute the watch command.
pub fn execute(
    ctx: &Context<'_>,
    db_path: &Path,
    interval: Duration,
    args: WatchArgs,
) -> Result<()> {
    let watcher = CatalogWatcher::spawn(db_path, interval)?;
    let mut delivered = 0usize;

    while args.count.map_or(true, |limit| delivered < limit) {
        match watcher.recv_timeout(interval.saturating_mul(2)) {
            Some(CatalogEvent::Changed(books)) => {
                output(
                    &Snapshot {
                        volumes: books.len(),
                        books: &books,
                    },
                    ctx.json,
                )?;
                delivered += 1;
            }
            Some(CatalogEvent::Failed(err)) => {
                warn!("event=catalog_watch module=cli status=error error={err}");
                eprintln!("Warning: {err}");
            }
            None => {}
        }
    }

    watcher.stop();
    Ok(())
}
