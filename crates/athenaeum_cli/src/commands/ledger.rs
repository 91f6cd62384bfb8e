//! LEDGER command - the community record of epiphanies.

use anyhow::Result;
use athenaeum_core::{Epiphany, EpiphanySortField, SortOrder};
use clap::{Args, Subcommand};
use serde::Serialize;

use super::{excerpt, output, Context, HumanReadable};

/// Arguments for the ledger command.
#[derive(Args)]
pub struct LedgerArgs {
    #[command(subcommand)]
    pub command: LedgerCommand,
}

#[derive(Subcommand)]
pub enum LedgerCommand {
    /// List entries, newest first unless sorted
    List {
        /// timestamp|resonance|seeker
        #[arg(long)]
        sort: Option<EpiphanySortField>,

        /// asc|desc
        #[arg(long)]
        order: Option<SortOrder>,
    },

    /// Seal a new epiphany
    Post {
        content: String,

        /// Name to sign with; anonymous when omitted
        #[arg(long, default_value = "")]
        seeker: String,
    },

    /// Resonate with an entry
    Resonate { id: String },

    /// Ask the librarian to weave the ledger into one observation
    Synthesize,

    /// Erase every entry (curator)
    Clear,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
struct Ledger(Vec<Epiphany>);

impl HumanReadable for Ledger {
    fn print_human(&self) {
        if self.0.is_empty() {
            println!("  (The ledger is blank)");
            return;
        }
        for entry in &self.0 {
            println!("[{}] {} ({} resonance)", entry.id, entry.seeker, entry.resonance);
            println!("    {}", excerpt(&entry.content, 96));
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
struct Sealed(Epiphany);

impl HumanReadable for Sealed {
    fn print_human(&self) {
        println!("Sealed in the ledger as {}.", self.0.id);
        println!("  {}: {}", self.0.seeker, excerpt(&self.0.content, 96));
    }
}

#[derive(Debug, Serialize)]
struct Resonated {
    id: String,
    resonance: Option<u64>,
}

impl HumanReadable for Resonated {
    fn print_human(&self) {
        match self.resonance {
            Some(count) => println!("Resonance for {} is now {count}.", self.id),
            None => println!("No entry `{}` in the ledger; nothing changed.", self.id),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct Reply {
    pub text: String,
}

impl HumanReadable for Reply {
    fn print_human(&self) {
        println!("{}", self.text);
    }
}

#[derive(Debug, Serialize)]
struct Cleared {
    cleared: bool,
}

impl HumanReadable for Cleared {
    fn print_human(&self) {
        println!("The ledger has been cleared.");
    }
}

/// Execute the ledger command.
pub fn execute(ctx: &Context<'_>, args: LedgerArgs) -> Result<()> {
    let ledger = ctx.ledger();

    match args.command {
        LedgerCommand::List { sort, order } => {
            let entries = match (sort, order) {
                (None, None) => ledger.list()?,
                (sort, order) => {
                    ledger.list_sorted(sort.unwrap_or_default(), order.unwrap_or_default())?
                }
            };
            output(&Ledger(entries), ctx.json)
        }
        LedgerCommand::Post { content, seeker } => {
            let entry = ledger.submit(&content, &seeker)?;
            output(&Sealed(entry), ctx.json)
        }
        LedgerCommand::Resonate { id } => {
            ledger.resonate(&id)?;
            let resonance = ledger
                .list()?
                .into_iter()
                .find(|entry| entry.id == id)
                .map(|entry| entry.resonance);
            output(&Resonated { id, resonance }, ctx.json)
        }
        LedgerCommand::Synthesize => {
            let text = ledger.synthesize()?;
            output(&Reply { text }, ctx.json)
        }
        LedgerCommand::Clear => {
            ctx.require_curator("ledger clear")?;
            ledger.store().clear()?;
            output(&Cleared { cleared: true }, ctx.json)
        }
    }
}
