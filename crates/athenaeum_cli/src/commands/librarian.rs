//! ASK command - consult the librarian.

use anyhow::Result;
use clap::Args;

use super::ledger::Reply;
use super::{output, Context};

/// Arguments for the ask command.
#[derive(Args)]
pub struct AskArgs {
    /// The inquiry, e.g. "something on stoic resilience"
    #[arg(required = true, trailing_var_arg = true)]
    pub query: Vec<String>,
}

/// Execute the ask command.
pub fn execute(ctx: &Context<'_>, args: AskArgs) -> Result<()> {
    let query = args.query.join(" ");
    let text = ctx.archive().consult(&query)?;
    output(&Reply { text }, ctx.json)
}
