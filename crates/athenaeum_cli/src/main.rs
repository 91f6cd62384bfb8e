//! Terminal front end for the Athenaeum archive.
//!
//! Commands:
//! - books: browse the catalog, curate it with `--admin`
//! - ledger: read, post, and resonate with epiphanies
//! - ask: consult the librarian about the catalog
//! - watch: follow catalog changes made by other processes
//!
//! Configuration comes from `ATHENAEUM_*` environment variables; flags win.

mod commands;
mod gemini;

use anyhow::{Context, Result};
use athenaeum_core::db::open_db;
use athenaeum_core::{
    init_logging, AdminSession, CoreConfig, GenerativeModel, OfflineModel, SqliteSlotStore,
};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

use commands::{
    books::BooksArgs, ledger::LedgerArgs, librarian::AskArgs, watch::WatchArgs,
    Context as RunContext,
};

/// Athenaeum archive CLI
#[derive(Parser)]
#[command(name = "athenaeum")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Emit JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    /// SQLite database file (overrides ATHENAEUM_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files (overrides ATHENAEUM_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (overrides ATHENAEUM_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Act as curator; required for add, delete, and reset
    #[arg(long, global = true)]
    admin: bool,

    /// Gemini API key (overrides GEMINI_API_KEY / API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Poll interval for `watch`, in milliseconds
    #[arg(long, global = true)]
    poll_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse or curate the book catalog
    Books(BooksArgs),

    /// The community ledger of epiphanies
    Ledger(LedgerArgs),

    /// Ask the librarian for a recommendation
    Ask(AskArgs),

    /// Print catalog snapshots whenever they change
    Watch(WatchArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir
            .to_str()
            .context("log directory must be valid UTF-8")?;
        init_logging(&config.log_level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    info!(
        "event=cli_start module=cli status=ok db_path={}",
        config.db_path.display()
    );

    let model = build_model(config.api_key.as_deref());
    let session = if cli.admin {
        AdminSession::curator()
    } else {
        AdminSession::guest()
    };
    let ctx = RunContext {
        slots: SqliteSlotStore::new(&conn),
        model: model.as_ref(),
        session,
        json: cli.json,
    };

    match cli.command {
        Commands::Books(args) => commands::books::execute(&ctx, args),
        Commands::Ledger(args) => commands::ledger::execute(&ctx, args),
        Commands::Ask(args) => commands::librarian::execute(&ctx, args),
        Commands::Watch(args) => {
            commands::watch::execute(&ctx, &config.db_path, config.poll_interval, args)
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<CoreConfig> {
    let mut config = CoreConfig::from_env()?;
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(key) = &cli.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(millis) = cli.poll_ms {
        anyhow::ensure!(millis > 0, "--poll-ms must be positive");
        config.poll_interval = Duration::from_millis(millis);
    }
    Ok(config)
}

fn build_model(api_key: Option<&str>) -> Box<dyn GenerativeModel> {
    let Some(key) = api_key else {
        return Box::new(OfflineModel);
    };
    match gemini::GeminiModel::new(key) {
        Ok(model) => Box::new(model),
        Err(err) => {
            warn!("event=model_init module=cli status=error error={err}");
            Box::new(OfflineModel)
        }
    }
}
