//! # Rulefeed
//!
//! Serves the change history of filter rule lists as RSS feeds.

mod bootstrap;
mod di;
mod server;

use chrono::Utc;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use rulefeed_domain::{CliOverrides, DiffRecord};
use std::sync::Arc;
use tracing::info;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "rulefeed")]
#[command(version)]
#[command(about = "Change-log RSS feeds for filter rule lists")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Web server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// SQLite database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Disable every cache layer
    #[arg(long)]
    no_cache: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Append a crawled diff, dated now, to a rule list's history and exit
    Record {
        /// Rule list name
        name: String,

        /// Rule that appeared since the previous snapshot (repeatable)
        #[arg(long = "added")]
        added: Vec<String>,

        /// Rule that disappeared since the previous snapshot (repeatable)
        #[arg(long = "removed")]
        removed: Vec<String>,
    },
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            bind_address: self.bind.clone(),
            web_port: self.port,
            database_path: self.database.clone(),
            log_level: self.log_level.clone(),
            disable_cache: self.no_cache,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);

    info!(version = env!("CARGO_PKG_VERSION"), "Rulefeed starting");

    let pool = bootstrap::init_database(&config.database).await?;
    let repos = di::Repositories::new(pool);
    let caches = di::Caches::new(&config);
    let use_cases = di::UseCases::new(&config, &repos, &caches);

    if let Some(Command::Record {
        name,
        added,
        removed,
    }) = cli.command
    {
        let diff = DiffRecord::new(Utc::now(), added, removed);
        let list = use_cases.record_diff.execute(&name, &diff).await?;
        info!(name = %list.name, revision = list.revision, "Record complete");
        return Ok(());
    }

    server::spawn_cache_janitor(Arc::clone(&caches.store));

    let state = use_cases.into_app_state(&config, &caches);
    server::start_web_server(&config.server, state).await
}
