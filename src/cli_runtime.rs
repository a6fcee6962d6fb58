use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lectern::app::App;
use lectern::store::LocalStore;

use crate::Commands;

#[derive(Parser)]
#[command(name = "lectern")]
#[command(about = "Lectern e-learning client", long_about = None)]
pub(crate) struct Cli {
    /// State directory holding config.json and state.json (default ~/.lectern)
    #[arg(long, env = "LECTERN_HOME", global = true)]
    state_dir: Option<PathBuf>,

    /// Override the API base URL from config.json
    #[arg(long, env = "LECTERN_API_URL", global = true)]
    api_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Resolved global options handed to every command.
pub(crate) struct Globals {
    pub(crate) store: LocalStore,
    pub(crate) api_url: Option<String>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    lectern::logging::init(cli.verbose);

    let root = LocalStore::default_root(cli.state_dir)?;
    let store = LocalStore::open(&root).context("open state directory")?;
    let globals = Globals {
        store,
        api_url: cli.api_url,
    };
    crate::cli_exec::handle_command(&globals, cli.command)
}

/// Starts the client: reads config, applies overrides and restores the
/// persisted session.
pub(crate) fn open_app(globals: &Globals) -> Result<App<LocalStore>> {
    let mut cfg = globals.store.read_config()?;
    if let Some(url) = &globals.api_url {
        cfg.base_url = url.trim_end_matches('/').to_string();
    }
    App::start(&cfg, globals.store.clone())
}
