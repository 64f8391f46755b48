pub mod admin;
pub mod catalog;
mod cli;
pub mod commands;
pub mod db;
pub mod ledger;
pub mod settings;
pub mod timer;
mod utils;

use std::{
    path::Path,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;

use catalog::Catalog;
use commands::Tab;
use db::Database;
use ledger::{Ledger, MemberStore, MemoryStore};
use settings::SettingsStore;
use timer::TimerController;

/// Everything the shell renders from, owned in one place and handed to
/// the command functions by reference.
pub struct AppState {
    pub(crate) timer: TimerController,
    pub(crate) ledger: Ledger,
    pub(crate) catalog: Catalog,
    pub(crate) settings: SettingsStore,
    active_tab: Mutex<Tab>,
}

impl AppState {
    /// Members in `<data_dir>/lovegrounds.sqlite3`, preferences in
    /// `<data_dir>/settings.json`.
    pub async fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let database = Database::new(data_dir.join("lovegrounds.sqlite3"))?;
        let settings = SettingsStore::new(data_dir.join("settings.json"))?;
        let ledger = Ledger::open(Arc::new(database)).await?;

        Ok(Self::assemble(ledger, settings))
    }

    /// Nothing is written to disk; members vanish with the process.
    pub fn in_memory() -> Self {
        let store: Arc<dyn MemberStore> = Arc::new(MemoryStore::new());
        Self::assemble(Ledger::new(store), SettingsStore::in_memory())
    }

    fn assemble(ledger: Ledger, settings: SettingsStore) -> Self {
        let timer = TimerController::new(tick_interval(&settings));
        Self {
            timer,
            ledger,
            catalog: Catalog::default(),
            settings,
            active_tab: Mutex::new(Tab::default()),
        }
    }

    pub fn active_tab(&self) -> Tab {
        *self
            .active_tab
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn set_active_tab(&self, tab: Tab) {
        *self
            .active_tab
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = tab;
    }
}

fn tick_interval(settings: &SettingsStore) -> Duration {
    let debug_mode = std::env::var("LOVEGROUNDS_DEBUG")
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if debug_mode {
        Duration::from_secs(1)
    } else {
        settings.tick_interval()
    }
}

pub fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = cli::Cli::parse();

    log::info!("Love Grounds starting up...");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(cli::execute(args))
}
