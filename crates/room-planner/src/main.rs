//! Room Planner: headless entry point.
//!
//! Runs one editing session without a window: restores the last layout from
//! the autosave cache, optionally imports or exports a layout file, prints the
//! room and its item list, and writes settings plus a fresh autosave cache on
//! exit.  A graphical front end drives the same `LayoutSession` commands.
//!
//! # Usage
//!
//! ```text
//! room-planner [OPTIONS]
//!
//! Options:
//!   --config-dir <DIR>   Directory holding settings.toml [env: ROOM_PLANNER_CONFIG_DIR]
//!   --open <FILE>        Load a layout file into the session
//!   --save <FILE>        Save the session to a layout file before exiting
//!   --new-room           Discard all items (room size and name are kept)
//!   --scale <PX>         Canvas zoom in pixels per metre
//!   --no-cache           Do not restore the autosave cache
//! ```
//!
//! Steps run in the order listed: cache restore, `--new-room`, `--open`,
//! `--scale`, `--save`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use room_planner::application::edit_layout::LayoutSession;
use room_planner::application::persist_layout::{
    load_layout, persist_session, recover_settings, save_layout, session_from_settings,
};
use room_planner::infrastructure::storage::settings::{SettingsStore, TomlSettingsStore};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Room Planner.
///
/// Lays out furniture, doors and windows in a rectangular room.
#[derive(Debug, Parser)]
#[command(name = "room-planner", about = "Plan furniture in a room", version)]
struct Cli {
    /// Directory holding `settings.toml` (defaults to the platform config dir).
    #[arg(long, env = "ROOM_PLANNER_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Layout file to load.
    #[arg(long, value_name = "FILE")]
    open: Option<PathBuf>,

    /// Layout file to write before exiting.
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Start from an empty room.
    #[arg(long)]
    new_room: bool,

    /// Canvas zoom in display pixels per metre.
    #[arg(long, value_name = "PX")]
    scale: Option<f64>,

    /// Skip restoring the autosave cache.
    #[arg(long)]
    no_cache: bool,
}

impl Cli {
    fn settings_store(&self) -> anyhow::Result<TomlSettingsStore> {
        match &self.config_dir {
            Some(dir) => Ok(TomlSettingsStore::in_dir(dir)),
            None => TomlSettingsStore::platform_default().context("locating config directory"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let store = cli.settings_store()?;
    let loaded = store.load();

    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `RUST_LOG` wins; otherwise the level stored in settings is used.
    let log_level = match &loaded {
        Ok(settings) => settings.general.log_level.clone(),
        Err(_) => "info".to_string(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    info!(settings = %store.path().display(), "room planner starting");
    let mut settings = recover_settings(loaded)
        .with_context(|| format!("loading settings from {}", store.path().display()))?;

    let mut session = session_from_settings(&settings, !cli.no_cache)
        .context("building session from settings")?;

    if cli.new_room {
        session.new_room();
    }
    if let Some(path) = &cli.open {
        load_layout(&mut session, path)
            .with_context(|| format!("loading layout {}", path.display()))?;
    }
    if let Some(px) = cli.scale {
        session.rescale(px).context("applying --scale")?;
    }

    print_summary(&session);

    if let Some(path) = &cli.save {
        save_layout(&session, path)
            .with_context(|| format!("saving layout {}", path.display()))?;
    }

    persist_session(&session, &mut settings, &store).context("saving settings")?;
    info!("room planner finished");
    Ok(())
}

fn print_summary(session: &LayoutSession) {
    let layout = session.layout();
    let room = layout.room();
    let unit = session.room_unit();
    println!(
        "{}: {} × {} ({} floor)",
        room.display_name(),
        unit.format(room.width_m()),
        unit.format(room.depth_m()),
        room.floor_texture,
    );
    for entry in session.list_entries() {
        println!("  {}", entry.label);
    }
}
