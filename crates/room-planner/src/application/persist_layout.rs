//! Saving, loading and autosaving a [`LayoutSession`].
//!
//! # Two ways a layout reaches disk (for beginners)
//!
//! 1. **Layout files** – "Save Layout" / "Load Layout" write and read a JSON
//!    document at a path the user picks.  Loading is all-or-nothing: the file
//!    is parsed and validated completely before the session is touched, so a
//!    bad file leaves the current room exactly as it was.
//!
//! 2. **The autosave cache** – the same JSON document, stored as a string in
//!    the application settings (`cached_room`).  It is written whenever
//!    settings are applied and when the planner closes, and restored on the
//!    next start.  The cache is best effort: a missing or corrupt cache is
//!    logged and ignored, never reported to the user.
//!
//! Settings also carry the editor preferences (zoom, units, snap, border,
//! floor texture).  [`session_from_settings`] builds a session from them and
//! [`apply_settings`] / [`persist_session`] push session state back.

use std::path::Path;

use room_core::{
    decode_document, encode_document, LayoutDocument, LayoutError, Room, RoomLayout, ScaleTransform,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::edit_layout::LayoutSession;
use crate::infrastructure::storage::layout_file::{load_layout_file, save_layout_file, StoreError};
use crate::infrastructure::storage::settings::{
    AppSettings, SettingsError, SettingsStore, CANVAS_SCALE_RANGE,
};

/// Error returned when settings cannot be applied to a session or stored.
#[derive(Debug, Error)]
pub enum ApplySettingsError {
    #[error("invalid display setting: {0}")]
    Layout(#[from] LayoutError),

    #[error("could not store settings: {0}")]
    Settings(#[from] SettingsError),
}

// ── Layout files ──────────────────────────────────────────────────────────────

/// Writes the session's room, furniture and openings to `path`.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be written.
pub fn save_layout(session: &LayoutSession, path: &Path) -> Result<(), StoreError> {
    save_layout_file(path, &LayoutDocument::capture(session.layout()))
}

/// Replaces the session's contents with the layout stored at `path`.
///
/// Door state is reset and every item gets a fresh id.  On error the session
/// is unchanged.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be read and
/// [`StoreError::Document`] if it is malformed or invalid.
pub fn load_layout(session: &mut LayoutSession, path: &Path) -> Result<(), StoreError> {
    let doc = load_layout_file(path)?;
    let (room, furniture, openings) = doc.into_parts()?;
    session.replace_contents(room, furniture, openings);
    info!(path = %path.display(), items = session.layout().item_count(), "loaded layout");
    Ok(())
}

// ── Autosave cache ────────────────────────────────────────────────────────────

/// Encodes the session as an autosave blob.  Returns `None` (after logging)
/// if encoding fails.
pub fn cache_snapshot(session: &LayoutSession) -> Option<String> {
    match encode_document(&LayoutDocument::capture(session.layout())) {
        Ok(blob) => Some(blob),
        Err(e) => {
            warn!(error = %e, "could not encode autosave cache");
            None
        }
    }
}

/// Restores the session from an autosave blob.
///
/// Returns `true` if the blob was applied.  Any failure is logged and
/// swallowed, leaving the session unchanged.
pub fn restore_from_snapshot(session: &mut LayoutSession, blob: &str) -> bool {
    let parts = decode_document(blob).and_then(LayoutDocument::into_parts);
    match parts {
        Ok((room, furniture, openings)) => {
            session.replace_contents(room, furniture, openings);
            info!(items = session.layout().item_count(), "restored autosave cache");
            true
        }
        Err(e) => {
            warn!(error = %e, "ignoring unreadable autosave cache");
            false
        }
    }
}

// ── Settings ──────────────────────────────────────────────────────────────────

/// Accepts the outcome of reading the settings file, replacing an unreadable
/// file with defaults.
///
/// A settings file that fails to parse is logged and treated as absent, so a
/// damaged file (and the autosave cache inside it) never stops the planner
/// from starting.  The next save overwrites it.
///
/// # Errors
///
/// Returns every other [`SettingsError`] unchanged.
pub fn recover_settings(loaded: Result<AppSettings, SettingsError>) -> Result<AppSettings, SettingsError> {
    match loaded {
        Err(SettingsError::Parse(e)) => {
            warn!(error = %e, "ignoring unreadable settings file, using defaults");
            Ok(AppSettings::default())
        }
        other => other,
    }
}

/// Loads settings from `store` through [`recover_settings`].
///
/// # Errors
///
/// See [`recover_settings`].
pub fn load_settings_or_default(store: &dyn SettingsStore) -> Result<AppSettings, SettingsError> {
    recover_settings(store.load())
}

/// Builds a session from stored settings, then restores the autosave cache
/// when `use_cache` is set and a cache exists.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidScale`] if the canvas scale is not > 0.
pub fn session_from_settings(settings: &AppSettings, use_cache: bool) -> Result<LayoutSession, LayoutError> {
    let scale = ScaleTransform::new(f64::from(settings.display.canvas_scale))?;
    let mut room = Room::default();
    room.show_border = settings.room.show_border;
    room.floor_texture = settings.floor_texture();

    let mut session = LayoutSession::new(RoomLayout::new(room, scale, settings.room.snap_to_border));
    session.set_room_unit(settings.display.room_unit);
    session.set_furniture_unit(settings.display.furniture_unit);

    match (&settings.cached_room, use_cache) {
        (Some(blob), true) => {
            restore_from_snapshot(&mut session, blob);
        }
        (Some(_), false) => debug!("autosave cache present but disabled"),
        (None, _) => {}
    }
    Ok(session)
}

/// Applies edited settings to a running session, then stores them together
/// with a fresh autosave cache.
///
/// The settings are sanitised first.  The session picks up the zoom, units,
/// snap flag, border and floor texture.
///
/// # Errors
///
/// Returns [`ApplySettingsError::Layout`] if the scale is rejected (the
/// session is unchanged) and [`ApplySettingsError::Settings`] if storing fails.
pub fn apply_settings(
    session: &mut LayoutSession,
    mut settings: AppSettings,
    store: &dyn SettingsStore,
) -> Result<AppSettings, ApplySettingsError> {
    settings.sanitize();
    session.rescale(f64::from(settings.display.canvas_scale))?;
    session.set_room_unit(settings.display.room_unit);
    session.set_furniture_unit(settings.display.furniture_unit);
    session.set_snap_to_border(settings.room.snap_to_border);
    session.set_show_border(settings.room.show_border);
    session.set_floor_texture(settings.floor_texture());

    settings.cached_room = cache_snapshot(session);
    store.save(&settings)?;
    info!(scale = settings.display.canvas_scale, "applied settings");
    Ok(settings)
}

/// Copies the session's preferences and an autosave cache into `settings`
/// and stores them.  Used when the planner closes.
///
/// # Errors
///
/// Returns [`SettingsError`] if storing fails.
pub fn persist_session(
    session: &LayoutSession,
    settings: &mut AppSettings,
    store: &dyn SettingsStore,
) -> Result<(), SettingsError> {
    let layout = session.layout();
    let (lo, hi) = CANVAS_SCALE_RANGE;
    let scale = layout.scale().pixels_per_metre().round().clamp(f64::from(lo), f64::from(hi));
    // Clamped into a u32 range above.
    settings.display.canvas_scale = scale as u32;
    settings.display.room_unit = session.room_unit();
    settings.display.furniture_unit = session.furniture_unit();
    settings.room.snap_to_border = layout.snap_to_border();
    settings.room.show_border = layout.room().show_border;
    settings.room.floor_texture = layout.room().floor_texture.name().to_string();
    settings.cached_room = cache_snapshot(session);

    store.save(settings)?;
    debug!("persisted session to settings");
    Ok(())
}
