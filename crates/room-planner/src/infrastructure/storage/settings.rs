//! TOML-based persistence of the application settings.
//!
//! Reads and writes `AppSettings` to the platform-appropriate settings file:
//! - Windows:  `%APPDATA%\RoomPlanner\settings.toml`
//! - Linux:    `~/.config/roomplanner/settings.toml`
//! - macOS:    `~/Library/Application Support/RoomPlanner/settings.toml`
//!
//! # What is stored here? (for beginners)
//!
//! Two kinds of data live in this one file:
//!
//! 1. **Preferences** – theme, font size, canvas zoom, display units and the
//!    room defaults (border, floor texture, snap-to-border).  Theme and font
//!    size belong to the presentation layer: they are stored, sanitised and
//!    passed through unchanged, but nothing in the editing session reads them.
//! 2. **The autosave cache** – the most recent layout, encoded as the same
//!    JSON document that "Save Layout" writes, stored as a plain string in
//!    `cached_room`.  On the next start the planner restores it, so closing
//!    the window never loses work.
//!
//! ```toml
//! cached_room = '{"room": {"name": "Den", ...}, "furniture": [...]}'
//!
//! [general]
//! version = "1.0"
//! log_level = "info"
//!
//! [display]
//! theme = "Dark"
//! font_size = 12
//! canvas_scale = 80
//! room_unit = "ft"
//! furniture_unit = "in"
//!
//! [room]
//! show_border = true
//! floor_texture = "Hardwood"
//! snap_to_border = false
//! ```
//!
//! # Serde default values
//!
//! Every field carries `#[serde(default = "some_fn")]`, so a missing file, a
//! missing section or a missing key all fall back to the defaults.  Numbers
//! that are present but out of range are clamped by [`AppSettings::sanitize`]
//! rather than rejected.

use std::path::{Path, PathBuf};

use room_core::{FloorTexture, LinearUnit};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::temp_path;

/// Smallest and largest font size offered by the settings dialog.
pub const FONT_SIZE_RANGE: (u8, u8) = (8, 24);
/// Zoom slider range, in display pixels per metre.
pub const CANVAS_SCALE_RANGE: (u32, u32) = (30, 120);

/// File name of the settings file inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings could not be serialized to TOML.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Settings schema types ─────────────────────────────────────────────────────

/// Colour scheme of the planner window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
    /// Dark chrome around a light canvas.
    Mixed,
}

/// Top-level settings stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    /// Autosave blob: the last layout as a JSON document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_room: Option<String>,
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub room: RoomSettings,
}

/// Schema version and logging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    /// Schema version string – bump when breaking changes are introduced.
    #[serde(default = "default_version")]
    pub version: String,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Appearance and display units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplaySettings {
    #[serde(default)]
    pub theme: Theme,
    /// UI font size in points, within [`FONT_SIZE_RANGE`].
    #[serde(default = "default_font_size")]
    pub font_size: u8,
    /// Canvas zoom in display pixels per metre, within [`CANVAS_SCALE_RANGE`].
    #[serde(default = "default_canvas_scale")]
    pub canvas_scale: u32,
    /// Unit used to show and enter room dimensions.
    #[serde(default = "default_room_unit")]
    pub room_unit: LinearUnit,
    /// Unit used to show and enter furniture dimensions.
    #[serde(default = "default_furniture_unit")]
    pub furniture_unit: LinearUnit,
}

/// Defaults applied to a fresh room, and the snap-to-border switch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomSettings {
    #[serde(default = "default_true")]
    pub show_border: bool,
    /// Floor texture name; unknown names resolve to `None`.
    #[serde(default = "default_floor_texture")]
    pub floor_texture: String,
    #[serde(default)]
    pub snap_to_border: bool,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_version() -> String {
    "1.0".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_font_size() -> u8 {
    11
}
fn default_canvas_scale() -> u32 {
    60
}
fn default_room_unit() -> LinearUnit {
    LinearUnit::Foot
}
fn default_furniture_unit() -> LinearUnit {
    LinearUnit::Inch
}
fn default_true() -> bool {
    true
}
fn default_floor_texture() -> String {
    FloorTexture::None.name().to_string()
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            log_level: default_log_level(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font_size: default_font_size(),
            canvas_scale: default_canvas_scale(),
            room_unit: default_room_unit(),
            furniture_unit: default_furniture_unit(),
        }
    }
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            show_border: default_true(),
            floor_texture: default_floor_texture(),
            snap_to_border: false,
        }
    }
}

impl AppSettings {
    /// Clamps numeric settings into their supported ranges, logging each
    /// adjustment.
    pub fn sanitize(&mut self) {
        let (lo, hi) = FONT_SIZE_RANGE;
        let font = self.display.font_size.clamp(lo, hi);
        if font != self.display.font_size {
            warn!(from = self.display.font_size, to = font, "font_size out of range, clamped");
            self.display.font_size = font;
        }

        let (lo, hi) = CANVAS_SCALE_RANGE;
        let scale = self.display.canvas_scale.clamp(lo, hi);
        if scale != self.display.canvas_scale {
            warn!(from = self.display.canvas_scale, to = scale, "canvas_scale out of range, clamped");
            self.display.canvas_scale = scale;
        }
    }

    /// The configured floor texture, falling back to `None` for unknown names.
    pub fn floor_texture(&self) -> FloorTexture {
        FloorTexture::from_name(&self.room.floor_texture).unwrap_or_else(|| {
            warn!(texture = %self.room.floor_texture, "unknown floor texture in settings");
            FloorTexture::None
        })
    }
}

// ── Settings file access ──────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the settings file.
///
/// # Errors
///
/// Returns [`SettingsError::NoPlatformConfigDir`] when the platform config
/// base directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, SettingsError> {
    platform_config_dir().ok_or(SettingsError::NoPlatformConfigDir)
}

/// Full path of the settings file inside `dir`.
pub fn settings_file_path(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_FILE_NAME)
}

/// Loads `AppSettings` from `path`, returning defaults if the file does not
/// yet exist.  Out-of-range values are clamped.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system errors other than "not
/// found", and [`SettingsError::Parse`] if the TOML is malformed.
pub fn load_settings_from(path: &Path) -> Result<AppSettings, SettingsError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let mut settings: AppSettings = toml::from_str(&content)?;
            settings.sanitize();
            debug!(path = %path.display(), "loaded settings");
            Ok(settings)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no settings file, using defaults");
            Ok(AppSettings::default())
        }
        Err(e) => Err(SettingsError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `settings` to `path`, creating the parent directory if needed.
///
/// The file is written to a hidden sibling and renamed into place, so an
/// interrupted save keeps the previous settings and autosave cache.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system failures or
/// [`SettingsError::Serialize`] if serialization fails.
pub fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<(), SettingsError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| SettingsError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(settings)?;
    let tmp = temp_path(path);
    std::fs::write(&tmp, content).map_err(|source| SettingsError::Io {
        path: tmp.clone(),
        source,
    })?;
    if let Err(source) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(SettingsError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    debug!(path = %path.display(), "saved settings");
    Ok(())
}

/// Resolves the platform config directory including the `RoomPlanner` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("RoomPlanner"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("roomplanner"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("RoomPlanner")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Settings store abstraction ────────────────────────────────────────────────

/// Where the application reads and writes its settings.
///
/// The application layer depends on this trait so tests can substitute
/// [`super::mock::MemorySettingsStore`] for the real file.
pub trait SettingsStore {
    /// Loads the current settings (defaults if none are stored yet).
    fn load(&self) -> Result<AppSettings, SettingsError>;

    /// Replaces the stored settings.
    fn save(&self, settings: &AppSettings) -> Result<(), SettingsError>;
}

/// Settings kept in a TOML file.
#[derive(Debug, Clone)]
pub struct TomlSettingsStore {
    path: PathBuf,
}

impl TomlSettingsStore {
    /// A store backed by `settings.toml` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: settings_file_path(dir.as_ref()),
        }
    }

    /// A store in the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NoPlatformConfigDir`] if the directory cannot
    /// be determined.
    pub fn platform_default() -> Result<Self, SettingsError> {
        Ok(Self::in_dir(config_dir()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for TomlSettingsStore {
    fn load(&self) -> Result<AppSettings, SettingsError> {
        load_settings_from(&self.path)
    }

    fn save(&self, settings: &AppSettings) -> Result<(), SettingsError> {
        save_settings_to(&self.path, settings)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
