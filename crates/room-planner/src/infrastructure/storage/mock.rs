//! In-memory settings store for unit testing.
//!
//! Lets tests exercise the autosave and settings-apply paths without touching
//! the real platform config directory.

use std::sync::{Arc, Mutex, MutexGuard};

use super::settings::{AppSettings, SettingsError, SettingsStore};

/// A [`SettingsStore`] that keeps the settings in memory and counts saves.
///
/// Clones share the same underlying state, so a test can hand one clone to
/// the code under test and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    settings: AppSettings,
    save_count: u32,
    fail_saves: bool,
}

impl MemorySettingsStore {
    /// Creates a store holding default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `settings`.
    pub fn with_settings(settings: AppSettings) -> Self {
        let store = Self::default();
        store.lock().settings = settings;
        store
    }

    /// Returns a copy of the currently stored settings.
    pub fn snapshot(&self) -> AppSettings {
        self.lock().settings.clone()
    }

    /// Number of successful [`SettingsStore::save`] calls.
    pub fn save_count(&self) -> u32 {
        self.lock().save_count
    }

    /// Makes every subsequent save fail with an I/O error.
    pub fn fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panicking test thread cannot leave `State` half-written.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<AppSettings, SettingsError> {
        Ok(self.snapshot())
    }

    fn save(&self, settings: &AppSettings) -> Result<(), SettingsError> {
        let mut state = self.lock();
        if state.fail_saves {
            return Err(SettingsError::Io {
                path: "memory".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "saves disabled"),
            });
        }
        state.settings = settings.clone();
        state.save_count += 1;
        Ok(())
    }
}
