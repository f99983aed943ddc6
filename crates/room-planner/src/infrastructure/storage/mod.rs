//! Storage infrastructure: layout files and application settings.
//!
//! - `layout_file` reads and writes user-chosen layout documents (JSON).
//! - `settings` reads and writes the TOML settings file in the platform
//!   config directory, which also carries the autosave cache.
//! - `mock` provides an in-memory settings store for tests.
//!
//! All I/O here is blocking; layouts are small and every call is user-paced.
//! Both files are written to a hidden sibling first and then renamed over the
//! target, so an interrupted write leaves the previous file intact.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

pub mod layout_file;
pub mod mock;
pub mod settings;

/// `<dir>/.<file name>.tmp`, alongside the target so the rename stays on one
/// file system.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or(OsStr::new("file")));
    name.push(".tmp");
    path.with_file_name(name)
}
