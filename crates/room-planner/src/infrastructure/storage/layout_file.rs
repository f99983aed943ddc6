//! Layout files chosen by the user ("Save Layout" / "Load Layout").
//!
//! A layout file holds one JSON [`LayoutDocument`].  Writes go to a sibling
//! temporary file which is then renamed over the target, so an interrupted
//! save leaves the previous file intact.

use std::path::{Path, PathBuf};

use room_core::{decode_document, encode_document, DocumentError, LayoutDocument};
use thiserror::Error;
use tracing::{debug, info};

use super::temp_path;

/// Error type for layout file operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be read, written or renamed.
    #[error("I/O error accessing layout at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a valid layout document.
    #[error("invalid layout document: {0}")]
    Document(#[from] DocumentError),
}

/// Writes `doc` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the temporary file cannot be written or
/// renamed, and [`StoreError::Document`] if encoding fails.
pub fn save_layout_file(path: &Path, doc: &LayoutDocument) -> Result<(), StoreError> {
    let text = encode_document(doc)?;
    let tmp = temp_path(path);

    std::fs::write(&tmp, text).map_err(|source| StoreError::Io {
        path: tmp.clone(),
        source,
    })?;
    if let Err(source) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    info!(
        path = %path.display(),
        furniture = doc.furniture.len(),
        openings = doc.openings.len(),
        "saved layout"
    );
    Ok(())
}

/// Reads and validates the layout document at `path`.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be read and
/// [`StoreError::Document`] if it is malformed or fails validation.
pub fn load_layout_file(path: &Path) -> Result<LayoutDocument, StoreError> {
    let text = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = decode_document(&text)?;
    debug!(path = %path.display(), "read layout document");
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use room_core::RoomLayout;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("room_planner_layout_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_save_then_load_returns_same_document() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join("den.json");
        let doc = LayoutDocument::capture(&RoomLayout::default());

        // Act
        save_layout_file(&path, &doc).unwrap();
        let loaded = load_layout_file(&path).unwrap();

        // Assert
        assert_eq!(loaded.room.name, doc.room.name);
        assert!((loaded.room.width_m - doc.room.width_m).abs() < 1e-9);
        assert!(!temp_path(&path).exists(), "temporary file must be renamed away");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = temp_dir();
        let path = dir.join("layout.json");
        std::fs::write(&path, "old contents").unwrap();

        save_layout_file(&path, &LayoutDocument::default()).unwrap();

        assert!(load_layout_file(&path).is_ok());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = temp_dir();
        let err = load_layout_file(&dir.join("missing.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_malformed_file_is_document_error() {
        let dir = temp_dir();
        let path = dir.join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_layout_file(&path).unwrap_err();

        assert!(matches!(err, StoreError::Document(DocumentError::Parse(_))));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_into_missing_directory_is_io_error() {
        let dir = temp_dir();
        let path = dir.join("no_such_dir").join("layout.json");
        let err = save_layout_file(&path, &LayoutDocument::default()).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
