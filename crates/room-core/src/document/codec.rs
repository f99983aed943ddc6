//! JSON encoding and decoding of [`LayoutDocument`]s.
//!
//! Documents are UTF-8 JSON, pretty-printed with two-space indentation so
//! they stay human-editable.  Decoding is strict about shape and values but
//! lenient about omissions (see [`crate::document::schema`]).

use thiserror::Error;

use crate::document::schema::LayoutDocument;
use crate::domain::layout::LayoutError;

/// Errors produced while encoding or decoding a layout document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The text is not JSON, or does not have the document's shape.
    #[error("failed to parse layout document: {0}")]
    Parse(#[source] serde_json::Error),

    /// The document could not be serialized.
    #[error("failed to serialize layout document: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The document is well-formed but holds an impossible value.
    #[error("invalid layout document: {0}")]
    Invalid(#[from] LayoutError),

    /// A position or rotation of the named item is NaN or infinite.
    #[error("invalid layout document: non-finite position or rotation for {0:?}")]
    NonFinite(String),
}

/// Encodes `doc` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`DocumentError::Serialize`] if serialization fails (for example a
/// NaN coordinate, which JSON cannot represent).
pub fn encode_document(doc: &LayoutDocument) -> Result<String, DocumentError> {
    serde_json::to_string_pretty(doc).map_err(DocumentError::Serialize)
}

/// Parses and validates a layout document.
///
/// A successful result is guaranteed to convert with
/// [`LayoutDocument::into_parts`].
///
/// # Errors
///
/// Returns [`DocumentError::Parse`] for malformed JSON or a wrong shape, and
/// [`DocumentError::Invalid`] / [`DocumentError::NonFinite`] for bad values.
pub fn decode_document(text: &str) -> Result<LayoutDocument, DocumentError> {
    let doc: LayoutDocument = serde_json::from_str(text).map_err(DocumentError::Parse)?;
    doc.validate()?;
    Ok(doc)
}
