//! Glyph set envelope files (JSON).

use std::fs;
use std::path::Path;

use crate::{GlyphSet, Result, SerializedGlyphSet};

/// File extension used for set envelope files.
pub const SET_FILE_EXTENSION: &str = "json";

/// Write a set as a pretty-printed JSON envelope.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written, or a JSON error on
/// serialization failure.
pub fn save_set_file(path: &Path, set: &GlyphSet) -> Result<()> {
    let envelope = set.to_serialized()?;
    fs::write(path, envelope.to_json_pretty()?)?;
    Ok(())
}

/// Read a JSON envelope back into a glyph set.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, a JSON error for a
/// malformed envelope, or [`crate::EngineError::MalformedEncoding`] for
/// invalid base64 payload data.
pub fn load_set_file(path: &Path) -> Result<GlyphSet> {
    let json = fs::read_to_string(path)?;
    SerializedGlyphSet::from_json(&json)?.to_glyph_set()
}
