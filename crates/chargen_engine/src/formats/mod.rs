//! File format layer: raw ROM dumps and set envelope files.

use std::path::Path;

use crate::{EngineError, GlyphSet, GlyphSetConfig, Result};

mod rom_file;
pub use rom_file::*;

mod set_file;
pub use set_file::*;

/// Load a glyph set from a path, dispatching on the extension.
///
/// JSON envelopes carry their own geometry; ROM dumps use the supplied
/// `config`.
///
/// # Errors
///
/// Returns [`EngineError::UnsupportedFormat`] for an unrecognized
/// extension, plus whatever the underlying loader reports.
pub fn load_from(path: &Path, config: GlyphSetConfig) -> Result<GlyphSet> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    if extension.eq_ignore_ascii_case(SET_FILE_EXTENSION) {
        return load_set_file(path);
    }
    if RomFileFormat::from_extension(extension).is_some() {
        return load_rom_file(path, config);
    }
    Err(EngineError::unsupported_format(format!("cannot load '{}'", path.display())))
}

/// Save a glyph set to a path, dispatching on the extension.
///
/// # Errors
///
/// Returns [`EngineError::UnsupportedFormat`] for an unrecognized
/// extension, plus whatever the underlying writer reports.
pub fn save_as(path: &Path, set: &GlyphSet) -> Result<()> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    if extension.eq_ignore_ascii_case(SET_FILE_EXTENSION) {
        return save_set_file(path, set);
    }
    if RomFileFormat::from_extension(extension).is_some() {
        return save_rom_file(path, set);
    }
    Err(EngineError::unsupported_format(format!("cannot save '{}'", path.display())))
}
