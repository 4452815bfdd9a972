//! Raw character ROM dump files.
//!
//! A ROM dump is the flat concatenation of `height * ceil(width / 8)`
//! bytes per glyph, in glyph order, with no header. The geometry cannot be
//! recovered from the file itself; callers supply it (or resolve it from a
//! preset).

use std::fs;
use std::path::Path;

use crate::{GlyphSet, GlyphSetConfig, Result};

/// Raw ROM dump file extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RomFileFormat {
    /// Generic binary dump, `.bin`
    Bin,
    /// EPROM/mask ROM image, `.rom`
    Rom,
    /// Character generator dump, `.chr`
    Chr,
}

impl RomFileFormat {
    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Bin => "bin",
            Self::Rom => "rom",
            Self::Chr => "chr",
        }
    }

    /// Try to detect the format from a file extension.
    ///
    /// Accepts extensions with or without leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_lowercase();
        match ext.as_str() {
            "bin" => Some(Self::Bin),
            "rom" => Some(Self::Rom),
            "chr" => Some(Self::Chr),
            _ => None,
        }
    }

    /// Try to detect the format from a file path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension().and_then(|ext| ext.to_str()).and_then(Self::from_extension)
    }

    /// Check if a file extension matches a ROM dump format.
    pub fn is_rom_extension(ext: &str) -> bool {
        Self::from_extension(ext).is_some()
    }
}

/// Load a ROM dump under the given geometry.
///
/// Trailing bytes that do not fill a glyph are dropped (arbitrary dumps
/// often carry junk at the end); the set's metadata records the file name
/// as its source.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or
/// [`crate::EngineError::InvalidConfig`] for zero-sized dimensions.
pub fn load_rom_file(path: &Path, config: GlyphSetConfig) -> Result<GlyphSet> {
    let bytes = fs::read(path)?;
    let mut set = GlyphSet::from_rom_bytes(&bytes, config)?;
    if let Some(stem) = path.file_stem() {
        set.metadata.name = stem.to_string_lossy().to_string();
    }
    set.metadata.source = path.to_string_lossy().to_string();
    Ok(set)
}

/// Write a set as a ROM dump.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written, or
/// [`crate::EngineError::InvalidConfig`] for zero-sized dimensions.
pub fn save_rom_file(path: &Path, set: &GlyphSet) -> Result<()> {
    fs::write(path, set.to_rom_bytes()?)?;
    Ok(())
}
