//! Historical character generator catalog.
//!
//! Chip presets carry the authoritative binary geometry of a character
//! generator ROM; system presets reference chips or override the geometry
//! directly. Resolution follows the fallback chain
//! `system override -> chip default -> global default`.
//!
//! The catalog is read-only static data; there is no runtime mutation.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::{BitOrder, BitPadding, EngineError, GlyphSetConfig, Result};

/// One character generator chip and its ROM geometry.
#[derive(Debug, Clone, Copy)]
pub struct ChipPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub manufacturer: &'static str,
    pub config: GlyphSetConfig,
    pub glyph_count: usize,
}

/// How a system describes its character ROM: an explicit geometry, or a
/// reference to the chips it shipped with.
#[derive(Debug, Clone, Copy)]
pub enum CharacterRomSpec {
    Direct { config: GlyphSetConfig, glyph_count: usize },
    Reference { chip_ids: &'static [&'static str] },
}

/// A home computer or terminal and its character ROM source.
#[derive(Debug, Clone, Copy)]
pub struct SystemPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub manufacturer: &'static str,
    pub spec: CharacterRomSpec,
}

const fn msb_right(width: usize, height: usize) -> GlyphSetConfig {
    GlyphSetConfig {
        width,
        height,
        bit_order: BitOrder::Msb,
        padding: BitPadding::Right,
        byte_order: None,
    }
}

const fn msb_left(width: usize, height: usize) -> GlyphSetConfig {
    GlyphSetConfig {
        width,
        height,
        bit_order: BitOrder::Msb,
        padding: BitPadding::Left,
        byte_order: None,
    }
}

pub const CHIP_PRESETS: &[ChipPreset] = &[
    ChipPreset {
        id: "mos901225",
        name: "901225-01 character ROM",
        manufacturer: "MOS Technology",
        config: msb_right(8, 8),
        glyph_count: 512,
    },
    ChipPreset {
        id: "signetics2513",
        name: "2513 character generator",
        manufacturer: "Signetics",
        config: msb_left(5, 8),
        glyph_count: 64,
    },
    ChipPreset {
        id: "mc6847",
        name: "MC6847 VDG internal ROM",
        manufacturer: "Motorola",
        config: msb_right(5, 7),
        glyph_count: 64,
    },
    ChipPreset {
        id: "saa5050",
        name: "SAA5050 teletext generator",
        manufacturer: "Mullard",
        config: msb_left(5, 9),
        glyph_count: 96,
    },
    ChipPreset {
        id: "hd44780",
        name: "HD44780 CGROM",
        manufacturer: "Hitachi",
        config: msb_left(5, 8),
        glyph_count: 208,
    },
    ChipPreset {
        id: "ibm_cga",
        name: "CGA character ROM (8x8 bank)",
        manufacturer: "IBM",
        config: msb_right(8, 8),
        glyph_count: 256,
    },
    ChipPreset {
        id: "ibm_mda",
        name: "MDA character ROM",
        manufacturer: "IBM",
        config: msb_right(8, 14),
        glyph_count: 256,
    },
    ChipPreset {
        id: "atari_cgrom",
        name: "400/800 character set ROM",
        manufacturer: "Atari",
        config: msb_right(8, 8),
        glyph_count: 128,
    },
];

pub const SYSTEM_PRESETS: &[SystemPreset] = &[
    SystemPreset {
        id: "c64",
        name: "Commodore 64",
        manufacturer: "Commodore",
        spec: CharacterRomSpec::Reference { chip_ids: &["mos901225"] },
    },
    SystemPreset {
        id: "vic20",
        name: "VIC-20",
        manufacturer: "Commodore",
        spec: CharacterRomSpec::Reference { chip_ids: &["mos901225"] },
    },
    SystemPreset {
        id: "apple2",
        name: "Apple II",
        manufacturer: "Apple",
        spec: CharacterRomSpec::Reference { chip_ids: &["signetics2513"] },
    },
    SystemPreset {
        id: "coco",
        name: "TRS-80 Color Computer",
        manufacturer: "Tandy",
        spec: CharacterRomSpec::Reference { chip_ids: &["mc6847"] },
    },
    SystemPreset {
        id: "zx_spectrum",
        name: "ZX Spectrum",
        manufacturer: "Sinclair",
        // font lives inside the system ROM, not a dedicated chip
        spec: CharacterRomSpec::Direct {
            config: msb_right(8, 8),
            glyph_count: 96,
        },
    },
    SystemPreset {
        id: "ibm_pc_cga",
        name: "IBM PC (CGA)",
        manufacturer: "IBM",
        spec: CharacterRomSpec::Reference { chip_ids: &["ibm_cga"] },
    },
    SystemPreset {
        id: "ibm_pc_mda",
        name: "IBM PC (MDA)",
        manufacturer: "IBM",
        spec: CharacterRomSpec::Reference { chip_ids: &["ibm_mda"] },
    },
    SystemPreset {
        id: "atari800",
        name: "Atari 400/800",
        manufacturer: "Atari",
        spec: CharacterRomSpec::Reference { chip_ids: &["atari_cgrom"] },
    },
    SystemPreset {
        id: "bbc_micro_teletext",
        name: "BBC Micro (mode 7)",
        manufacturer: "Acorn",
        spec: CharacterRomSpec::Reference { chip_ids: &["saa5050"] },
    },
];

lazy_static! {
    /// Chip presets indexed by id
    pub static ref CHIP_MAP: HashMap<&'static str, &'static ChipPreset> = CHIP_PRESETS.iter().map(|chip| (chip.id, chip)).collect();

    /// System presets indexed by id
    pub static ref SYSTEM_MAP: HashMap<&'static str, &'static SystemPreset> = SYSTEM_PRESETS.iter().map(|system| (system.id, system)).collect();
}

/// Look up a chip preset by id.
pub fn chip_preset(id: &str) -> Option<&'static ChipPreset> {
    CHIP_MAP.get(id).copied()
}

/// Look up a system preset by id.
pub fn system_preset(id: &str) -> Option<&'static SystemPreset> {
    SYSTEM_MAP.get(id).copied()
}

/// Resolve the binary geometry and glyph count for a chip.
///
/// # Errors
///
/// Returns [`EngineError::UnknownChip`] if `id` is not in the catalog.
pub fn resolve_chip_config(id: &str) -> Result<(GlyphSetConfig, usize)> {
    let Some(chip) = chip_preset(id) else {
        return Err(EngineError::UnknownChip { id: id.to_string() });
    };
    Ok((chip.config, chip.glyph_count))
}

/// Resolve the binary geometry and glyph count for a system.
///
/// A direct spec wins; otherwise the first known referenced chip supplies
/// its default; a reference to no known chip falls back to the global
/// default geometry.
///
/// # Errors
///
/// Returns [`EngineError::UnknownSystem`] if `id` is not in the catalog.
pub fn resolve_system_config(id: &str) -> Result<(GlyphSetConfig, usize)> {
    let Some(system) = system_preset(id) else {
        return Err(EngineError::UnknownSystem { id: id.to_string() });
    };
    Ok(match system.spec {
        CharacterRomSpec::Direct { config, glyph_count } => (config, glyph_count),
        CharacterRomSpec::Reference { chip_ids } => match chip_ids.iter().find_map(|chip_id| chip_preset(chip_id)) {
            Some(chip) => (chip.config, chip.glyph_count),
            None => {
                log::warn!("system '{id}' references no known chip, using the default geometry");
                (GlyphSetConfig::default(), 256)
            }
        },
    })
}
