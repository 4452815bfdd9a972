//! Glyph set geometry configuration and bit layout resolution.
//!
//! `GlyphSetConfig` describes how a glyph's pixel rows map onto packed ROM
//! bytes. [`GlyphSetConfig::bit_position`] is the single place the layout
//! math lives; the encode and decode paths both go through it, which keeps
//! them symmetric by construction.

use serde::{Deserialize, Serialize};

use crate::{EngineError, Result};

/// Which end of a row's byte group holds the leftmost pixel.
///
/// `Msb` means the leftmost pixel occupies the highest-order unused bit;
/// `Lsb` is the mirror image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BitOrder {
    #[default]
    Msb,
    Lsb,
}

/// Which side of a row's last byte the unused bits occupy, when the glyph
/// width is not a multiple of 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BitPadding {
    Left,
    #[default]
    Right,
}

/// For rows spanning more than one byte (`width > 8`), whether the first
/// byte holds the most significant bit group.
///
/// `Little` mirrors the byte index within each row. No reference ROM dump
/// with `width > 8` was available to verify `Little` against real
/// hardware; `Big` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ByteOrder {
    #[default]
    Big,
    Little,
}

/// Binary geometry of one glyph set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphSetConfig {
    /// Glyph width in pixels
    pub width: usize,
    /// Glyph height in pixels
    pub height: usize,
    #[serde(default)]
    pub bit_order: BitOrder,
    #[serde(default)]
    pub padding: BitPadding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_order: Option<ByteOrder>,
}

impl Default for GlyphSetConfig {
    fn default() -> Self {
        GlyphSetConfig::new(8, 8)
    }
}

impl GlyphSetConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bit_order: BitOrder::default(),
            padding: BitPadding::default(),
            byte_order: None,
        }
    }

    /// Reject zero-sized glyph dimensions.
    ///
    /// Every codec entry point calls this once up front, so the inner
    /// encode/decode loops never have to deal with degenerate geometry.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(EngineError::invalid_config("width", self.width));
        }
        if self.height == 0 {
            return Err(EngineError::invalid_config("height", self.height));
        }
        Ok(())
    }

    /// Number of bytes occupied by one pixel row.
    pub fn bytes_per_row(&self) -> usize {
        (self.width + 7) / 8
    }

    /// Number of bytes occupied by one full glyph.
    pub fn bytes_per_glyph(&self) -> usize {
        self.height * self.bytes_per_row()
    }

    /// The byte order in effect; an unset field resolves to `Big`.
    pub fn effective_byte_order(&self) -> ByteOrder {
        self.byte_order.unwrap_or_default()
    }

    /// Map a pixel column to `(byte index within row, bit shift)`.
    ///
    /// The linear bit offset counts from the most significant position of
    /// the row's byte group. `padding` decides where the unused bits sit,
    /// `bit_order` mirrors the bit within its byte, and `byte_order`
    /// mirrors the byte index within the row.
    ///
    /// The returned shift is ready for `(byte >> shift) & 1` on read and
    /// `1 << shift` on write.
    pub fn bit_position(&self, column: usize) -> (usize, usize) {
        let total_bits = self.bytes_per_row() * 8;
        let unused_bits = total_bits - self.width;

        let offset = match self.padding {
            BitPadding::Right => column,
            BitPadding::Left => column + unused_bits,
        };

        let mut byte_index = offset / 8;
        let shift = match self.bit_order {
            BitOrder::Msb => 7 - offset % 8,
            BitOrder::Lsb => offset % 8,
        };

        if self.effective_byte_order() == ByteOrder::Little {
            byte_index = self.bytes_per_row() - 1 - byte_index;
        }

        (byte_index, shift)
    }
}
