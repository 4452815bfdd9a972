//! Packed-byte codec for glyphs and flat ROM streams.
//!
//! All bit layout decisions are delegated to
//! [`GlyphSetConfig::bit_position`]; encode rewrites every bit position the
//! decoder reads, so round trips are exact including padding bits.

use crate::{Glyph, GlyphSetConfig, Result};

/// Decode one glyph from its packed-byte representation.
///
/// Byte indices beyond the end of `bytes` read as `0`, so short or
/// truncated input decodes to blank trailing rows instead of failing.
///
/// # Errors
///
/// Returns [`crate::EngineError::InvalidConfig`] for zero-sized dimensions.
pub fn bytes_to_glyph(bytes: &[u8], config: &GlyphSetConfig) -> Result<Glyph> {
    config.validate()?;
    let bytes_per_row = config.bytes_per_row();
    let mut glyph = Glyph::new(config.width, config.height);
    for row in 0..config.height {
        let base = row * bytes_per_row;
        for column in 0..config.width {
            let (byte_index, shift) = config.bit_position(column);
            let byte = bytes.get(base + byte_index).copied().unwrap_or(0);
            glyph.rows[row][column] = (byte >> shift) & 1 == 1;
        }
    }
    Ok(glyph)
}

/// Encode one glyph into its packed-byte representation.
///
/// Missing rows or pixels of a sparse glyph encode as unset bits; unused
/// padding bits stay `0`.
///
/// # Errors
///
/// Returns [`crate::EngineError::InvalidConfig`] for zero-sized dimensions.
pub fn glyph_to_bytes(glyph: &Glyph, config: &GlyphSetConfig) -> Result<Vec<u8>> {
    config.validate()?;
    let bytes_per_row = config.bytes_per_row();
    let mut bytes = vec![0_u8; config.height * bytes_per_row];
    for row in 0..config.height {
        for column in 0..config.width {
            if glyph.get_pixel(column, row) {
                let (byte_index, shift) = config.bit_position(column);
                bytes[row * bytes_per_row + byte_index] |= 1 << shift;
            }
        }
    }
    Ok(bytes)
}

/// Split a flat ROM byte stream into glyphs.
///
/// Trailing bytes that do not fill a complete glyph are dropped; an empty
/// input yields an empty list.
///
/// # Errors
///
/// Returns [`crate::EngineError::InvalidConfig`] for zero-sized dimensions.
pub fn parse_rom(bytes: &[u8], config: &GlyphSetConfig) -> Result<Vec<Glyph>> {
    config.validate()?;
    let stride = config.bytes_per_glyph();
    let count = bytes.len() / stride;
    let dropped = bytes.len() % stride;
    if dropped != 0 {
        log::warn!("ROM stream has {dropped} trailing byte(s) that do not fill a glyph, dropping them");
    }
    let mut glyphs = Vec::with_capacity(count);
    for chunk in bytes.chunks_exact(stride) {
        glyphs.push(bytes_to_glyph(chunk, config)?);
    }
    Ok(glyphs)
}

/// Concatenate the packed encoding of every glyph, in order.
///
/// # Errors
///
/// Returns [`crate::EngineError::InvalidConfig`] for zero-sized dimensions.
pub fn serialize_rom(glyphs: &[Glyph], config: &GlyphSetConfig) -> Result<Vec<u8>> {
    config.validate()?;
    let mut bytes = Vec::with_capacity(glyphs.len() * config.bytes_per_glyph());
    for glyph in glyphs {
        bytes.extend(glyph_to_bytes(glyph, config)?);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BitOrder, BitPadding, ByteOrder};

    #[test]
    fn test_msb_decode() {
        // 0xAA = 10101010
        let config = GlyphSetConfig::new(8, 8);
        let glyph = bytes_to_glyph(&[0xAA; 8], &config).unwrap();
        for row in 0..8 {
            let expected = [true, false, true, false, true, false, true, false];
            assert_eq!(glyph.rows[row], expected);
        }
    }

    #[test]
    fn test_lsb_decode() {
        let mut config = GlyphSetConfig::new(8, 8);
        config.bit_order = BitOrder::Lsb;
        let glyph = bytes_to_glyph(&[0xAA; 8], &config).unwrap();
        for row in 0..8 {
            let expected = [false, true, false, true, false, true, false, true];
            assert_eq!(glyph.rows[row], expected);
        }
    }

    #[test]
    fn test_padding_right_encode() {
        let config = GlyphSetConfig::new(6, 1);
        let glyph = Glyph::from_rows(vec![vec![true; 6]]);
        assert_eq!(glyph_to_bytes(&glyph, &config).unwrap(), vec![0xFC]);
    }

    #[test]
    fn test_padding_left_encode() {
        let mut config = GlyphSetConfig::new(6, 1);
        config.padding = BitPadding::Left;
        let glyph = Glyph::from_rows(vec![vec![true; 6]]);
        assert_eq!(glyph_to_bytes(&glyph, &config).unwrap(), vec![0x3F]);
    }

    #[test]
    fn test_short_input_decodes_blank_rows() {
        let config = GlyphSetConfig::new(8, 4);
        let glyph = bytes_to_glyph(&[0xFF], &config).unwrap();
        assert_eq!(glyph.rows[0], vec![true; 8]);
        assert_eq!(glyph.rows[1], vec![false; 8]);
        assert_eq!(glyph.rows[3], vec![false; 8]);
    }

    #[test]
    fn test_sparse_glyph_encodes_as_zero() {
        let config = GlyphSetConfig::new(8, 4);
        let glyph = Glyph::from_rows(vec![vec![true, true]]);
        let bytes = glyph_to_bytes(&glyph, &config).unwrap();
        assert_eq!(bytes, vec![0xC0, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_glyph_round_trip() {
        let config = GlyphSetConfig::new(8, 8);
        let mut glyph = Glyph::new(8, 8);
        glyph.set_pixel(0, 0, true);
        glyph.set_pixel(7, 7, true);
        glyph.set_pixel(3, 4, true);

        let bytes = glyph_to_bytes(&glyph, &config).unwrap();
        assert_eq!(bytes_to_glyph(&bytes, &config).unwrap(), glyph);
    }

    #[test]
    fn test_wide_glyph_little_endian_bit_placement() {
        let mut config = GlyphSetConfig::new(16, 1);
        config.byte_order = Some(ByteOrder::Little);
        // leftmost pixel sits in the second byte under LITTLE
        let glyph = bytes_to_glyph(&[0x00, 0x80], &config).unwrap();
        assert!(glyph.get_pixel(0, 0));
        assert!(!glyph.get_pixel(8, 0));
    }

    #[test]
    fn test_wide_glyph_round_trip_little_endian() {
        let mut config = GlyphSetConfig::new(12, 2);
        config.byte_order = Some(ByteOrder::Little);
        // low nibble of each row's first byte holds the padding bits and
        // must stay zero for an exact round trip
        let bytes = [0x30, 0x12, 0x70, 0x56];
        let glyph = bytes_to_glyph(&bytes, &config).unwrap();
        assert_eq!(glyph_to_bytes(&glyph, &config).unwrap(), bytes.to_vec());
    }

    #[test]
    fn test_rom_round_trip_is_bit_exact() {
        let config = GlyphSetConfig::new(8, 8);
        let bytes: Vec<u8> = (0..=255).cycle().take(8 * 8 * 4).map(|b| b as u8).collect();
        let glyphs = parse_rom(&bytes, &config).unwrap();
        assert_eq!(glyphs.len(), 32);
        assert_eq!(serialize_rom(&glyphs, &config).unwrap(), bytes);
    }

    #[test]
    fn test_parse_rom_empty_input() {
        let config = GlyphSetConfig::new(8, 8);
        assert!(parse_rom(&[], &config).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rom_drops_trailing_partial_glyph() {
        let config = GlyphSetConfig::new(8, 8);
        let bytes = vec![0xFF; 64 + 13];
        let glyphs = parse_rom(&bytes, &config).unwrap();
        assert_eq!(glyphs.len(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GlyphSetConfig::new(0, 8);
        assert!(parse_rom(&[0; 16], &config).is_err());
        assert!(serialize_rom(&[], &config).is_err());
        assert!(bytes_to_glyph(&[], &config).is_err());
        assert!(glyph_to_bytes(&Glyph::default(), &config).is_err());
    }
}
