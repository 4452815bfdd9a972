//! Glyph geometry conversion (crop/pad between configurations).

use serde::{Deserialize, Serialize};

use crate::{Glyph, GlyphSetConfig, Result};

/// Corner the source glyph stays attached to while resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Anchor {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    pub fn is_right(self) -> bool {
        matches!(self, Anchor::TopRight | Anchor::BottomRight)
    }

    pub fn is_bottom(self) -> bool {
        matches!(self, Anchor::BottomLeft | Anchor::BottomRight)
    }
}

/// Resize a glyph from `from`'s dimensions to `to`'s dimensions.
///
/// The source is overlaid onto a blank canvas of the target size, aligned
/// at `anchor`. Target pixels outside the source extent stay `false`;
/// source pixels outside the target extent are dropped. This is a pure
/// crop/pad, there is no scaling. Equal dimensions produce a deep copy.
///
/// # Errors
///
/// Returns [`crate::EngineError::InvalidConfig`] if either configuration
/// has a zero dimension.
pub fn convert_glyph(glyph: &Glyph, from: &GlyphSetConfig, to: &GlyphSetConfig, anchor: Anchor) -> Result<Glyph> {
    from.validate()?;
    to.validate()?;

    // Source coordinate of the target origin; nonzero only when anchored
    // to the right/bottom edge.
    let shift_x = if anchor.is_right() {
        from.width as isize - to.width as isize
    } else {
        0
    };
    let shift_y = if anchor.is_bottom() {
        from.height as isize - to.height as isize
    } else {
        0
    };

    let mut result = Glyph::new(to.width, to.height);
    for target_y in 0..to.height {
        for target_x in 0..to.width {
            let source_x = target_x as isize + shift_x;
            let source_y = target_y as isize + shift_y;
            if source_x >= 0 && source_y >= 0 && (source_x as usize) < from.width && (source_y as usize) < from.height {
                result.rows[target_y][target_x] = glyph.get_pixel(source_x as usize, source_y as usize);
            }
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_glyph(width: usize, height: usize) -> Glyph {
        // Diagonal marker pattern, distinct in every corner
        let mut glyph = Glyph::new(width, height);
        glyph.set_pixel(0, 0, true);
        glyph.set_pixel(width - 1, height - 1, true);
        glyph
    }

    #[test]
    fn test_grow_top_left() {
        let from = GlyphSetConfig::new(4, 4);
        let to = GlyphSetConfig::new(8, 8);
        let glyph = numbered_glyph(4, 4);

        let result = convert_glyph(&glyph, &from, &to, Anchor::TopLeft).unwrap();
        assert!(result.get_pixel(0, 0));
        assert!(result.get_pixel(3, 3));
        assert!(!result.get_pixel(7, 7));
    }

    #[test]
    fn test_shrink_bottom_right() {
        let from = GlyphSetConfig::new(8, 8);
        let to = GlyphSetConfig::new(4, 4);
        let glyph = numbered_glyph(8, 8);

        let result = convert_glyph(&glyph, &from, &to, Anchor::BottomRight).unwrap();
        // bottom-right marker survives, top-left one is cropped away
        assert!(result.get_pixel(3, 3));
        assert!(!result.get_pixel(0, 0));
    }

    #[test]
    fn test_grow_bottom_right() {
        let from = GlyphSetConfig::new(4, 4);
        let to = GlyphSetConfig::new(6, 6);
        let glyph = numbered_glyph(4, 4);

        let result = convert_glyph(&glyph, &from, &to, Anchor::BottomRight).unwrap();
        assert!(result.get_pixel(2, 2));
        assert!(result.get_pixel(5, 5));
    }

    #[test]
    fn test_mixed_anchor_top_right() {
        let from = GlyphSetConfig::new(4, 2);
        let to = GlyphSetConfig::new(2, 4);
        let mut glyph = Glyph::new(4, 2);
        glyph.set_pixel(3, 0, true);

        let result = convert_glyph(&glyph, &from, &to, Anchor::TopRight).unwrap();
        assert!(result.get_pixel(1, 0));
        assert!(!result.get_pixel(0, 1));
    }

    #[test]
    fn test_equal_dimensions_is_deep_copy() {
        let config = GlyphSetConfig::new(4, 4);
        let glyph = numbered_glyph(4, 4);

        let mut result = convert_glyph(&glyph, &config, &config, Anchor::TopLeft).unwrap();
        assert_eq!(result, glyph);

        result.set_pixel(1, 1, true);
        assert!(!glyph.get_pixel(1, 1));
    }
}
