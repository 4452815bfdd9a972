//! Image-to-glyph recognition.
//!
//! Extracts a glyph grid from an already-decoded bitmap image. Decoding a
//! file into pixels is the caller's job (the CLI uses the `image` crate for
//! it); the engine only sees a [`PixelBuffer`].
//!
//! Glyphs are always emitted in raster order. Assigning character indices
//! under a different reading convention is the consumer's job via
//! [`crate::ReadingOrder`].

use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::{EngineError, Glyph, ReadingOrder, Result};

/// Background color used for areas a rotation exposes.
const ROTATION_BACKGROUND: [u8; 4] = [255, 255, 255, 255];

/// A decoded image: row-major RGBA bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer filled with the background color.
    pub fn new(width: usize, height: usize) -> Self {
        let mut data = Vec::with_capacity(width * height * 4);
        for _ in 0..width * height {
            data.extend_from_slice(&ROTATION_BACKGROUND);
        }
        Self { width, height, data }
    }

    /// Wrap raw row-major RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns a generic error if `data` is not `width * height * 4` bytes.
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height * 4 {
            return Err(EngineError::generic(format!(
                "pixel buffer size mismatch: {width}x{height} needs {} bytes, got {}",
                width * height * 4,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// Decode an image file.
    ///
    /// Convenience wrapper for callers without their own decode path; the
    /// engine proper only ever consumes the resulting buffer.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Image`] if the file cannot be decoded.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        Ok(Self::from_image(&image::open(path)?))
    }

    /// Convert a decoded `image` crate image.
    pub fn from_image(image: &DynamicImage) -> Self {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            width: width as usize,
            height: height as usize,
            data: rgba.into_raw(),
        }
    }

    /// Render back into an `image` crate buffer, e.g. for a rotation
    /// preview.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_raw(self.width as u32, self.height as u32, self.data.clone()).expect("buffer dimensions are consistent by construction")
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// RGB channels at the given position, or `None` outside the image.
    pub fn rgb(&self, x: usize, y: usize) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * 4;
        Some((self.data[offset], self.data[offset + 1], self.data[offset + 2]))
    }

    /// Overwrite one pixel. Does nothing outside the image.
    pub fn set_rgba(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = (y * self.width + x) * 4;
        self.data[offset..offset + 4].copy_from_slice(&rgba);
    }

    /// Rotate the image about its top-left corner.
    ///
    /// The result is large enough to contain the whole rotated source;
    /// exposed areas are filled with the deterministic background color.
    /// Nearest-neighbor resampling.
    pub fn rotate(&self, degrees: f32) -> PixelBuffer {
        let radians = f64::from(degrees).to_radians();
        let (sin, cos) = radians.sin_cos();
        let width = self.width as f64;
        let height = self.height as f64;

        let corners = [(0.0, 0.0), (width, 0.0), (0.0, height), (width, height)].map(|(x, y): (f64, f64)| (x * cos - y * sin, x * sin + y * cos));
        let min_x = corners.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
        let max_x = corners.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max);
        let min_y = corners.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);
        let max_y = corners.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max);

        // epsilon keeps rounding noise from growing the canvas by a pixel
        let out_width = (((max_x - min_x) - 1e-9).ceil() as usize).max(1);
        let out_height = (((max_y - min_y) - 1e-9).ceil() as usize).max(1);

        let mut result = PixelBuffer::new(out_width, out_height);
        for y in 0..out_height {
            for x in 0..out_width {
                // inverse-rotate the output pixel center back onto the source
                let fx = x as f64 + 0.5 + min_x;
                let fy = y as f64 + 0.5 + min_y;
                let source_x = fx * cos + fy * sin;
                let source_y = -fx * sin + fy * cos;
                if source_x < 0.0 || source_y < 0.0 {
                    continue;
                }
                let (sx, sy) = (source_x.floor() as usize, source_y.floor() as usize);
                if sx < self.width && sy < self.height {
                    let offset = (sy * self.width + sx) * 4;
                    let mut rgba = [0; 4];
                    rgba.copy_from_slice(&self.data[offset..offset + 4]);
                    result.set_rgba(x, y, rgba);
                }
            }
        }
        result
    }
}

/// Grid extraction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecognitionConfig {
    /// Source-pixel origin of the first glyph cell
    pub offset_x: usize,
    pub offset_y: usize,
    /// Source pixels per logical pixel
    pub pixel_width: usize,
    pub pixel_height: usize,
    /// Source-pixel gaps between glyph cells
    pub gap_x: usize,
    pub gap_y: usize,
    /// Logical glyph dimensions
    pub char_width: usize,
    pub char_height: usize,
    /// Forced grid size; 0 auto-detects from the image size
    pub force_columns: usize,
    pub force_rows: usize,
    /// Luminance cutoff; pixels darker than this are foreground
    pub threshold: u8,
    /// Flip foreground/background polarity
    pub invert: bool,
    /// Deskew rotation, clamped to [-2, 2] degrees
    pub rotation_degrees: f32,
    /// Reading convention downstream consumers should index glyphs with.
    /// Not applied here; extraction is always raster order.
    pub reading_order: ReadingOrder,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            pixel_width: 1,
            pixel_height: 1,
            gap_x: 0,
            gap_y: 0,
            char_width: 8,
            char_height: 8,
            force_columns: 0,
            force_rows: 0,
            threshold: 128,
            invert: false,
            rotation_degrees: 0.0,
            reading_order: ReadingOrder::default(),
        }
    }
}

/// Extraction result: the detected grid and its glyphs in raster order,
/// indexed `row * columns + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    pub columns: usize,
    pub rows: usize,
    pub glyphs: Vec<Glyph>,
}

/// Extract a glyph grid from a decoded image.
///
/// Never fails on out-of-range geometry: cells that would sample outside
/// the image decode as blank glyphs.
pub fn recognize(image: &PixelBuffer, config: &RecognitionConfig) -> RecognitionResult {
    let rotated;
    let source = if config.rotation_degrees.abs() < f32::EPSILON {
        image
    } else {
        rotated = image.rotate(config.rotation_degrees.clamp(-2.0, 2.0));
        &rotated
    };

    let pixel_width = config.pixel_width.max(1);
    let pixel_height = config.pixel_height.max(1);
    let char_width = config.char_width.max(1);
    let char_height = config.char_height.max(1);
    let stride_x = char_width * pixel_width + config.gap_x;
    let stride_y = char_height * pixel_height + config.gap_y;

    let columns = if config.force_columns > 0 {
        config.force_columns
    } else {
        source.width().saturating_sub(config.offset_x) / stride_x
    };
    let rows = if config.force_rows > 0 {
        config.force_rows
    } else {
        source.height().saturating_sub(config.offset_y) / stride_y
    };

    let mut glyphs = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for col in 0..columns {
            let cell_x = config.offset_x + col * stride_x;
            let cell_y = config.offset_y + row * stride_y;
            glyphs.push(extract_cell(source, cell_x, cell_y, config, char_width, char_height, pixel_width, pixel_height));
        }
    }

    RecognitionResult { columns, rows, glyphs }
}

#[allow(clippy::too_many_arguments)]
fn extract_cell(
    source: &PixelBuffer,
    cell_x: usize,
    cell_y: usize,
    config: &RecognitionConfig,
    char_width: usize,
    char_height: usize,
    pixel_width: usize,
    pixel_height: usize,
) -> Glyph {
    let mut glyph = Glyph::new(char_width, char_height);
    for py in 0..char_height {
        for px in 0..char_width {
            let block_x = cell_x + px * pixel_width;
            let block_y = cell_y + py * pixel_height;
            if let Some(luminance) = block_luminance(source, block_x, block_y, pixel_width, pixel_height) {
                glyph.rows[py][px] = (luminance * 255.0 < f32::from(config.threshold)) != config.invert;
            }
        }
    }
    glyph
}

/// Average gamma-corrected relative luminance over the in-bounds samples
/// of one supersampling block, or `None` if the whole block lies outside
/// the image.
fn block_luminance(source: &PixelBuffer, block_x: usize, block_y: usize, pixel_width: usize, pixel_height: usize) -> Option<f32> {
    let mut sum = 0.0;
    let mut samples = 0_u32;
    for dy in 0..pixel_height {
        for dx in 0..pixel_width {
            if let Some((r, g, b)) = source.rgb(block_x + dx, block_y + dy) {
                sum += relative_luminance(r, g, b);
                samples += 1;
            }
        }
    }
    if samples == 0 { None } else { Some(sum / samples as f32) }
}

fn srgb_to_linear(channel: u8) -> f32 {
    let c = f32::from(channel) / 255.0;
    if c <= 0.040_45 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

/// Relative luminance over linearized sRGB channels.
fn relative_luminance(r: u8, g: u8, b: u8) -> f32 {
    0.2126 * srgb_to_linear(r) + 0.7152 * srgb_to_linear(g) + 0.0722 * srgb_to_linear(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn paint_rect(buffer: &mut PixelBuffer, x: usize, y: usize, width: usize, height: usize) {
        for dy in 0..height {
            for dx in 0..width {
                buffer.set_rgba(x + dx, y + dy, BLACK);
            }
        }
    }

    #[test]
    fn test_luminance_extremes() {
        assert!(relative_luminance(0, 0, 0) < 0.001);
        assert!(relative_luminance(255, 255, 255) > 0.999);
    }

    #[test]
    fn test_auto_detect_grid() {
        let buffer = PixelBuffer::new(17, 33);
        let config = RecognitionConfig {
            offset_x: 1,
            offset_y: 1,
            ..Default::default()
        };
        let result = recognize(&buffer, &config);
        assert_eq!(result.columns, 2);
        assert_eq!(result.rows, 4);
        assert_eq!(result.glyphs.len(), 8);
    }

    #[test]
    fn test_forced_grid_overrides_auto_detect() {
        let buffer = PixelBuffer::new(8, 8);
        let config = RecognitionConfig {
            force_columns: 3,
            force_rows: 2,
            ..Default::default()
        };
        let result = recognize(&buffer, &config);
        assert_eq!(result.columns, 3);
        assert_eq!(result.rows, 2);
        assert_eq!(result.glyphs.len(), 6);
        // cells beyond the image come back blank, not as an error
        assert!(result.glyphs[5].is_empty());
    }

    #[test]
    fn test_offset_beyond_image_yields_empty_grid() {
        let buffer = PixelBuffer::new(8, 8);
        let config = RecognitionConfig {
            offset_x: 100,
            offset_y: 100,
            ..Default::default()
        };
        let result = recognize(&buffer, &config);
        assert_eq!(result.columns, 0);
        assert_eq!(result.rows, 0);
        assert!(result.glyphs.is_empty());
    }

    #[test]
    fn test_dark_pixels_are_foreground() {
        let mut buffer = PixelBuffer::new(8, 8);
        paint_rect(&mut buffer, 0, 0, 4, 8);
        let result = recognize(&buffer, &RecognitionConfig::default());

        let glyph = &result.glyphs[0];
        assert!(glyph.get_pixel(0, 0));
        assert!(glyph.get_pixel(3, 7));
        assert!(!glyph.get_pixel(4, 0));
    }

    #[test]
    fn test_invert_flips_polarity() {
        let mut buffer = PixelBuffer::new(8, 8);
        paint_rect(&mut buffer, 0, 0, 4, 8);
        let config = RecognitionConfig {
            invert: true,
            ..Default::default()
        };
        let glyph = &recognize(&buffer, &config).glyphs[0];
        assert!(!glyph.get_pixel(0, 0));
        assert!(glyph.get_pixel(4, 0));
    }

    #[test]
    fn test_supersampling_averages_block() {
        // one logical pixel backed by a 2x2 block, half black half white
        let mut buffer = PixelBuffer::new(2, 2);
        buffer.set_rgba(0, 0, BLACK);
        buffer.set_rgba(1, 1, BLACK);

        let mut config = RecognitionConfig {
            pixel_width: 2,
            pixel_height: 2,
            char_width: 1,
            char_height: 1,
            ..Default::default()
        };

        let glyph = &recognize(&buffer, &config).glyphs[0];
        assert!(glyph.get_pixel(0, 0));

        // a lower threshold pushes the mixed block to background
        config.threshold = 100;
        let glyph = &recognize(&buffer, &config).glyphs[0];
        assert!(!glyph.get_pixel(0, 0));
    }

    #[test]
    fn test_gap_skips_between_cells() {
        // two 2x2 cells separated by a 1px gap column, second cell black
        let mut buffer = PixelBuffer::new(6, 2);
        paint_rect(&mut buffer, 3, 0, 2, 2);
        let config = RecognitionConfig {
            char_width: 2,
            char_height: 2,
            gap_x: 1,
            ..Default::default()
        };
        let result = recognize(&buffer, &config);
        assert_eq!(result.columns, 2);
        assert!(result.glyphs[0].is_empty());
        assert!(result.glyphs[1].get_pixel(0, 0));
        assert!(result.glyphs[1].get_pixel(1, 1));
    }

    #[test]
    fn test_recognition_is_deterministic() {
        let mut buffer = PixelBuffer::new(16, 16);
        paint_rect(&mut buffer, 2, 3, 5, 7);
        let config = RecognitionConfig {
            rotation_degrees: 1.5,
            ..Default::default()
        };
        let first = recognize(&buffer, &config);
        let second = recognize(&buffer, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_rotation_canvas_contains_source() {
        let buffer = PixelBuffer::new(40, 20);
        let rotated = buffer.rotate(2.0);
        assert!(rotated.width() >= 40);
        assert!(rotated.height() >= 20);
    }

    #[test]
    fn test_rotate_quarter_turn_moves_pixel() {
        let mut buffer = PixelBuffer::new(3, 2);
        buffer.set_rgba(1, 0, BLACK);

        let rotated = buffer.rotate(90.0);
        assert_eq!(rotated.width(), 2);
        assert_eq!(rotated.height(), 3);
        assert_eq!(rotated.rgb(1, 1), Some((0, 0, 0)));
    }

    #[test]
    fn test_from_rgba_rejects_bad_length() {
        assert!(PixelBuffer::from_rgba(2, 2, vec![0; 15]).is_err());
        assert!(PixelBuffer::from_rgba(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn test_image_interop_round_trip() {
        let mut buffer = PixelBuffer::new(4, 3);
        buffer.set_rgba(2, 1, [10, 20, 30, 255]);

        let image = DynamicImage::ImageRgba8(buffer.to_rgba_image());
        assert_eq!(PixelBuffer::from_image(&image), buffer);
    }
}
