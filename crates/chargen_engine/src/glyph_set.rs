//! Glyph sets and their descriptive metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{parse_rom, serialize_rom, Glyph, GlyphSetConfig, Result};

/// Descriptive metadata attached to a glyph set.
///
/// Opaque to the codec; it passes through serialization unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetMetadata {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub system: String,
    #[serde(default)]
    pub chip: String,
    #[serde(default)]
    pub locale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_built_in: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl SetMetadata {
    /// Create metadata with a name and a fresh creation timestamp.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Record a modification timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

/// A complete glyph set: metadata, binary geometry and glyphs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphSet {
    pub metadata: SetMetadata,
    pub config: GlyphSetConfig,
    pub glyphs: Vec<Glyph>,
}

impl GlyphSet {
    /// Create an empty set with the given geometry.
    pub fn new(config: GlyphSetConfig) -> Self {
        Self {
            metadata: SetMetadata::default(),
            config,
            glyphs: Vec::new(),
        }
    }

    /// Create a set with `count` blank glyphs.
    pub fn with_blank_glyphs(config: GlyphSetConfig, count: usize) -> Self {
        Self {
            metadata: SetMetadata::default(),
            config,
            glyphs: vec![Glyph::new(config.width, config.height); count],
        }
    }

    /// Decode a flat ROM byte stream into a set.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::InvalidConfig`] for zero-sized
    /// dimensions; truncated glyph data is recovered, not reported.
    pub fn from_rom_bytes(bytes: &[u8], config: GlyphSetConfig) -> Result<Self> {
        Ok(Self {
            metadata: SetMetadata::default(),
            config,
            glyphs: parse_rom(bytes, &config)?,
        })
    }

    /// Encode the set as a flat ROM byte stream.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::InvalidConfig`] for zero-sized
    /// dimensions.
    pub fn to_rom_bytes(&self) -> Result<Vec<u8>> {
        serialize_rom(&self.glyphs, &self.config)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn get_glyph(&self, index: usize) -> Option<&Glyph> {
        self.glyphs.get(index)
    }

    pub fn get_glyph_mut(&mut self, index: usize) -> Option<&mut Glyph> {
        self.glyphs.get_mut(index)
    }
}
