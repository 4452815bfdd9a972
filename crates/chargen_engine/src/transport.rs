//! Base64 transport encoding and the serialized set envelope.

use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};

use crate::{parse_rom, serialize_rom, GlyphSet, GlyphSetConfig, Result, SetMetadata};

/// Encode bytes as standard base64 with `=` padding.
pub fn encode_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode standard base64.
///
/// # Errors
///
/// Returns [`crate::EngineError::MalformedEncoding`] on any character
/// outside the base64 alphabet or padding grammar; input is never
/// silently dropped or truncated.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    Ok(general_purpose::STANDARD.decode(data)?)
}

/// Storage projection of a [`GlyphSet`]: metadata and config pass through,
/// the glyph bitmaps travel as base64-encoded ROM bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedGlyphSet {
    #[serde(default)]
    pub metadata: SetMetadata,
    pub config: GlyphSetConfig,
    #[serde(default)]
    pub binary_data: String,
}

impl GlyphSet {
    /// Project the set into its storage envelope.
    ///
    /// Metadata and config are deep-copied; the result shares no mutable
    /// state with `self`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::InvalidConfig`] for zero-sized
    /// dimensions.
    pub fn to_serialized(&self) -> Result<SerializedGlyphSet> {
        Ok(SerializedGlyphSet {
            metadata: self.metadata.clone(),
            config: self.config,
            binary_data: encode_base64(&serialize_rom(&self.glyphs, &self.config)?),
        })
    }
}

impl SerializedGlyphSet {
    /// Reconstruct the in-memory glyph set.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::MalformedEncoding`] if `binary_data`
    /// is not valid base64, or [`crate::EngineError::InvalidConfig`] for
    /// zero-sized dimensions.
    pub fn to_glyph_set(&self) -> Result<GlyphSet> {
        let bytes = decode_base64(&self.binary_data)?;
        Ok(GlyphSet {
            metadata: self.metadata.clone(),
            config: self.config,
            glyphs: parse_rom(&bytes, &self.config)?,
        })
    }

    /// Render the envelope as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Json`] on serialization failure.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse an envelope from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EngineError::Json`] on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;

    #[test]
    fn test_base64_known_vector() {
        assert_eq!(encode_base64(&[72, 101, 108, 108, 111]), "SGVsbG8=");
        assert_eq!(decode_base64("SGVsbG8=").unwrap(), vec![72, 101, 108, 108, 111]);
    }

    #[test]
    fn test_base64_empty() {
        assert_eq!(encode_base64(&[]), "");
        assert!(decode_base64("").unwrap().is_empty());
    }

    #[test]
    fn test_base64_round_trip() {
        let bytes: Vec<u8> = (0_u16..=255).map(|b| b as u8).collect();
        assert_eq!(decode_base64(&encode_base64(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn test_decode_rejects_invalid_input() {
        let err = decode_base64("!!!invalid!!!").unwrap_err();
        assert!(matches!(err, EngineError::MalformedEncoding(_)));
    }

    #[test]
    fn test_set_envelope_round_trip() {
        let config = GlyphSetConfig::new(8, 8);
        let mut set = GlyphSet::from_rom_bytes(&[0x5A; 192], config).unwrap();
        set.metadata = SetMetadata::named("round trip");
        set.metadata.system = "c64".to_string();

        let envelope = set.to_serialized().unwrap();
        let restored = envelope.to_glyph_set().unwrap();
        assert_eq!(restored, set);
    }

    #[test]
    fn test_envelope_deep_copies_metadata() {
        let config = GlyphSetConfig::new(8, 8);
        let mut set = GlyphSet::from_rom_bytes(&[0; 64], config).unwrap();
        set.metadata.name = "original".to_string();

        let envelope = set.to_serialized().unwrap();
        set.metadata.name = "changed".to_string();
        assert_eq!(envelope.metadata.name, "original");
    }

    #[test]
    fn test_envelope_json_round_trip() {
        let config = GlyphSetConfig::new(8, 16);
        let mut set = GlyphSet::from_rom_bytes(&[0xA5; 4096], config).unwrap();
        set.metadata = SetMetadata::named("json");

        let json = set.to_serialized().unwrap().to_json_pretty().unwrap();
        assert!(json.contains("\"binaryData\""));

        let restored = SerializedGlyphSet::from_json(&json).unwrap().to_glyph_set().unwrap();
        assert_eq!(restored, set);
    }

    #[test]
    fn test_envelope_with_bad_base64_fails() {
        let envelope = SerializedGlyphSet {
            metadata: SetMetadata::default(),
            config: GlyphSetConfig::new(8, 8),
            binary_data: "***".to_string(),
        };
        assert!(matches!(envelope.to_glyph_set().unwrap_err(), EngineError::MalformedEncoding(_)));
    }
}
