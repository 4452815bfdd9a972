//! Reading order conventions for mapping grid positions to character
//! indices.
//!
//! The recognition engine always emits glyphs in raster order (row-major,
//! left to right, top to bottom). Consumers apply one of these conventions
//! afterwards to assign code points; the engine itself never does.

use serde::{Deserialize, Serialize};

/// A scan convention: primary axis (row- or column-major) plus a direction
/// on each axis.
///
/// Row-major orders are named horizontal-direction first (`ltr-ttb`),
/// column-major orders vertical-direction first (`ttb-ltr`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingOrder {
    #[default]
    LtrTtb,
    RtlTtb,
    LtrBtt,
    RtlBtt,
    TtbLtr,
    TtbRtl,
    BttLtr,
    BttRtl,
}

impl ReadingOrder {
    /// All eight conventions.
    pub const ALL: &'static [ReadingOrder] = &[
        ReadingOrder::LtrTtb,
        ReadingOrder::RtlTtb,
        ReadingOrder::LtrBtt,
        ReadingOrder::RtlBtt,
        ReadingOrder::TtbLtr,
        ReadingOrder::TtbRtl,
        ReadingOrder::BttLtr,
        ReadingOrder::BttRtl,
    ];

    pub fn is_column_major(self) -> bool {
        matches!(
            self,
            ReadingOrder::TtbLtr | ReadingOrder::TtbRtl | ReadingOrder::BttLtr | ReadingOrder::BttRtl
        )
    }

    pub fn is_right_to_left(self) -> bool {
        matches!(
            self,
            ReadingOrder::RtlTtb | ReadingOrder::RtlBtt | ReadingOrder::TtbRtl | ReadingOrder::BttRtl
        )
    }

    pub fn is_bottom_to_top(self) -> bool {
        matches!(
            self,
            ReadingOrder::LtrBtt | ReadingOrder::RtlBtt | ReadingOrder::BttLtr | ReadingOrder::BttRtl
        )
    }

    /// Map a raster `(row, col)` position to its logical character index.
    ///
    /// Total and pure; performs no bounds clamping. Callers must supply
    /// `row < rows` and `col < columns`.
    pub fn to_logical_index(self, row: usize, col: usize, rows: usize, columns: usize) -> usize {
        let effective_row = if self.is_bottom_to_top() { rows - 1 - row } else { row };
        let effective_col = if self.is_right_to_left() { columns - 1 - col } else { col };
        if self.is_column_major() {
            effective_col * rows + effective_row
        } else {
            effective_row * columns + effective_col
        }
    }

    /// Parse a convention name such as `rtl-ttb`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ltr-ttb" => Some(ReadingOrder::LtrTtb),
            "rtl-ttb" => Some(ReadingOrder::RtlTtb),
            "ltr-btt" => Some(ReadingOrder::LtrBtt),
            "rtl-btt" => Some(ReadingOrder::RtlBtt),
            "ttb-ltr" => Some(ReadingOrder::TtbLtr),
            "ttb-rtl" => Some(ReadingOrder::TtbRtl),
            "btt-ltr" => Some(ReadingOrder::BttLtr),
            "btt-rtl" => Some(ReadingOrder::BttRtl),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ReadingOrder::LtrTtb => "ltr-ttb",
            ReadingOrder::RtlTtb => "rtl-ttb",
            ReadingOrder::LtrBtt => "ltr-btt",
            ReadingOrder::RtlBtt => "rtl-btt",
            ReadingOrder::TtbLtr => "ttb-ltr",
            ReadingOrder::TtbRtl => "ttb-rtl",
            ReadingOrder::BttLtr => "btt-ltr",
            ReadingOrder::BttRtl => "btt-rtl",
        }
    }
}

impl std::fmt::Display for ReadingOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ReadingOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ReadingOrder::from_name(s).ok_or_else(|| format!("unknown reading order: {s}"))
    }
}
