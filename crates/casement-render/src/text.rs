//! Text measurement for auto-sizing and caret placement.
//!
//! The layout engine never rasterizes text; it only needs extents. Hosts
//! provide an implementation of [`TextMetrics`] - usually [`FontMetrics`]
//! over a real font file - and controls consume it when computing their
//! content-driven size hints.

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};

use crate::error::RenderResult;

/// Measured extents of a string at a given pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    /// Advance width of the whole string.
    pub width: f32,
    /// Distance from the baseline to the top of the em box.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the em box (positive).
    pub descent: f32,
}

impl TextExtent {
    /// Total line height (ascent + descent).
    #[inline]
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// The text-measurement service consumed by the layout engine.
pub trait TextMetrics {
    /// Measure a single line of text at the given pixel size.
    fn measure(&self, text: &str, px: f32) -> TextExtent;
}

/// Text metrics backed by a parsed font.
#[derive(Clone)]
pub struct FontMetrics {
    font: FontArc,
}

impl std::fmt::Debug for FontMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontMetrics").finish_non_exhaustive()
    }
}

impl FontMetrics {
    /// Parse font data (TTF/OTF) supplied by the host.
    pub fn from_bytes(data: Vec<u8>) -> RenderResult<Self> {
        let font = FontArc::try_from_vec(data)?;
        Ok(Self { font })
    }
}

impl TextMetrics for FontMetrics {
    fn measure(&self, text: &str, px: f32) -> TextExtent {
        let scaled = self.font.as_scaled(PxScale::from(px.max(1.0)));

        let mut width = 0.0;
        let mut prev = None;
        for c in text.chars() {
            let glyph = self.font.glyph_id(c);
            if let Some(prev) = prev {
                width += scaled.kern(prev, glyph);
            }
            width += scaled.h_advance(glyph);
            prev = Some(glyph);
        }

        TextExtent {
            width,
            ascent: scaled.ascent(),
            descent: -scaled.descent(),
        }
    }
}

/// Deterministic metrics with a fixed advance per character.
///
/// Used by tests and as a stand-in before the host has loaded fonts; every
/// character advances `advance_ratio * px` and the em box splits 80/20
/// around the baseline.
#[derive(Debug, Clone, Copy)]
pub struct FixedMetrics {
    /// Advance per character as a fraction of the pixel size.
    pub advance_ratio: f32,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl TextMetrics for FixedMetrics {
    fn measure(&self, text: &str, px: f32) -> TextExtent {
        let px = px.max(1.0);
        TextExtent {
            width: text.chars().count() as f32 * self.advance_ratio * px,
            ascent: px * 0.8,
            descent: px * 0.2,
        }
    }
}
