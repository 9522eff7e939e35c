//! Error types for the render crate.

use thiserror::Error;

/// Errors produced by surface and text operations.
///
/// Surface drawing itself never fails: blits clip against the destination
/// and degenerate dimensions are clamped at allocation time, so the only
/// fallible operation left is loading host-provided font data.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The supplied font data could not be parsed.
    #[error("failed to parse font data: {0}")]
    InvalidFont(#[from] ab_glyph::InvalidFont),
}

/// Result type for render operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
