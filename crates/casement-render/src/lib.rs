//! Casement render - software surfaces and compositing primitives.
//!
//! Every control in a Casement tree owns one [`Surface`]: an off-screen
//! RGBA pixel buffer holding the control's last-rendered look. This crate
//! provides that buffer, the geometry and color types shared across the
//! toolkit, and the text-measurement interface the layout engine consumes.
//!
//! Rasterization here is deliberately minimal (fills, rectangles, blits
//! with alpha): concrete widget skins draw through the same primitives, and
//! anything fancier belongs to the host.

pub mod error;
pub mod surface;
pub mod text;
pub mod types;

pub use error::{RenderError, RenderResult};
pub use surface::Surface;
pub use text::{FixedMetrics, FontMetrics, TextExtent, TextMetrics};
pub use types::{Color, Point, Rect, Size};
