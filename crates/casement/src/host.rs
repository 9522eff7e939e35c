//! The narrow interface between the GUI root and its windowing host.

use casement_render::Surface;

use crate::control::cursor::CursorShape;

/// What a windowing host must provide for a Casement root to show itself.
///
/// Implementations wrap whatever the platform offers - a winit window with
/// a softbuffer/pixel upload, a framebuffer, a test sink. The toolkit calls
/// [`present`](Self::present) with the fully composited root surface; how
/// those pixels reach glass is the host's business.
pub trait WindowHost {
    /// Present the root surface to the display.
    fn present(&mut self, surface: &Surface);

    /// Update the pointer glyph after a hover change.
    ///
    /// The default ignores cursor changes, which suits headless hosts.
    fn set_cursor(&mut self, _cursor: CursorShape) {}
}

/// A host that discards everything; for tests and benchmarks.
#[derive(Debug, Default)]
pub struct NullHost {
    /// Number of frames presented.
    pub presents: u32,
    /// Cursor shapes received, most recent last.
    pub cursors: Vec<CursorShape>,
}

impl WindowHost for NullHost {
    fn present(&mut self, _surface: &Surface) {
        self.presents += 1;
    }

    fn set_cursor(&mut self, cursor: CursorShape) {
        self.cursors.push(cursor);
    }
}
