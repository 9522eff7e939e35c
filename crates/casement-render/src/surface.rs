//! Off-screen pixel buffers and compositing.
//!
//! A [`Surface`] is an owned RGBA8 buffer sized exactly to its control. The
//! render engine keeps one per control and composites child surfaces onto
//! parent surfaces bottom-up, so a clean subtree re-renders for free: its
//! cached surface is simply blitted again.
//!
//! Buffers are reallocated only when their dimensions change; re-rendering
//! at the same size clears and reuses the existing allocation.

use image::imageops;
use image::{Pixel, Rgba, RgbaImage};

use crate::types::{Color, Rect};

#[inline]
fn to_rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

/// An owned off-screen pixel buffer holding one control's rendered look.
#[derive(Debug, Clone)]
pub struct Surface {
    pixels: RgbaImage,
}

impl Surface {
    /// Create a surface with the given dimensions.
    ///
    /// Dimensions are clamped to a minimum of 1 in both axes: a surface
    /// with a non-positive extent cannot exist, and callers that collapse a
    /// control to zero size still need a valid buffer to present.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width.max(1), height.max(1)),
        }
    }

    /// Surface width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Surface height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Resize the buffer if the requested dimensions differ.
    ///
    /// Returns `true` when a reallocation happened. The buffer contents are
    /// undefined afterwards either way; callers clear before painting.
    pub fn ensure_size(&mut self, width: u32, height: u32) -> bool {
        let (width, height) = (width.max(1), height.max(1));
        if self.pixels.width() == width && self.pixels.height() == height {
            return false;
        }
        self.pixels = RgbaImage::new(width, height);
        true
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// Fill the whole surface with a color, replacing existing pixels.
    pub fn fill(&mut self, color: Color) {
        let rgba = to_rgba(color);
        for pixel in self.pixels.pixels_mut() {
            *pixel = rgba;
        }
    }

    /// Fill a rectangle, alpha-blending the color over existing pixels.
    ///
    /// The rectangle is clipped against the surface.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rgba = to_rgba(color);
        let (x0, y0, x1, y1) = self.clip(rect);

        if color.is_opaque() {
            for y in y0..y1 {
                for x in x0..x1 {
                    self.pixels.put_pixel(x, y, rgba);
                }
            }
        } else {
            for y in y0..y1 {
                for x in x0..x1 {
                    self.pixels.get_pixel_mut(x, y).blend(&rgba);
                }
            }
        }
    }

    /// Stroke a rectangle outline with the given line thickness.
    pub fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: f32) {
        let t = thickness.max(1.0);
        // Top, bottom, left, right bands.
        self.fill_rect(Rect::new(rect.left(), rect.top(), rect.width(), t), color);
        self.fill_rect(
            Rect::new(rect.left(), rect.bottom() - t, rect.width(), t),
            color,
        );
        self.fill_rect(
            Rect::new(rect.left(), rect.top() + t, t, rect.height() - 2.0 * t),
            color,
        );
        self.fill_rect(
            Rect::new(rect.right() - t, rect.top() + t, t, rect.height() - 2.0 * t),
            color,
        );
    }

    /// Composite another surface onto this one at `(x, y)` with standard
    /// alpha-over blending. The source is clipped against this surface;
    /// negative offsets are allowed.
    pub fn blit(&mut self, src: &Surface, x: i64, y: i64) {
        imageops::overlay(&mut self.pixels, &src.pixels, x, y);
    }

    /// Composite another surface onto this one with its alpha additionally
    /// scaled by `opacity` in `[0, 1]`.
    ///
    /// An opacity of 1 is equivalent to [`blit`](Self::blit); an opacity of
    /// 0 is a no-op (the render engine skips such children entirely).
    pub fn blit_with_opacity(&mut self, src: &Surface, x: i64, y: i64, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return;
        }
        if opacity >= 1.0 {
            self.blit(src, x, y);
            return;
        }

        let dst_w = i64::from(self.pixels.width());
        let dst_h = i64::from(self.pixels.height());

        for (sx, sy, pixel) in src.pixels.enumerate_pixels() {
            let dx = x + i64::from(sx);
            let dy = y + i64::from(sy);
            if dx < 0 || dy < 0 || dx >= dst_w || dy >= dst_h {
                continue;
            }
            let mut faded = *pixel;
            faded.0[3] = (f32::from(faded.0[3]) * opacity).round() as u8;
            self.pixels
                .get_pixel_mut(dx as u32, dy as u32)
                .blend(&faded);
        }
    }

    /// Read a single pixel. Panics if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let Rgba([r, g, b, a]) = *self.pixels.get_pixel(x, y);
        Color::from_rgba8(r, g, b, a)
    }

    /// Borrow the raw pixel buffer, e.g. for presentation to the display.
    pub fn data(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Clip a rectangle to this surface, returning `(x0, y0, x1, y1)` in
    /// pixel coordinates with `x1`/`y1` exclusive.
    fn clip(&self, rect: Rect) -> (u32, u32, u32, u32) {
        let x0 = rect.left().floor().max(0.0) as u32;
        let y0 = rect.top().floor().max(0.0) as u32;
        let x1 = (rect.right().ceil().max(0.0) as u32).min(self.pixels.width());
        let y1 = (rect.bottom().ceil().max(0.0) as u32).min(self.pixels.height());
        (x0.min(x1), y0.min(y1), x1, y1)
    }
}
