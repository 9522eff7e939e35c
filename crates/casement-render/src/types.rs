//! Basic geometry and color types shared across the toolkit.

use bytemuck::{Pod, Zeroable};

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Component-wise addition.
    #[inline]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Clamp both dimensions into `[min, max]` component-wise.
    #[inline]
    pub fn clamp(self, min: Size, max: Size) -> Self {
        Self {
            width: self.width.clamp(min.width, max.width),
            height: self.height.clamp(min.height, max.height),
        }
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Empty rectangle at origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// Left edge x coordinate.
    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    /// Top edge y coordinate.
    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// Right edge x coordinate (exclusive).
    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Bottom edge y coordinate (exclusive).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Rectangle width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    /// Rectangle height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Check if a point lies inside the rectangle.
    ///
    /// The left/top edges are inclusive, right/bottom exclusive, so
    /// adjacent rectangles never both claim a boundary point.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Intersection with another rectangle, or `None` if disjoint.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left < right && top < bottom {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Translate by a delta.
    #[inline]
    pub fn translated(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            origin: self.origin.offset(dx, dy),
            size: self.size,
        }
    }
}

/// An RGBA color with 8 bits per channel, non-premultiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::from_rgba8(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb8(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb8(255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::from_rgb8(255, 0, 0);
    /// Opaque green.
    pub const GREEN: Self = Self::from_rgb8(0, 255, 0);
    /// Opaque blue.
    pub const BLUE: Self = Self::from_rgb8(0, 0, 255);

    /// Create an opaque color from 8-bit channels.
    #[inline]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from 8-bit channels including alpha.
    #[inline]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Return the same color with its alpha scaled by `factor` in `[0, 1]`.
    pub fn with_alpha_scaled(self, factor: f32) -> Self {
        let a = (f32::from(self.a) * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Whether the color is fully opaque.
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(29.9, 29.9)));
        assert!(!rect.contains(Point::new(30.0, 10.0)));
        assert!(!rect.contains(Point::new(10.0, 30.0)));
        assert!(!rect.contains(Point::new(9.9, 15.0)));
    }

    #[test]
    fn rect_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        let i = a.intersect(&b).unwrap();
        assert_eq!(i, Rect::new(50.0, 50.0, 50.0, 50.0));

        let c = Rect::new(200.0, 200.0, 10.0, 10.0);
        assert!(a.intersect(&c).is_none());
    }

    #[test]
    fn rect_union() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let b = Rect::new(25.0, 25.0, 50.0, 50.0);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(0.0, 0.0, 75.0, 75.0));
    }

    #[test]
    fn size_clamp() {
        let size = Size::new(300.0, 5.0);
        let clamped = size.clamp(Size::new(10.0, 10.0), Size::new(200.0, 200.0));
        assert_eq!(clamped, Size::new(200.0, 10.0));
    }

    #[test]
    fn color_alpha_scaling() {
        let color = Color::from_rgba8(10, 20, 30, 200);
        assert_eq!(color.with_alpha_scaled(0.5).a, 100);
        assert_eq!(color.with_alpha_scaled(0.0).a, 0);
        assert_eq!(color.with_alpha_scaled(2.0).a, 200);
    }
}
