//! Geometric primitives: Point, Size, Rect

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Unbounded on both axes. Used as the measure constraint of content that
    /// may grow freely.
    pub const INFINITE: Size = Size {
        width: f32::INFINITY,
        height: f32::INFINITY,
    };

    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }

    /// Component-wise maximum.
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Rounds both components to the nearest whole pixel.
    pub fn round(self) -> Self {
        Self {
            width: self.width.round(),
            height: self.height.round(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    /// Snaps the edges to whole pixels so adjacent rectangles stay seamless.
    pub fn round(&self) -> Self {
        let left = self.x.round();
        let top = self.y.round();
        let right = (self.x + self.width).round();
        let bottom = (self.y + self.height).round();
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_round_keeps_edges_aligned() {
        let a = Rect::new(0.0, 0.0, 10.4, 5.0);
        let b = Rect::new(10.4, 0.0, 10.4, 5.0);
        let (ra, rb) = (a.round(), b.round());
        assert_eq!(ra.x + ra.width, rb.x);
        assert_eq!(rb.width, 11.0);
    }

    #[test]
    fn infinite_size_is_not_finite() {
        assert!(!Size::INFINITE.is_finite());
        assert!(Size::new(3.0, 4.0).is_finite());
        assert_eq!(Size::new(1.0, 9.0).max(Size::new(4.0, 2.0)), Size::new(4.0, 9.0));
    }

    #[test]
    fn rect_translate_keeps_size() {
        let rect = Rect::new(5.0, 5.0, 10.0, 4.0);
        assert_eq!(rect.origin(), Point::new(5.0, 5.0));
        let moved = rect.translate(-5.0, 1.0);
        assert_eq!(moved, Rect::new(0.0, 6.0, 10.0, 4.0));
        assert_eq!(moved.size(), rect.size());
    }
}
