//! Geometric primitives for pointer and preview math.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D vector in pointer/screen space.
pub type Vec2 = DVec2;

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Minimum corner (top-left).
    #[inline]
    pub fn min(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Maximum corner (bottom-right).
    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    /// Center point.
    #[inline]
    pub fn center(self) -> Vec2 {
        (self.min() + self.max()) * 0.5
    }

    /// Size as a vector.
    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(self, point: Vec2) -> bool {
        point.cmpge(self.min()).all() && point.cmplt(self.max()).all()
    }

    /// Map a point to percentages of this rectangle, each axis clamped to `[0, 100]`.
    ///
    /// A degenerate axis (zero or negative extent) maps to 0.
    pub fn percent_of(self, point: Vec2) -> Vec2 {
        fn axis(pos: f64, origin: f64, extent: f64) -> f64 {
            if extent > 0.0 && pos.is_finite() {
                ((pos - origin) / extent * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            }
        }
        let (origin, size) = (self.min(), self.size());
        Vec2::new(
            axis(point.x, origin.x, size.x),
            axis(point.y, origin.y, size.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect.contains(Vec2::new(50.0, 50.0)));
        assert!(!rect.contains(Vec2::new(150.0, 50.0)));
    }

    #[test]
    fn test_percent_of_inside() {
        let rect = Rect::new(100.0, 50.0, 200.0, 100.0);
        let p = rect.percent_of(Vec2::new(150.0, 75.0));
        assert!((p.x - 25.0).abs() < 1e-9);
        assert!((p.y - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_of_clamps_outside() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let p = rect.percent_of(Vec2::new(-40.0, 500.0));
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 100.0);
    }

    #[test]
    fn test_percent_of_degenerate_rect() {
        let rect = Rect::new(10.0, 10.0, 0.0, 50.0);
        let p = rect.percent_of(Vec2::new(20.0, 35.0));
        assert_eq!(p.x, 0.0);
        assert!((p.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_corners() {
        let rect = Rect::new(1.0, 2.0, 4.0, 8.0);
        assert_eq!(rect.min(), Vec2::new(1.0, 2.0));
        assert_eq!(rect.max(), Vec2::new(5.0, 10.0));
        assert_eq!(rect.size(), Vec2::new(4.0, 8.0));
        assert_eq!(rect.center(), Vec2::new(3.0, 6.0));
    }

    #[test]
    fn test_contains_excludes_max_edge() {
        let rect = Rect::new(1.0, 2.0, 4.0, 8.0);
        assert!(rect.contains(rect.min()));
        assert!(!rect.contains(rect.max()));
        assert!(!rect.contains(Vec2::new(5.0, 3.0)));
    }
}
