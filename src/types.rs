//! Geometry primitives: points and axis-aligned rectangles.

use glam::DVec2;

use crate::errors::NumericError;

/// A position in either the source (screen) or device (plot) domain.
pub type Point = DVec2;

/// Shorthand for building a [`Point`].
#[inline]
pub fn pt(x: f64, y: f64) -> Point {
    DVec2::new(x, y)
}

/// Axis-aligned rectangle describing a coordinate domain.
///
/// Immutable once built. `min <= max` holds on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    min: Point,
    max: Point,
}

impl Rect {
    /// Create a rectangle from trusted constants (unchecked).
    /// Use `try_new` for user-provided values.
    pub(crate) const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Rect {
            min: DVec2::new(min_x, min_y),
            max: DVec2::new(max_x, max_y),
        }
    }

    /// Create a rectangle with validation (rejects NaN, infinite and inverted bounds)
    pub fn try_new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self, NumericError> {
        for v in [min_x, min_y, max_x, max_y] {
            if v.is_nan() {
                return Err(NumericError::NaN);
            }
            if v.is_infinite() {
                return Err(NumericError::Infinite);
            }
        }
        if min_x > max_x {
            return Err(NumericError::Inverted { min: min_x, max: max_x });
        }
        if min_y > max_y {
            return Err(NumericError::Inverted { min: min_y, max: max_y });
        }
        Ok(Self::new(min_x, min_y, max_x, max_y))
    }

    /// Rectangle anchored at the origin with the given extent, e.g. a sheet in millimeters.
    pub fn sized(width: f64, height: f64) -> Result<Self, NumericError> {
        Self::try_new(0.0, 0.0, width, height)
    }

    /// Smallest rectangle covering every point, `None` when there are none.
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Rect { min, max })
    }

    pub fn min_x(&self) -> f64 { self.min.x }
    pub fn min_y(&self) -> f64 { self.min.y }
    pub fn max_x(&self) -> f64 { self.max.x }
    pub fn max_y(&self) -> f64 { self.max.y }

    pub fn min(&self) -> Point { self.min }
    pub fn max(&self) -> Point { self.max }

    pub fn width(&self) -> f64 { self.max.x - self.min.x }
    pub fn height(&self) -> f64 { self.max.y - self.min.y }

    /// True when either side has zero length
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    /// Inclusive containment test
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_width_height() {
        let r = Rect::try_new(-240.0, -180.0, 240.0, 180.0).unwrap();
        assert_eq!(r.width(), 480.0);
        assert_eq!(r.height(), 360.0);
        assert!(!r.is_degenerate());
    }

    #[test]
    fn rect_try_new_rejects_nan() {
        assert_eq!(Rect::try_new(f64::NAN, 0.0, 1.0, 1.0), Err(NumericError::NaN));
    }

    #[test]
    fn rect_try_new_rejects_infinity() {
        assert_eq!(Rect::try_new(0.0, 0.0, f64::INFINITY, 1.0), Err(NumericError::Infinite));
    }

    #[test]
    fn rect_try_new_rejects_inverted_bounds() {
        assert_eq!(
            Rect::try_new(5.0, 0.0, 1.0, 1.0),
            Err(NumericError::Inverted { min: 5.0, max: 1.0 })
        );
        assert!(Rect::try_new(0.0, 3.0, 1.0, 2.0).is_err());
    }

    #[test]
    fn rect_zero_extent_is_degenerate() {
        let r = Rect::try_new(1.0, 0.0, 1.0, 10.0).unwrap();
        assert!(r.is_degenerate());
        assert_eq!(r.width(), 0.0);
    }

    #[test]
    fn rect_sized_is_anchored_at_origin() {
        let r = Rect::sized(160.0, 120.0).unwrap();
        assert_eq!(r.min(), pt(0.0, 0.0));
        assert_eq!(r.max(), pt(160.0, 120.0));
    }

    #[test]
    fn rect_enclosing_points() {
        let r = Rect::enclosing([pt(50.0, 1.0), pt(10.0, 7.0), pt(30.0, -2.0)]).unwrap();
        assert_eq!(r.min(), pt(10.0, -2.0));
        assert_eq!(r.max(), pt(50.0, 7.0));
        assert!(r.contains(pt(30.0, 0.0)));
        assert!(!r.contains(pt(51.0, 0.0)));
    }

    #[test]
    fn rect_enclosing_nothing() {
        assert_eq!(Rect::enclosing(std::iter::empty()), None);
    }
}
