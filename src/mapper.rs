//! Screen-to-device coordinate mapping.
//!
//! The plotter feeds paper along its X axis, so the mapping swaps axes:
//! source X drives device Y and source Y drives device X. Each axis is
//! rescaled independently and multiplied by the device resolution. Points are
//! never clamped; anything outside the source area lands outside the plot
//! area by the same ratio.

use crate::errors::DomainError;
use crate::types::{Point, Rect, pt};

/// Map `point` from `source` into `target`, in device units.
///
/// ```text
/// out.x = (p.y - source.min_y) * target.height / source.height * units
/// out.y = (p.x - source.min_x) * target.width  / source.width  * units
/// ```
pub fn map_point(
    point: Point,
    source: Rect,
    target: Rect,
    units_per_target_unit: f64,
) -> Result<Point, DomainError> {
    if source.is_degenerate() {
        return Err(DomainError::DegenerateSource {
            width: source.width(),
            height: source.height(),
        });
    }
    if !point.is_finite() {
        return Err(DomainError::NonFinitePoint { x: point.x, y: point.y });
    }

    let x = (point.y - source.min_y()) * target.height() / source.height() * units_per_target_unit;
    let y = (point.x - source.min_x()) * target.width() / source.width() * units_per_target_unit;
    Ok(pt(x, y))
}

/// The three mapping inputs that stay fixed for a plotting session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    source: Rect,
    target: Rect,
    units_per_mm: f64,
}

impl CoordinateMapper {
    /// Rejects a degenerate source area up front so every later `map` only
    /// has to look at the point.
    pub fn try_new(source: Rect, target: Rect, units_per_mm: f64) -> Result<Self, DomainError> {
        if source.is_degenerate() {
            return Err(DomainError::DegenerateSource {
                width: source.width(),
                height: source.height(),
            });
        }
        Ok(Self { source, target, units_per_mm })
    }

    pub fn map(&self, point: Point) -> Result<Point, DomainError> {
        map_point(point, self.source, self.target, self.units_per_mm)
    }

    pub fn source(&self) -> Rect {
        self.source
    }

    pub fn target(&self) -> Rect {
        self.target
    }

    pub fn units_per_mm(&self) -> f64 {
        self.units_per_mm
    }
}
