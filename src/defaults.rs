//! Default areas and device settings

use crate::types::Rect;

/// Stage coordinates of the host: 480 x 360 centered on the origin.
pub const SOURCE_AREA: Rect = Rect::new(-240.0, -180.0, 240.0, 180.0);
/// Printable sheet in millimeters.
pub const PLOT_AREA: Rect = Rect::new(0.0, 0.0, 160.0, 120.0);
/// Device steps per millimeter (0.025 mm resolution).
pub const UNITS_PER_MM: f64 = 40.0;
/// Plot speed sent with `VS`.
pub const VELOCITY: u32 = 50;
/// Tool slot selected with `!ST`.
pub const PEN: u32 = 1;
