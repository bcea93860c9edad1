//! Plotter configuration: coordinate domains, resolution and device settings.

use std::fmt;

use crate::defaults;
use crate::errors::{DomainError, NumericError};
use crate::mapper::CoordinateMapper;
use crate::types::Rect;

/// Settings rendered into the command preamble.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceSettings {
    pub velocity: u32,
    pub pen: u32,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            velocity: defaults::VELOCITY,
            pen: defaults::PEN,
        }
    }
}

impl DeviceSettings {
    /// Writes `VS<velocity>;!ST<pen>,0;`
    pub fn write_preamble(&self, out: &mut impl fmt::Write) -> fmt::Result {
        write!(out, "VS{};!ST{},0;", self.velocity, self.pen)
    }
}

/// Everything a controller needs to turn host events into device commands.
///
/// Built from `defaults.rs` and adjusted through the validating `with_*`
/// methods. The endpoint is optional; without one only explicit-URL posts
/// reach the network.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotterConfig {
    source_area: Rect,
    plot_area: Rect,
    units_per_mm: f64,
    device: DeviceSettings,
    endpoint: Option<String>,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            source_area: defaults::SOURCE_AREA,
            plot_area: defaults::PLOT_AREA,
            units_per_mm: defaults::UNITS_PER_MM,
            device: DeviceSettings::default(),
            endpoint: None,
        }
    }
}

impl PlotterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_area(mut self, area: Rect) -> Self {
        self.source_area = area;
        self
    }

    pub fn with_plot_area(mut self, area: Rect) -> Self {
        self.plot_area = area;
        self
    }

    /// Set the device resolution (rejects NaN, infinite, zero, negative)
    pub fn with_units_per_mm(mut self, units: f64) -> Result<Self, NumericError> {
        if units.is_nan() {
            Err(NumericError::NaN)
        } else if units.is_infinite() {
            Err(NumericError::Infinite)
        } else if units == 0.0 {
            Err(NumericError::Zero)
        } else if units < 0.0 {
            Err(NumericError::Negative)
        } else {
            self.units_per_mm = units;
            Ok(self)
        }
    }

    pub fn with_device(mut self, device: DeviceSettings) -> Self {
        self.device = device;
        self
    }

    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    pub fn source_area(&self) -> Rect { self.source_area }
    pub fn plot_area(&self) -> Rect { self.plot_area }
    pub fn units_per_mm(&self) -> f64 { self.units_per_mm }
    pub fn device(&self) -> DeviceSettings { self.device }
    pub fn endpoint(&self) -> Option<&str> { self.endpoint.as_deref() }

    /// Mapper for this configuration; fails when the source area is degenerate.
    pub fn mapper(&self) -> Result<CoordinateMapper, DomainError> {
        CoordinateMapper::try_new(self.source_area, self.plot_area, self.units_per_mm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preamble() {
        let mut out = String::new();
        DeviceSettings::default().write_preamble(&mut out).unwrap();
        assert_eq!(out, "VS50;!ST1,0;");
    }

    #[test]
    fn custom_preamble() {
        let mut out = String::new();
        DeviceSettings { velocity: 20, pen: 3 }.write_preamble(&mut out).unwrap();
        assert_eq!(out, "VS20;!ST3,0;");
    }

    #[test]
    fn units_per_mm_validation() {
        assert!(PlotterConfig::new().with_units_per_mm(10.0).is_ok());
        assert_eq!(PlotterConfig::new().with_units_per_mm(0.0), Err(NumericError::Zero));
        assert_eq!(PlotterConfig::new().with_units_per_mm(-1.0), Err(NumericError::Negative));
        assert_eq!(PlotterConfig::new().with_units_per_mm(f64::NAN), Err(NumericError::NaN));
    }

    #[test]
    fn degenerate_source_area_has_no_mapper() {
        let config = PlotterConfig::new().with_source_area(Rect::try_new(0.0, 0.0, 0.0, 10.0).unwrap());
        assert!(matches!(config.mapper(), Err(DomainError::DegenerateSource { .. })));
    }

    #[test]
    fn endpoint_is_optional() {
        assert_eq!(PlotterConfig::new().endpoint(), None);
        let config = PlotterConfig::new().with_endpoint("http://plotter.local/print");
        assert_eq!(config.endpoint(), Some("http://plotter.local/print"));
    }
}
