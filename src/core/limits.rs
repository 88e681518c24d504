//! Rounded axis bounds derived from dataset extents.
//!
//! `Auto` picks the largest power of ten not exceeding 30% of the data span
//! as rounding unit and pads the data by half a unit on both sides, which
//! keeps axes stable while layers are added.

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Closed value interval used for axis limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Smallest range covering both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

impl From<(f64, f64)> for AxisRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

/// Rounding unit policy for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisUnit {
    Auto,
    Fixed(f64),
}

/// Limit configuration for the x and y axes of a dataset.
///
/// `None` units leave the raw data bounds untouched. Margins only apply to
/// fixed units; `Auto` derives its own margin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LimitOptions {
    #[serde(default)]
    pub x_unit: Option<AxisUnit>,
    #[serde(default)]
    pub y_unit: Option<AxisUnit>,
    #[serde(default)]
    pub x_margin: Option<f64>,
    #[serde(default)]
    pub y_margin: Option<f64>,
}

impl LimitOptions {
    pub const NONE: Self = Self {
        x_unit: None,
        y_unit: None,
        x_margin: None,
        y_margin: None,
    };

    #[must_use]
    pub const fn auto_y() -> Self {
        Self {
            y_unit: Some(AxisUnit::Auto),
            ..Self::NONE
        }
    }

    #[must_use]
    pub const fn auto_xy() -> Self {
        Self {
            x_unit: Some(AxisUnit::Auto),
            y_unit: Some(AxisUnit::Auto),
            ..Self::NONE
        }
    }

    #[must_use]
    pub fn with_x_unit(mut self, unit: AxisUnit) -> Self {
        self.x_unit = Some(unit);
        self
    }

    #[must_use]
    pub fn with_y_unit(mut self, unit: AxisUnit) -> Self {
        self.y_unit = Some(unit);
        self
    }

    #[must_use]
    pub fn with_margins(mut self, x_margin: f64, y_margin: f64) -> Self {
        self.x_margin = Some(x_margin);
        self.y_margin = Some(y_margin);
        self
    }

    /// Field-wise override: values set on `self` win over `defaults`.
    #[must_use]
    pub fn over(self, defaults: Self) -> Self {
        Self {
            x_unit: self.x_unit.or(defaults.x_unit),
            y_unit: self.y_unit.or(defaults.y_unit),
            x_margin: self.x_margin.or(defaults.x_margin),
            y_margin: self.y_margin.or(defaults.y_margin),
        }
    }
}

/// Largest power of ten not exceeding `value` (1.4 -> 1, 0.351 -> 0.1).
#[must_use]
pub fn largest_decimal(value: f64) -> f64 {
    10f64.powf(value.log10().floor())
}

/// Widens `[min, max]` by `margin` and snaps the ends outward to multiples of `unit`.
#[must_use]
pub fn round_limits(min: f64, max: f64, unit: f64, margin: f64) -> AxisRange {
    let min = min - margin;
    let max = max + margin;
    AxisRange::new((min / unit).floor() * unit, (max / unit).ceil() * unit)
}

/// Applies `unit` and `margin` to raw data bounds.
pub fn resolve_axis_range(
    bounds: AxisRange,
    unit: Option<AxisUnit>,
    margin: Option<f64>,
) -> PlotResult<AxisRange> {
    match unit {
        None => Ok(bounds),
        Some(AxisUnit::Auto) => {
            let span = bounds.span();
            if !span.is_finite() || span <= 0.0 {
                return Ok(bounds);
            }
            let unit = largest_decimal(span * 0.3);
            Ok(round_limits(bounds.min, bounds.max, unit, 0.5 * unit))
        }
        Some(AxisUnit::Fixed(unit)) => {
            if !unit.is_finite() || unit <= 0.0 {
                return Err(PlotError::InvalidData(format!(
                    "limit unit must be finite and > 0, got {unit}"
                )));
            }
            let margin = margin.unwrap_or(0.0);
            if !margin.is_finite() {
                return Err(PlotError::InvalidData(
                    "limit margin must be finite".to_owned(),
                ));
            }
            Ok(round_limits(bounds.min, bounds.max, unit, margin))
        }
    }
}
