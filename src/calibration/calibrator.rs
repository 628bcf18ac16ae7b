//! Linear pixel-row to value mapping from two reference clicks.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ExtractError, Result};

/// Two reference rows on the value axis plus the values they represent.
///
/// Row indices grow downward, so `pixel_row_at_max` is normally the smaller one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoints {
    pub value_at_max: f64,
    pub value_at_min: f64,
    pub pixel_row_at_max: Option<u32>,
    pub pixel_row_at_min: Option<u32>,
}

impl CalibrationPoints {
    /// Points with an axis range but no clicks recorded yet.
    pub fn with_range(value_at_max: f64, value_at_min: f64) -> Self {
        Self {
            value_at_max,
            value_at_min,
            pixel_row_at_max: None,
            pixel_row_at_min: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.pixel_row_at_max.is_some() && self.pixel_row_at_min.is_some()
    }
}

impl Default for CalibrationPoints {
    fn default() -> Self {
        Self::with_range(2_000_000.0, 0.0)
    }
}

/// Validated affine map from image row to data value.
///
/// Rows outside the calibrated span extrapolate linearly; nothing is clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibrator {
    value_at_max: f64,
    value_at_min: f64,
    row_at_max: u32,
    row_at_min: u32,
}

impl Calibrator {
    pub fn new(points: &CalibrationPoints) -> Result<Self> {
        let row_at_max = points
            .pixel_row_at_max
            .ok_or(ExtractError::CalibrationIncomplete { missing: "top" })?;
        let row_at_min = points
            .pixel_row_at_min
            .ok_or(ExtractError::CalibrationIncomplete { missing: "bottom" })?;

        if row_at_max == row_at_min {
            return Err(ExtractError::DegenerateCalibration { row: row_at_max });
        }
        if row_at_max > row_at_min {
            warn!(
                "Top reference row {} is below bottom reference row {}; axis is inverted",
                row_at_max, row_at_min
            );
        }

        Ok(Self {
            value_at_max: points.value_at_max,
            value_at_min: points.value_at_min,
            row_at_max,
            row_at_min,
        })
    }

    /// Value at a (possibly fractional) row.
    pub fn value(&self, row: f64) -> f64 {
        let top = self.row_at_max as f64;
        let bottom = self.row_at_min as f64;
        let ratio = (row - top) / (bottom - top);
        self.value_at_max - ratio * (self.value_at_max - self.value_at_min)
    }

    pub fn value_at(&self, row: u32) -> f64 {
        self.value(row as f64)
    }

    /// Value of the chart baseline (the bottom reference row).
    pub fn baseline(&self) -> f64 {
        self.value_at_min
    }

    pub fn row_at_max(&self) -> u32 {
        self.row_at_max
    }

    pub fn row_at_min(&self) -> u32 {
        self.row_at_min
    }
}
