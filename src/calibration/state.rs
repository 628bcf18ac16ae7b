//! Calibration session state tracking.
//!
//! Tracks which reference rows have been recorded and the current step in the
//! workflow. The session only gates the order of operator actions; the
//! calibrator itself re-validates its inputs on every call.

use std::fmt;

use tracing::{debug, info};

use super::calibrator::{CalibrationPoints, Calibrator};
use crate::error::{ExtractError, Result};

/// Steps in the calibration workflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationStep {
    /// No chart image loaded yet.
    AwaitingImage,
    /// Waiting for a click on the top of the value axis.
    AwaitingTopPoint,
    /// Waiting for a click on the bottom of the value axis.
    AwaitingBottomPoint,
    /// Both reference rows set; axis range may still be edited.
    Calibrated,
    /// Series have been extracted with the current calibration.
    Extracted,
}

impl CalibrationStep {
    /// Returns a human-readable description of the current step.
    pub fn description(&self) -> String {
        match self {
            Self::AwaitingImage => "Load a chart image".to_string(),
            Self::AwaitingTopPoint => "Click the TOP of the value axis".to_string(),
            Self::AwaitingBottomPoint => "Click the BOTTOM of the value axis".to_string(),
            Self::Calibrated => "Calibration complete, adjust the axis range if needed".to_string(),
            Self::Extracted => "Extraction complete".to_string(),
        }
    }

    /// Returns the step number (1-based) for display.
    pub fn step_number(&self) -> usize {
        match self {
            Self::AwaitingImage => 1,
            Self::AwaitingTopPoint => 2,
            Self::AwaitingBottomPoint => 3,
            Self::Calibrated => 4,
            Self::Extracted => 5,
        }
    }

    /// Total number of steps in the workflow.
    pub fn total_steps() -> usize {
        5
    }
}

impl fmt::Display for CalibrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingImage => write!(f, "awaiting image"),
            Self::AwaitingTopPoint => write!(f, "awaiting top point"),
            Self::AwaitingBottomPoint => write!(f, "awaiting bottom point"),
            Self::Calibrated => write!(f, "calibrated"),
            Self::Extracted => write!(f, "extracted"),
        }
    }
}

/// One operator's calibration run over a single image.
#[derive(Clone, Debug)]
pub struct CalibrationSession {
    step: CalibrationStep,
    points: CalibrationPoints,
    image_height: Option<u32>,
}

impl CalibrationSession {
    /// Starts a session with the given axis range and no image.
    pub fn new(value_at_max: f64, value_at_min: f64) -> Self {
        Self {
            step: CalibrationStep::AwaitingImage,
            points: CalibrationPoints::with_range(value_at_max, value_at_min),
            image_height: None,
        }
    }

    pub fn step(&self) -> CalibrationStep {
        self.step
    }

    pub fn points(&self) -> &CalibrationPoints {
        &self.points
    }

    /// Loads (or replaces) the image. Recorded rows are cleared, the range is kept.
    pub fn load_image(&mut self, width: u32, height: u32) {
        info!("Image loaded: {}x{}", width, height);
        self.points.pixel_row_at_max = None;
        self.points.pixel_row_at_min = None;
        self.image_height = Some(height);
        self.step = CalibrationStep::AwaitingTopPoint;
    }

    /// Records a click on image row `row` for the reference point the current step expects.
    pub fn record_click(&mut self, row: u32) -> Result<CalibrationStep> {
        let awaiting_click = matches!(
            self.step,
            CalibrationStep::AwaitingTopPoint | CalibrationStep::AwaitingBottomPoint
        );
        let height = match self.image_height {
            Some(h) if awaiting_click => h,
            _ => return Err(self.out_of_sequence("record a reference click")),
        };
        if row >= height {
            return Err(ExtractError::ClickOutOfBounds { row, height });
        }

        match self.step {
            CalibrationStep::AwaitingTopPoint => {
                self.points.pixel_row_at_max = Some(row);
                info!("Top axis point set at row {}", row);
                self.step = CalibrationStep::AwaitingBottomPoint;
            }
            _ => {
                self.points.pixel_row_at_min = Some(row);
                info!("Bottom axis point set at row {}", row);
                self.step = CalibrationStep::Calibrated;
            }
        }
        Ok(self.step)
    }

    /// Edits the axis range. Allowed once calibrated; re-opens an extracted session.
    pub fn set_axis_range(&mut self, value_at_max: f64, value_at_min: f64) -> Result<()> {
        match self.step {
            CalibrationStep::Calibrated | CalibrationStep::Extracted => {
                debug!("Axis range set to {}..{}", value_at_min, value_at_max);
                self.points.value_at_max = value_at_max;
                self.points.value_at_min = value_at_min;
                self.step = CalibrationStep::Calibrated;
                Ok(())
            }
            _ => Err(self.out_of_sequence("edit the axis range")),
        }
    }

    /// Builds the calibrator from the recorded points.
    pub fn calibrator(&self) -> Result<Calibrator> {
        Calibrator::new(&self.points)
    }

    pub fn mark_extracted(&mut self) -> Result<()> {
        if self.step != CalibrationStep::Calibrated {
            return Err(self.out_of_sequence("finish extraction"));
        }
        self.step = CalibrationStep::Extracted;
        Ok(())
    }

    fn out_of_sequence(&self, action: &'static str) -> ExtractError {
        ExtractError::OutOfSequence {
            step: self.step.to_string(),
            action,
        }
    }
}

impl Default for CalibrationSession {
    fn default() -> Self {
        let points = CalibrationPoints::default();
        Self::new(points.value_at_max, points.value_at_min)
    }
}
