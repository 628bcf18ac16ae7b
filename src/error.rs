//! Error types for the extraction core.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("Calibration incomplete: {missing} reference row is not set")]
    CalibrationIncomplete { missing: &'static str },

    #[error("Degenerate calibration: both reference points are on row {row}")]
    DegenerateCalibration { row: u32 },

    #[error("Column {column} is outside the image (width {width})")]
    ColumnOutOfBounds { column: u32, width: u32 },

    #[error("Click on row {row} is outside the image (height {height})")]
    ClickOutOfBounds { row: u32, height: u32 },

    #[error("Cannot {action} while {step}")]
    OutOfSequence { step: String, action: &'static str },

    #[error("Invalid stack order: {0}")]
    InvalidStackOrder(String),

    #[error("Invalid position {label}: fraction {fraction} is not within 0.0..=1.0")]
    InvalidPosition { label: String, fraction: f64 },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
