//! Calibration of the value axis.
//!
//! An operator clicks the top and bottom of the value axis; those two rows and
//! the axis range define a linear map from image row to data value. The
//! session type sequences the clicks and the preview module renders what was
//! recorded for visual checking.

pub mod calibrator;
pub mod coords;
pub mod preview;
pub mod state;

pub use calibrator::{CalibrationPoints, Calibrator};
pub use preview::render_overlay;
pub use state::{CalibrationSession, CalibrationStep};
