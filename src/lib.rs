//! Stacked bar chart series extraction.
//!
//! Recovers the numeric table behind a stacked bar chart image:
//! - calibrate pixel rows to values from two reference clicks on the value axis
//! - sample one pixel column per category position and classify colored bands
//! - difference the calibrated band boundaries into per-series quantities
//!
//! ```no_run
//! use stacked_chart_extract::{
//!     CalibrationPoints, Calibrator, ExtractionPipeline, RasterImage, default_positions,
//!     resolve_positions,
//! };
//!
//! let image = RasterImage::from_dynamic(image::open("chart.png")?);
//! let calibrator = Calibrator::new(&CalibrationPoints {
//!     value_at_max: 2_000_000.0,
//!     value_at_min: 0.0,
//!     pixel_row_at_max: Some(40),
//!     pixel_row_at_min: Some(460),
//! })?;
//! let positions = resolve_positions(&default_positions(), image.width())?;
//! let rows = ExtractionPipeline::builder()
//!     .build()
//!     .extract(&image, &positions, &calibrator)?;
//! println!("{} rows", rows.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod calibration;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod logger;
pub mod paths;
pub mod pipeline;
pub mod raster;
pub mod scan;
pub mod series;

pub use calibration::{CalibrationPoints, CalibrationSession, CalibrationStep, Calibrator};
pub use color::{Category, ColorClassifier, PixelClassifier, Priority};
pub use config::ExtractorConfig;
pub use error::{ExtractError, Result};
pub use pipeline::{
    ExtractionPipeline, LabelOrder, OutputRow, PositionSpec, RowCutoff, RowKind, XPosition,
    default_positions, resolve_positions,
};
pub use raster::RasterImage;
pub use scan::{ScanResult, scan_column};
pub use series::{SeriesReconstructor, SeriesValues, StackOrder};
