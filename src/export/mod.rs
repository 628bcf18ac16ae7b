//! Output of extracted series.
//!
//! This module provides:
//! - CSV export of the output table
//! - JSON export of a full extraction report
//! - A stacked bar re-plot of the extracted values

pub mod chart;
pub mod csv_writer;
pub mod json;

pub use chart::render_stacked_chart;
pub use csv_writer::{to_csv_string, write_csv};
pub use json::{ExtractionReport, export_to_json};
