//! JSON export of an extraction run.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::calibration::CalibrationPoints;
use crate::pipeline::OutputRow;

/// Everything needed to reproduce or audit a run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub extracted_at: DateTime<Local>,
    pub image_width: u32,
    pub image_height: u32,
    pub calibration: CalibrationPoints,
    pub rows: Vec<OutputRow>,
}

impl ExtractionReport {
    pub fn new(
        image_width: u32,
        image_height: u32,
        calibration: CalibrationPoints,
        rows: Vec<OutputRow>,
    ) -> Self {
        Self {
            extracted_at: Local::now(),
            image_width,
            image_height,
            calibration,
            rows,
        }
    }
}

/// Export the report to a JSON file.
///
/// The output is pretty-printed for human readability.
pub fn export_to_json(report: &ExtractionReport, output_path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")?;

    let mut file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON file: {}", output_path.display()))?;

    file.write_all(json.as_bytes())
        .context("Failed to write JSON data")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Category;
    use crate::pipeline::RowKind;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    #[test]
    fn test_export_to_json() {
        let report = ExtractionReport::new(
            640,
            480,
            CalibrationPoints {
                value_at_max: 2_000_000.0,
                value_at_min: 0.0,
                pixel_row_at_max: Some(12),
                pixel_row_at_min: Some(430),
            },
            vec![OutputRow {
                label: "FY'23".to_string(),
                kind: RowKind::Actual,
                values: BTreeMap::from([(Category::Blue, 10), (Category::Red, 30)]),
                total: 40,
            }],
        );

        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        export_to_json(&report, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["image_width"], 640);
        assert_eq!(value["calibration"]["pixel_row_at_min"], 430);
        assert_eq!(value["rows"][0]["kind"], "Actual");
        assert_eq!(value["rows"][0]["values"]["blue"], 10);
        assert_eq!(value["rows"][0]["total"], 40);
        assert!(value["extracted_at"].is_string());
    }
}
