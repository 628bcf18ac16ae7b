//! Extraction pipeline
//!
//! Runs the column scan and series reconstruction at every sampling position
//! and collects one output row per position, in input order. A run is a pure
//! function of the image, positions and calibration: the first failing
//! position aborts the whole run.

pub mod cutoff;
pub mod positions;

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::calibration::Calibrator;
use crate::color::{Category, ColorClassifier, PixelClassifier};
use crate::error::Result;
use crate::raster::RasterImage;
use crate::scan::scan_column;
use crate::series::{SeriesReconstructor, StackOrder};

pub use cutoff::{LabelOrder, RowCutoff, RowKind};
pub use positions::{PositionSpec, XPosition, default_positions, resolve_positions};

/// One extracted bar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub label: String,
    pub kind: RowKind,
    pub values: BTreeMap<Category, u64>,
    pub total: u64,
}

impl OutputRow {
    pub fn value(&self, category: Category) -> u64 {
        self.values.get(&category).copied().unwrap_or(0)
    }
}

/// Classifier, stacking order and cutoff shared by every run.
#[derive(Clone, Debug)]
pub struct ExtractionPipeline<C = ColorClassifier> {
    classifier: C,
    reconstructor: SeriesReconstructor,
    cutoff: RowCutoff,
}

impl ExtractionPipeline<ColorClassifier> {
    pub fn builder() -> ExtractionPipelineBuilder {
        ExtractionPipelineBuilder::default()
    }
}

impl Default for ExtractionPipeline<ColorClassifier> {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl<C: PixelClassifier> ExtractionPipeline<C> {
    /// Pipeline over a custom pixel classifier.
    pub fn with_classifier(classifier: C, stack: StackOrder, cutoff: RowCutoff) -> Self {
        Self {
            classifier,
            reconstructor: SeriesReconstructor::new(stack),
            cutoff,
        }
    }

    pub fn cutoff(&self) -> &RowCutoff {
        &self.cutoff
    }

    pub fn stack(&self) -> &StackOrder {
        self.reconstructor.stack()
    }

    /// Extracts one row per position, preserving order.
    pub fn extract(
        &self,
        image: &RasterImage,
        positions: &[XPosition],
        calibrator: &Calibrator,
    ) -> Result<Vec<OutputRow>> {
        let rows = positions
            .iter()
            .map(|position| self.extract_position(image, position, calibrator))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Extracted {} rows ({} actual, {} projected)",
            rows.len(),
            rows.iter().filter(|r| r.kind == RowKind::Actual).count(),
            rows.iter().filter(|r| r.kind == RowKind::Projected).count()
        );

        Ok(rows)
    }

    fn extract_position(
        &self,
        image: &RasterImage,
        position: &XPosition,
        calibrator: &Calibrator,
    ) -> Result<OutputRow> {
        let scan = scan_column(image, position.pixel_column, &self.classifier)?;
        let series = self.reconstructor.reconstruct(&scan, calibrator);
        let kind = self.cutoff.classify(&position.label);

        debug!(
            "{} @ x={}: total={} {:?} ({})",
            position.label, position.pixel_column, series.total, series.per_category, kind
        );

        Ok(OutputRow {
            label: position.label.clone(),
            kind,
            values: series.per_category,
            total: series.total,
        })
    }
}

/// Builder for a pipeline over the default color predicates.
#[derive(Clone, Debug, Default)]
pub struct ExtractionPipelineBuilder {
    classifier: ColorClassifier,
    stack: StackOrder,
    cutoff: RowCutoff,
}

impl ExtractionPipelineBuilder {
    pub fn classifier(mut self, classifier: ColorClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn stack(mut self, stack: StackOrder) -> Self {
        self.stack = stack;
        self
    }

    pub fn cutoff(mut self, cutoff: RowCutoff) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn build(self) -> ExtractionPipeline {
        ExtractionPipeline::with_classifier(self.classifier, self.stack, self.cutoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationPoints;
    use crate::error::ExtractError;
    use image::{ImageBuffer, Rgba, RgbaImage};

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([200, 50, 50, 255]);
    const BLUE: Rgba<u8> = Rgba([50, 50, 220, 255]);

    fn calibrator() -> Calibrator {
        Calibrator::new(&CalibrationPoints {
            value_at_max: 100.0,
            value_at_min: 0.0,
            pixel_row_at_max: Some(0),
            pixel_row_at_min: Some(100),
        })
        .unwrap()
    }

    /// Columns 2 and 6 hold red bars of different heights; blue caps column 6.
    fn two_bars() -> RasterImage {
        let img: RgbaImage = ImageBuffer::from_fn(10, 101, |x, y| match (x, y) {
            (2, 50..) => RED,
            (6, 70..) => RED,
            (6, 40..=69) => BLUE,
            _ => WHITE,
        });
        RasterImage::new(img)
    }

    #[test]
    fn test_rows_follow_position_order() {
        let positions = vec![
            XPosition::new("FY'25", 6),
            XPosition::new("FY'21", 2),
            XPosition::new("FY'23", 0),
        ];
        let rows = ExtractionPipeline::builder()
            .build()
            .extract(&two_bars(), &positions, &calibrator())
            .unwrap();

        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["FY'25", "FY'21", "FY'23"]);

        assert_eq!(rows[0].kind, RowKind::Projected);
        assert_eq!(rows[0].total, 60);
        assert_eq!(rows[0].value(Category::Red), 30);
        assert_eq!(rows[0].value(Category::Blue), 0);

        assert_eq!(rows[1].kind, RowKind::Actual);
        assert_eq!(rows[1].total, 50);
        assert_eq!(rows[1].value(Category::Red), 50);

        assert_eq!(rows[2].total, 0);
    }

    #[test]
    fn test_blue_on_red_with_adjacent_stacking() {
        let stack = StackOrder::new(vec![Category::Red, Category::Blue, Category::Purple]).unwrap();
        let pipeline = ExtractionPipeline::builder().stack(stack).build();
        let rows = pipeline
            .extract(&two_bars(), &[XPosition::new("x", 6)], &calibrator())
            .unwrap();
        assert_eq!(rows[0].value(Category::Blue), 30);
        assert_eq!(rows[0].value(Category::Purple), 0);
    }

    #[test]
    fn test_out_of_bounds_aborts_run() {
        let positions = vec![XPosition::new("ok", 2), XPosition::new("bad", 10)];
        let err = ExtractionPipeline::builder()
            .build()
            .extract(&two_bars(), &positions, &calibrator())
            .unwrap_err();
        assert_eq!(err, ExtractError::ColumnOutOfBounds { column: 10, width: 10 });
    }

    #[test]
    fn test_rerun_is_identical() {
        let pipeline = ExtractionPipeline::builder().build();
        let image = two_bars();
        let positions = resolve_positions(&default_positions(), image.width()).unwrap();
        let first = pipeline.extract(&image, &positions, &calibrator()).unwrap();
        let second = pipeline.extract(&image, &positions, &calibrator()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), positions.len());
    }

    struct EverythingRed;

    impl PixelClassifier for EverythingRed {
        fn classify(&self, _r: u8, _g: u8, _b: u8) -> Option<Category> {
            Some(Category::Red)
        }
    }

    #[test]
    fn test_custom_classifier() {
        let pipeline = ExtractionPipeline::with_classifier(
            EverythingRed,
            StackOrder::default(),
            RowCutoff::default(),
        );
        let rows = pipeline
            .extract(&two_bars(), &[XPosition::new("FY'15", 0)], &calibrator())
            .unwrap();
        assert_eq!(rows[0].total, 100);
        assert_eq!(rows[0].value(Category::Red), 100);
    }
}
