//! Single-column scanning for category band boundaries.
//!
//! A scan walks one pixel column top to bottom and remembers the first row at
//! which each category (and any category at all) appears.

use serde::Serialize;
use tracing::debug;

use crate::color::{Category, PixelClassifier};
use crate::error::{ExtractError, Result};
use crate::raster::RasterImage;

/// First-occurrence rows for one sampled column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    /// Topmost colored pixel regardless of category.
    pub any_top: Option<u32>,
    tops: [Option<u32>; Category::COUNT],
}

impl ScanResult {
    pub fn row_for(&self, category: Category) -> Option<u32> {
        self.tops[category.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.any_top.is_none()
    }

    /// Records `row` for `category` unless an earlier row is already known.
    pub fn observe(&mut self, category: Category, row: u32) {
        self.any_top.get_or_insert(row);
        self.tops[category.index()].get_or_insert(row);
    }
}

/// Scans `column` of `image` from row 0 downward.
pub fn scan_column<C: PixelClassifier + ?Sized>(
    image: &RasterImage,
    column: u32,
    classifier: &C,
) -> Result<ScanResult> {
    let width = image.width();
    if column >= width {
        return Err(ExtractError::ColumnOutOfBounds { column, width });
    }

    let mut result = ScanResult::default();
    for row in 0..image.height() {
        let Some([r, g, b]) = image.rgb(column, row) else {
            break;
        };
        if let Some(category) = classifier.classify(r, g, b) {
            result.observe(category, row);
        }
    }

    debug!(
        "Column {}: any={:?} blue={:?} purple={:?} red={:?}",
        column,
        result.any_top,
        result.row_for(Category::Blue),
        result.row_for(Category::Purple),
        result.row_for(Category::Red)
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorClassifier;
    use image::{ImageBuffer, Rgba, RgbaImage};

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([200, 50, 50, 255]);
    const PURPLE: Rgba<u8> = Rgba([150, 30, 140, 255]);
    const BLUE: Rgba<u8> = Rgba([50, 50, 220, 255]);

    fn stacked_column() -> RasterImage {
        let img: RgbaImage = ImageBuffer::from_fn(10, 100, |x, y| {
            if x != 5 {
                WHITE
            } else if y >= 60 {
                RED
            } else if y >= 30 {
                PURPLE
            } else if y >= 10 {
                BLUE
            } else {
                WHITE
            }
        });
        RasterImage::new(img)
    }

    #[test]
    fn test_scan_records_first_rows() {
        let result = scan_column(&stacked_column(), 5, &ColorClassifier::default()).unwrap();

        assert_eq!(result.any_top, Some(10));
        assert_eq!(result.row_for(Category::Blue), Some(10));
        assert_eq!(result.row_for(Category::Purple), Some(30));
        assert_eq!(result.row_for(Category::Red), Some(60));
    }

    #[test]
    fn test_scan_background_column_is_empty() {
        let result = scan_column(&stacked_column(), 2, &ColorClassifier::default()).unwrap();
        assert!(result.is_empty());
        for category in Category::ALL {
            assert_eq!(result.row_for(category), None);
        }
    }

    #[test]
    fn test_scan_keeps_first_match_only() {
        // red, gap, red again lower down
        let img: RgbaImage = ImageBuffer::from_fn(1, 20, |_, y| match y {
            3..=5 | 12..=19 => RED,
            _ => WHITE,
        });
        let result = scan_column(&RasterImage::new(img), 0, &ColorClassifier::default()).unwrap();
        assert_eq!(result.row_for(Category::Red), Some(3));
        assert_eq!(result.any_top, Some(3));
    }

    #[test]
    fn test_scan_row_zero_is_recorded() {
        let img: RgbaImage = ImageBuffer::from_pixel(1, 5, BLUE);
        let result = scan_column(&RasterImage::new(img), 0, &ColorClassifier::default()).unwrap();
        assert_eq!(result.any_top, Some(0));
        assert_eq!(result.row_for(Category::Blue), Some(0));
    }

    #[test]
    fn test_scan_column_out_of_bounds() {
        let err = scan_column(&stacked_column(), 10, &ColorClassifier::default()).unwrap_err();
        assert_eq!(err, ExtractError::ColumnOutOfBounds { column: 10, width: 10 });
    }
}
