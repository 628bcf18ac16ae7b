//! Stacked-bar value reconstruction.
//!
//! Bands are layered in a fixed order from the baseline upward. A band's
//! magnitude is the calibrated value at its top boundary minus the value at
//! the top boundary of the band beneath it; the innermost band sits on the
//! chart baseline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calibration::Calibrator;
use crate::color::Category;
use crate::color::classifier::validate_permutation;
use crate::error::Result;
use crate::scan::ScanResult;

/// Categories ordered innermost (on the baseline) to outermost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Category>", into = "Vec<Category>")]
pub struct StackOrder(Vec<Category>);

impl StackOrder {
    pub fn new(layers: Vec<Category>) -> Result<Self> {
        validate_permutation(&layers, "stacking order")?;
        Ok(Self(layers))
    }

    pub fn layers(&self) -> &[Category] {
        &self.0
    }
}

impl Default for StackOrder {
    fn default() -> Self {
        Self(vec![Category::Red, Category::Purple, Category::Blue])
    }
}

impl TryFrom<Vec<Category>> for StackOrder {
    type Error = crate::error::ExtractError;

    fn try_from(layers: Vec<Category>) -> Result<Self> {
        Self::new(layers)
    }
}

impl From<StackOrder> for Vec<Category> {
    fn from(order: StackOrder) -> Self {
        order.0
    }
}

/// Reconstructed quantities for one sampled column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SeriesValues {
    pub total: u64,
    pub per_category: BTreeMap<Category, u64>,
}

impl SeriesValues {
    pub fn get(&self, category: Category) -> u64 {
        self.per_category.get(&category).copied().unwrap_or(0)
    }
}

/// Rounds a pixel-derived value to the nearest integer, flooring negatives at zero.
pub fn to_quantity(value: f64) -> u64 {
    let rounded = value.round();
    if rounded.is_finite() && rounded > 0.0 {
        rounded as u64
    } else {
        0
    }
}

/// Converts scan boundaries into stacked magnitudes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesReconstructor {
    stack: StackOrder,
}

impl SeriesReconstructor {
    pub fn new(stack: StackOrder) -> Self {
        Self { stack }
    }

    pub fn stack(&self) -> &StackOrder {
        &self.stack
    }

    pub fn reconstruct(&self, scan: &ScanResult, calibrator: &Calibrator) -> SeriesValues {
        let layers = self.stack.layers();
        let mut per_category = BTreeMap::new();

        for (i, &category) in layers.iter().enumerate() {
            let magnitude = match scan.row_for(category) {
                None => 0,
                Some(row) => {
                    let top = calibrator.value_at(row);
                    let below = if i == 0 {
                        calibrator.baseline()
                    } else {
                        scan.row_for(layers[i - 1])
                            .map(|r| calibrator.value_at(r))
                            .unwrap_or(top)
                    };
                    to_quantity(top - below)
                }
            };
            per_category.insert(category, magnitude);
        }

        let total = scan
            .any_top
            .map(|row| to_quantity(calibrator.value_at(row)))
            .unwrap_or(0);

        SeriesValues {
            total,
            per_category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationPoints;

    fn calibrator() -> Calibrator {
        Calibrator::new(&CalibrationPoints {
            value_at_max: 2_000_000.0,
            value_at_min: 0.0,
            pixel_row_at_max: Some(0),
            pixel_row_at_min: Some(99),
        })
        .unwrap()
    }

    fn scan(
        any: Option<u32>,
        blue: Option<u32>,
        purple: Option<u32>,
        red: Option<u32>,
    ) -> ScanResult {
        let mut result = ScanResult::default();
        for (category, row) in [
            (Category::Red, red),
            (Category::Purple, purple),
            (Category::Blue, blue),
        ] {
            if let Some(row) = row {
                result.observe(category, row);
            }
        }
        if let Some(row) = any {
            result.any_top = Some(row);
        }
        result
    }

    #[test]
    fn test_three_band_column() {
        let cal = calibrator();
        let values = SeriesReconstructor::default()
            .reconstruct(&scan(Some(0), Some(0), Some(30), Some(60)), &cal);

        assert_eq!(values.total, 2_000_000);
        assert_eq!(values.get(Category::Blue), to_quantity(cal.value_at(0) - cal.value_at(30)));
        assert_eq!(values.get(Category::Purple), to_quantity(cal.value_at(30) - cal.value_at(60)));
        assert_eq!(values.get(Category::Red), to_quantity(cal.value_at(60)));
        assert_eq!(values.get(Category::Red), 787_879);
    }

    #[test]
    fn test_empty_scan_is_all_zero() {
        let values =
            SeriesReconstructor::default().reconstruct(&ScanResult::default(), &calibrator());
        assert_eq!(values.total, 0);
        for category in Category::ALL {
            assert_eq!(values.get(category), 0);
        }
    }

    #[test]
    fn test_missing_layer_below_contributes_zero() {
        // blue directly on red, no purple band
        let values = SeriesReconstructor::default()
            .reconstruct(&scan(Some(20), Some(20), None, Some(50)), &calibrator());
        assert_eq!(values.get(Category::Purple), 0);
        assert_eq!(values.get(Category::Blue), 0);
        assert!(values.get(Category::Red) > 0);
    }

    #[test]
    fn test_negative_differences_floor_at_zero() {
        // noisy boundaries: purple observed above blue, everything below the axis
        let cal = Calibrator::new(&CalibrationPoints {
            value_at_max: 100.0,
            value_at_min: 0.0,
            pixel_row_at_max: Some(0),
            pixel_row_at_min: Some(10),
        })
        .unwrap();
        let values = SeriesReconstructor::default()
            .reconstruct(&scan(Some(2), Some(40), Some(2), Some(80)), &cal);

        assert_eq!(values.get(Category::Blue), 0);
        assert_eq!(values.get(Category::Red), 0);
        assert_eq!(values.total, 80);
    }

    #[test]
    fn test_never_negative_over_many_scans() {
        let reconstructor = SeriesReconstructor::default();
        let cal = calibrator();
        let rows = [None, Some(0), Some(15), Some(50), Some(99), Some(140)];
        for &any in &rows {
            for &blue in &rows {
                for &purple in &rows {
                    for &red in &rows {
                        let values = reconstructor.reconstruct(&scan(any, blue, purple, red), &cal);
                        // widest span is row 0 against row 140
                        assert!(values.total <= 2_000_000);
                        for category in Category::ALL {
                            assert!(values.get(category) <= 2_828_283);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_to_quantity_rounds_and_floors() {
        assert_eq!(to_quantity(2.5), 3);
        assert_eq!(to_quantity(2.4), 2);
        assert_eq!(to_quantity(-0.4), 0);
        assert_eq!(to_quantity(-1234.0), 0);
        assert_eq!(to_quantity(f64::NAN), 0);
    }

    #[test]
    fn test_custom_stack_order() {
        let stack = StackOrder::new(vec![Category::Blue, Category::Purple, Category::Red]).unwrap();
        let values = SeriesReconstructor::new(stack)
            .reconstruct(&scan(Some(0), Some(60), Some(30), Some(0)), &calibrator());
        assert_eq!(values.get(Category::Blue), 787_879);
        assert_eq!(values.get(Category::Red), 606_061);
    }

    #[test]
    fn test_stack_order_rejects_duplicates() {
        assert!(StackOrder::new(vec![Category::Red, Category::Red, Category::Blue]).is_err());
        assert!(serde_json::from_str::<StackOrder>(r#"["red","blue"]"#).is_err());
        let parsed: StackOrder = serde_json::from_str(r#"["blue","red","purple"]"#).unwrap();
        assert_eq!(parsed.layers()[2], Category::Purple);
    }
}
