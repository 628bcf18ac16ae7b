//! Sampling positions along the category axis.

use serde::{Deserialize, Serialize};

use crate::calibration::coords::fraction_to_column;
use crate::error::{ExtractError, Result};

/// A named sampling column in image pixels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XPosition {
    pub label: String,
    pub pixel_column: u32,
}

impl XPosition {
    pub fn new(label: impl Into<String>, pixel_column: u32) -> Self {
        Self {
            label: label.into(),
            pixel_column,
        }
    }
}

/// A named sampling column as a fraction of image width, so one table fits
/// every rendering of the same chart layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionSpec {
    pub label: String,
    /// 0.0 = left edge, 1.0 = right edge
    pub fraction: f64,
}

impl PositionSpec {
    pub fn new(label: impl Into<String>, fraction: f64) -> Self {
        Self {
            label: label.into(),
            fraction,
        }
    }

    /// Resolves to `floor(width * fraction)`.
    pub fn resolve(&self, width: u32) -> Result<XPosition> {
        if !(0.0..=1.0).contains(&self.fraction) {
            return Err(ExtractError::InvalidPosition {
                label: self.label.clone(),
                fraction: self.fraction,
            });
        }
        Ok(XPosition::new(
            self.label.clone(),
            fraction_to_column(self.fraction, width),
        ))
    }
}

/// Resolves a whole table, preserving order.
pub fn resolve_positions(specs: &[PositionSpec], width: u32) -> Result<Vec<XPosition>> {
    specs.iter().map(|spec| spec.resolve(width)).collect()
}

/// Fiscal-year table of the truck sales chart this tool was first built for.
pub fn default_positions() -> Vec<PositionSpec> {
    const TABLE: [(&str, f64); 13] = [
        ("FY'15", 0.12),
        ("FY'17", 0.20),
        ("FY'19", 0.28),
        ("FY'21", 0.36),
        ("FY'23", 0.44),
        ("FY'25", 0.52),
        ("FY'27", 0.60),
        ("FY'29", 0.68),
        ("FY'31", 0.76),
        ("FY'33", 0.84),
        ("FY'35", 0.88),
        ("FY'37", 0.92),
        ("FY'39", 0.96),
    ];
    TABLE
        .iter()
        .map(|&(label, fraction)| PositionSpec::new(label, fraction))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_resolves_in_order() {
        let positions = resolve_positions(&default_positions(), 1000).unwrap();
        assert_eq!(positions.len(), 13);
        assert_eq!(positions[0], XPosition::new("FY'15", 120));
        assert_eq!(positions[4], XPosition::new("FY'23", 440));
        assert_eq!(positions[12], XPosition::new("FY'39", 960));
        assert!(positions.windows(2).all(|w| w[0].pixel_column < w[1].pixel_column));
    }

    #[test]
    fn test_resolve_rejects_bad_fraction() {
        let err = PositionSpec::new("late", 1.5).resolve(100).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidPosition { .. }));
        assert!(PositionSpec::new("nan", f64::NAN).resolve(100).is_err());
    }

    #[test]
    fn test_right_edge_resolves_past_last_column() {
        // scanning reports this as out of bounds
        let pos = PositionSpec::new("edge", 1.0).resolve(100).unwrap();
        assert_eq!(pos.pixel_column, 100);
    }
}
