//! Extraction configuration loaded from config.json.
//!
//! Holds the chart layout (sampling positions, stacking order, cutoff label),
//! the default axis range and the export column names. Missing fields fall
//! back to the defaults, which describe the fiscal-year truck sales chart.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::color::{Category, ColorClassifier, Priority};
use crate::pipeline::{ExtractionPipeline, LabelOrder, PositionSpec, RowCutoff, default_positions};
use crate::series::StackOrder;

/// Value range of the calibrated axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// Value at the top reference click
    pub value_at_max: f64,
    /// Value at the bottom reference click
    pub value_at_min: f64,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            value_at_max: 2_000_000.0,
            value_at_min: 0.0,
        }
    }
}

/// Export column headers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesNames {
    pub label_header: String,
    pub kind_header: String,
    pub total_header: String,
    pub blue: String,
    pub purple: String,
    pub red: String,
}

impl SeriesNames {
    pub fn header_for(&self, category: Category) -> &str {
        match category {
            Category::Blue => &self.blue,
            Category::Purple => &self.purple,
            Category::Red => &self.red,
        }
    }
}

impl Default for SeriesNames {
    fn default() -> Self {
        Self {
            label_header: "Year".to_string(),
            kind_header: "Type".to_string(),
            total_header: "Total".to_string(),
            blue: "HDV".to_string(),
            purple: "LCV".to_string(),
            red: "MDV".to_string(),
        }
    }
}

/// Complete extraction configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub axis: AxisConfig,
    /// Sampling columns, left to right, as fractions of image width
    pub positions: Vec<PositionSpec>,
    /// Last label reported as actual data
    pub actual_cutoff: String,
    pub label_order: LabelOrder,
    /// Bands from the baseline upward
    pub stacking: StackOrder,
    /// Tie-break order when more than one color predicate matches
    pub priority: Priority,
    pub series: SeriesNames,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            axis: AxisConfig::default(),
            positions: default_positions(),
            actual_cutoff: "FY'23".to_string(),
            label_order: LabelOrder::default(),
            stacking: StackOrder::default(),
            priority: Priority::default(),
            series: SeriesNames::default(),
        }
    }
}

impl ExtractorConfig {
    /// Loads config from file, or returns defaults if it is missing or unreadable.
    pub fn load(config_path: &Path) -> Self {
        if !config_path.exists() {
            info!("{} not found. Using default config.", config_path.display());
            return Self::default();
        }
        match Self::from_file(config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{:#}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Loads config from a file that must exist and parse.
    pub fn from_file(config_path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", config_path.display()))?;
        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Saves the default config to file (for reference and editing).
    pub fn save_default(config_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&Self::default())
            .context("Failed to serialize default config")?;
        fs::write(config_path, json)
            .with_context(|| format!("Failed to write config {}", config_path.display()))
    }

    pub fn cutoff(&self) -> RowCutoff {
        RowCutoff::new(self.actual_cutoff.clone(), self.label_order)
    }

    /// Builds the pipeline this config describes.
    pub fn pipeline(&self) -> ExtractionPipeline {
        ExtractionPipeline::builder()
            .classifier(ColorClassifier::new(self.priority.clone()))
            .stack(self.stacking.clone())
            .cutoff(self.cutoff())
            .build()
    }
}
