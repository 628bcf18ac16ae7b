//! Stacked bar re-plot of extracted series using plotters.
//!
//! Drawing the recovered numbers as a chart again makes it easy to compare
//! against the source image and spot a misplaced column or bad calibration.

use anyhow::{Context, Result, anyhow};
use plotters::prelude::*;
use std::path::Path;

use crate::color::Category;
use crate::config::SeriesNames;
use crate::pipeline::{OutputRow, RowKind};
use crate::series::StackOrder;

const CHART_WIDTH: u32 = 1000;
const CHART_HEIGHT: u32 = 600;
const BAR_INSET: f64 = 0.15;
/// Opacity of projected bars over the white background.
const PROJECTED_ALPHA: f64 = 0.55;

/// Fill color per category.
pub fn category_color(category: Category) -> RGBColor {
    match category {
        Category::Blue => RGBColor(45, 90, 210),
        Category::Purple => RGBColor(140, 60, 160),
        Category::Red => RGBColor(205, 50, 50),
    }
}

/// Sum of the stacked magnitudes of one row.
fn stacked_height(row: &OutputRow) -> u64 {
    Category::ALL.iter().map(|&c| row.value(c)).sum()
}

/// Upper bound of the value axis: tallest bar or total plus 10% headroom.
fn value_axis_max(rows: &[OutputRow]) -> f64 {
    let tallest = rows
        .iter()
        .map(|r| stacked_height(r).max(r.total))
        .max()
        .unwrap_or(0)
        .max(1);
    tallest as f64 * 1.1
}

/// Renders rows as a stacked bar chart PNG. Projected rows are drawn lighter.
pub fn render_stacked_chart(
    rows: &[OutputRow],
    stack: &StackOrder,
    names: &SeriesNames,
    output_path: &Path,
) -> Result<()> {
    if rows.is_empty() {
        return Err(anyhow!("No rows to plot"));
    }

    let root = BitMapBackend::new(output_path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .context("Failed to fill chart background")?;

    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    let grid_color = RGBColor(220, 220, 220);

    let mut chart = ChartBuilder::on(&root)
        .caption("Extracted series", ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d(0.0f64..rows.len() as f64, 0.0f64..value_axis_max(rows))
        .context("Failed to build chart")?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(rows.len())
        .x_label_formatter(&|x| {
            labels
                .get(x.floor() as usize)
                .map(|s| s.to_string())
                .unwrap_or_default()
        })
        .x_desc(names.label_header.as_str())
        .y_label_formatter(&|y| format!("{:.0}", y))
        .light_line_style(grid_color)
        .bold_line_style(grid_color.mix(0.8))
        .draw()
        .context("Failed to draw mesh")?;

    for (i, row) in rows.iter().enumerate() {
        let x0 = i as f64 + BAR_INSET;
        let x1 = (i + 1) as f64 - BAR_INSET;
        let mut base = 0.0;

        for &category in stack.layers() {
            let height = row.value(category) as f64;
            if height <= 0.0 {
                continue;
            }
            let color = category_color(category);
            let style = match row.kind {
                RowKind::Actual => color.filled(),
                RowKind::Projected => color.mix(PROJECTED_ALPHA).filled(),
            };
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x0, base), (x1, base + height)],
                    style,
                )))
                .context("Failed to draw bar segment")?;
            base += height;
        }
    }

    // Legend, outermost band first to match the visual stacking
    for &category in stack.layers().iter().rev() {
        let color = category_color(category);
        chart
            .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())
            .context("Failed to register legend entry")?
            .label(names.header_for(category))
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .context("Failed to draw legend")?;

    root.present().context("Failed to save chart")?;
    Ok(())
}
