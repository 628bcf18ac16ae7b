//! CSV writer for extracted series.
//!
//! Columns: label, row kind, one column per category in declaration order
//! (blue, purple, red), then the total.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::color::Category;
use crate::config::SeriesNames;
use crate::pipeline::OutputRow;

/// Builds the header row from the configured column names.
pub fn csv_header(names: &SeriesNames) -> String {
    let mut columns = vec![names.label_header.as_str(), names.kind_header.as_str()];
    columns.extend(Category::ALL.iter().map(|&c| names.header_for(c)));
    columns.push(names.total_header.as_str());
    columns.join(",")
}

/// Formats one data row.
pub fn csv_line(row: &OutputRow) -> String {
    let mut fields = vec![row.label.clone(), row.kind.to_string()];
    fields.extend(Category::ALL.iter().map(|&c| row.value(c).to_string()));
    fields.push(row.total.to_string());
    fields.join(",")
}

/// Renders the whole table, header first, without a trailing newline.
pub fn to_csv_string(rows: &[OutputRow], names: &SeriesNames) -> String {
    std::iter::once(csv_header(names))
        .chain(rows.iter().map(csv_line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the table to `path`, replacing any existing file.
pub fn write_csv(path: &Path, rows: &[OutputRow], names: &SeriesNames) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", csv_header(names)).context("Failed to write CSV header")?;
    for row in rows {
        writeln!(writer, "{}", csv_line(row)).context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV file")?;
    Ok(())
}
