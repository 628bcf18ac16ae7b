//! Coordinate conversion utilities.
//!
//! Operators click on a scaled rendering of the chart; these helpers map a
//! position on that display surface back to an image pixel.

/// Converts a vertical position on a display surface to a fractional image row.
///
/// `display_y` is measured from the top edge of the rendered image.
pub fn display_to_image_y(display_y: f64, display_height: f64, image_height: u32) -> f64 {
    if display_height <= 0.0 {
        return display_y;
    }
    let scale = image_height as f64 / display_height;
    display_y * scale
}

/// Converts a display position to the nearest integer image row.
///
/// Returns `None` if the position lands above the image. Positions below the
/// last row are returned as-is so the caller can report them as out of bounds.
pub fn display_to_image_row(display_y: f64, display_height: f64, image_height: u32) -> Option<u32> {
    let y = display_to_image_y(display_y, display_height, image_height).round();
    if !y.is_finite() || y < 0.0 {
        return None;
    }
    Some(y as u32)
}

/// Converts a relative position (0.0 = left edge, 1.0 = right edge) to a column.
pub fn fraction_to_column(fraction: f64, width: u32) -> u32 {
    (width as f64 * fraction).floor() as u32
}
