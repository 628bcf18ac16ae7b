//! Preview rendering for calibration visualization.
//!
//! Draws the reference rows and sampling columns over a copy of the chart so
//! an operator can confirm the clicks and position table before extracting.

use image::{ImageBuffer, Rgba};

use super::calibrator::CalibrationPoints;
use crate::pipeline::XPosition;
use crate::raster::RasterImage;

/// Color constants for preview rendering.
pub const COLOR_TOP_ROW: Rgba<u8> = Rgba([0, 200, 0, 255]); // Green
pub const COLOR_BOTTOM_ROW: Rgba<u8> = Rgba([0, 160, 255, 255]); // Sky blue
pub const COLOR_COLUMN: Rgba<u8> = Rgba([255, 128, 0, 255]); // Orange

const CROSSHAIR_ARM: u32 = 6;

/// Renders the calibration rows and sampling columns onto a copy of `image`.
pub fn render_overlay(
    image: &RasterImage,
    points: &CalibrationPoints,
    positions: &[XPosition],
) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    let mut img = image.as_buffer().clone();

    for position in positions {
        draw_vline(&mut img, position.pixel_column, COLOR_COLUMN, 1);
    }

    if let Some(row) = points.pixel_row_at_max {
        draw_hline(&mut img, row, COLOR_TOP_ROW, 2);
    }
    if let Some(row) = points.pixel_row_at_min {
        draw_hline(&mut img, row, COLOR_BOTTOM_ROW, 2);
    }

    // Mark where each column crosses the top reference row
    if let Some(row) = points.pixel_row_at_max {
        for position in positions {
            draw_crosshair(&mut img, position.pixel_column, row, COLOR_COLUMN, CROSSHAIR_ARM);
        }
    }

    img
}

/// Draws a full-width horizontal line starting at row `y`, `thickness` rows tall.
pub fn draw_hline(
    img: &mut ImageBuffer<Rgba<u8>, Vec<u8>>,
    y: u32,
    color: Rgba<u8>,
    thickness: u32,
) {
    let (img_w, img_h) = img.dimensions();
    for dy in 0..thickness {
        let py = y.saturating_add(dy);
        if py >= img_h {
            break;
        }
        for px in 0..img_w {
            img.put_pixel(px, py, color);
        }
    }
}

/// Draws a full-height vertical line starting at column `x`, `thickness` columns wide.
pub fn draw_vline(
    img: &mut ImageBuffer<Rgba<u8>, Vec<u8>>,
    x: u32,
    color: Rgba<u8>,
    thickness: u32,
) {
    let (img_w, img_h) = img.dimensions();
    for dx in 0..thickness {
        let px = x.saturating_add(dx);
        if px >= img_w {
            break;
        }
        for py in 0..img_h {
            img.put_pixel(px, py, color);
        }
    }
}

/// Draws a crosshair at a point, clipped to the image.
pub fn draw_crosshair(
    img: &mut ImageBuffer<Rgba<u8>, Vec<u8>>,
    x: u32,
    y: u32,
    color: Rgba<u8>,
    arm_length: u32,
) {
    let (img_w, img_h) = img.dimensions();

    // Horizontal arm
    if y < img_h {
        for px in x.saturating_sub(arm_length)..=x.saturating_add(arm_length) {
            if px < img_w {
                img.put_pixel(px, y, color);
            }
        }
    }

    // Vertical arm
    if x < img_w {
        for py in y.saturating_sub(arm_length)..=y.saturating_add(arm_length) {
            if py < img_h {
                img.put_pixel(x, py, color);
            }
        }
    }
}
