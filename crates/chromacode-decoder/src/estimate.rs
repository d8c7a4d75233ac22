//! Adaptive grid-resolution estimation from the rectified binary image.
//!
//! The black border ring is one cell wide, so its thickness measures the
//! cell size. Four diagonal scans run inward from the corners until the
//! local neighborhood stops being black; the step counts are combined as a
//! harmonic mean, which tolerates one or two scans shooting through a
//! damaged corner.

use chromacode_core::{mean_rect, GrayImageView};
use chromacode_frame::Resolution;

/// Measure the border cell size of a rectified binary image.
///
/// `scan_length` and `black_threshold` come from the decoder params; the
/// image must be the square canonical rectification.
pub fn measure_cell_size(binary: &GrayImageView<'_>, scan_length: usize, black_threshold: f64) -> f64 {
    let size = binary.width as i32;
    let skip = size / 130;
    let max_steps = size / 10 - skip;
    let far = size - skip - 1;
    let offset = scan_length as i32 - 1;

    let mut reciprocal_sum = 0.0f64;
    for (start_x, start_y, step_x, step_y, offset_x, offset_y) in [
        (skip, skip, 1, 1, 0, 1),                    // top left
        (skip, far, 1, -1, 0, -1 - offset),          // bottom left
        (far, skip, -1, 1, -offset, 1),              // top right
        (far, far, -1, -1, -offset, -1 - offset),    // bottom right
    ] {
        let steps = first_non_black(
            binary,
            max_steps,
            start_x,
            start_y,
            step_x,
            step_y,
            offset_x,
            offset_y,
            scan_length,
            black_threshold,
        );
        reciprocal_sum += 1.0 / steps as f64;
    }

    skip as f64 + 1.0 / (reciprocal_sum / 4.0)
}

/// Walk diagonally inward until the L-shaped window around the scan point
/// stops being black, or `max_steps` is reached.
#[allow(clippy::too_many_arguments)]
fn first_non_black(
    binary: &GrayImageView<'_>,
    max_steps: i32,
    start_x: i32,
    start_y: i32,
    step_x: i32,
    step_y: i32,
    offset_x: i32,
    offset_y: i32,
    scan_length: usize,
    black_threshold: f64,
) -> i32 {
    let scan_width = scan_length;
    let scan_height = scan_length - 1;

    for steps in 0..max_steps {
        let x = start_x + steps * step_x;
        let y = start_y + steps * step_y;

        let horizontal = mean_rect(binary, (x + offset_x) as usize, y as usize, scan_width, 1);
        let vertical = mean_rect(binary, x as usize, (y + offset_y) as usize, 1, scan_height);
        if (horizontal + vertical) / 2.0 > black_threshold {
            return steps;
        }
    }
    max_steps
}

/// Estimate the frame resolution of a rectified binary image.
pub fn estimate_resolution(
    binary: &GrayImageView<'_>,
    scan_length: usize,
    black_threshold: f64,
) -> Resolution {
    let cell_size = measure_cell_size(binary, scan_length, black_threshold);
    Resolution::nearest(cell_size, binary.width)
}
