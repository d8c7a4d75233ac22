//! Border and corner-template validation, and orientation resolution.

use crate::sample::cell_color;
use chromacode_core::{mean_rect, GrayImageView, RgbImageView};
use chromacode_frame::{CellColor, Resolution};

/// The dihedral correction recovered from the corner templates: a clockwise
/// quarter-turn count and an optional vertical flip, applied in the order
/// flip-then-rotate during sampling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Orientation {
    pub rotation: u8,
    pub flip: bool,
}

/// Whether the one-cell border ring of the rectified binary image is black.
pub fn border_is_black(binary: &GrayImageView<'_>, cell_size: f64, black_threshold: f64) -> bool {
    hollow_ring_mean(binary, cell_size) <= black_threshold
}

/// Mean intensity of the one-cell-wide ring at the image edge: full-width
/// top and bottom strips, plus the left and right strips between them.
fn hollow_ring_mean(binary: &GrayImageView<'_>, cell_size: f64) -> f64 {
    let size = binary.width;
    let strip = cell_size as usize;
    if strip == 0 {
        // sub-pixel cells; the template check rejects such candidates
        return 0.0;
    }
    let side_h = size - (2.0 * cell_size) as usize;

    let top = mean_rect(binary, 0, 0, size, strip);
    let bottom = mean_rect(binary, 0, size - strip, size, strip);
    let left = mean_rect(binary, 0, strip, strip, side_h);
    let right = mean_rect(binary, size - strip, strip, strip, side_h);
    (top + bottom + left + right) / 4.0
}

/// Check the four corner template cells and resolve the marker orientation.
///
/// The corners must hold two template-opposite pairs on the diagonals; the
/// white corner fixes the rotation and the aqua corner clockwise from it
/// fixes the handedness. `None` means the template does not match.
pub fn check_corners(
    rgb: &RgbImageView<'_>,
    cell_size: f64,
    resolution: Resolution,
) -> Option<Orientation> {
    let r = resolution.value();

    let top_left = cell_color(rgb, cell_size, 1, 1);
    let expected_bottom_right = top_left.template_opposite()?;
    let bottom_right = cell_color(rgb, cell_size, r, r);
    if bottom_right != expected_bottom_right {
        return None;
    }

    let bottom_left = cell_color(rgb, cell_size, 1, r);
    if bottom_left == top_left || bottom_left == bottom_right {
        return None;
    }
    let expected_top_right = bottom_left.template_opposite()?;
    let top_right = cell_color(rgb, cell_size, r, 1);
    if top_right != expected_top_right {
        return None;
    }

    // counterclockwise corner walk, starting at the scan origin
    let corners = [top_left, bottom_left, bottom_right, top_right];
    let mut rotation: usize = if top_left == CellColor::White {
        0
    } else if bottom_left == CellColor::White {
        1
    } else if bottom_right == CellColor::White {
        2
    } else {
        3
    };

    let mut flip = false;
    if corners[(rotation + 1) % 4] != CellColor::Aqua {
        rotation = if rotation == 0 || rotation == 2 {
            rotation + 1
        } else {
            rotation - 1
        };
        flip = true;
    }

    Some(Orientation {
        rotation: rotation as u8,
        flip,
    })
}
