//! Per-cell color sampling of the rectified image.

use crate::template::Orientation;
use chromacode_core::{mean_rect_rgb, RgbImageView};
use chromacode_frame::{CellColor, Resolution};

/// Classify the cell at grid position `(x, y)` of the rectified image.
///
/// Coordinates include the border ring, so the first data cell is `(1, 1)`.
/// The sampled window is inset by a tenth of the cell on each side to stay
/// clear of neighboring cells under perspective noise.
pub fn cell_color(rgb: &RgbImageView<'_>, cell_size: f64, x: usize, y: usize) -> CellColor {
    let padding = (cell_size / 10.0) as usize;
    let side = ((cell_size - cell_size * 2.0 / 10.0) as usize).max(1);
    // sub-pixel cells degenerate to a 1 px probe; such candidates cannot
    // pass the template check anyway
    let x0 = ((x as f64 * cell_size) as usize + padding).min(rgb.width - side);
    let y0 = ((y as f64 * cell_size) as usize + padding).min(rgb.height - side);
    CellColor::classify(mean_rect_rgb(rgb, x0, y0, side, side))
}

/// Sample every data cell into a canonical, orientation-corrected grid.
///
/// The cell read at scan position `(x, y)` lands at the grid position it
/// would have had with the marker upright: an optional vertical flip
/// followed by the resolved quarter-turn.
pub fn sample_grid(
    rgb: &RgbImageView<'_>,
    cell_size: f64,
    resolution: Resolution,
    orientation: Orientation,
    grid: &mut Vec<CellColor>,
) {
    let r = resolution.value();
    let max = r - 1;
    grid.clear();
    grid.resize(r * r, CellColor::Black);

    for x in 0..r {
        for y in 0..r {
            let mut real_x = x;
            let mut real_y = if orientation.flip { max - y } else { y };

            match orientation.rotation {
                1 => {
                    let t = real_x;
                    real_x = max - real_y;
                    real_y = t;
                }
                2 => {
                    real_x = max - real_x;
                    real_y = max - real_y;
                }
                3 => {
                    let t = real_y;
                    real_y = max - real_x;
                    real_x = t;
                }
                _ => {}
            }

            grid[real_y * r + real_x] = cell_color(rgb, cell_size, x + 1, y + 1);
        }
    }
}
