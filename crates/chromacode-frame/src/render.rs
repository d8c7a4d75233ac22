//! Frame rendering: content chunks -> color grid -> displayable marker.

use crate::{for_each_chunk, template_cells, CellColor, Resolution};
use chromacode_core::RgbImage;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FrameError {
    #[error("expected {expected} content chunks for the resolution, got {got}")]
    ChunkCountMismatch { expected: usize, got: usize },

    #[error("chunk {index} out of 12-bit range: {value}")]
    ChunkOutOfRange { index: usize, value: u16 },
}

/// Render content chunks into a row-major `resolution x resolution` color
/// grid: template cells first, then every chunk at its wire position with
/// the positional mask applied.
pub fn render_grid(chunks: &[u16], resolution: Resolution) -> Result<Vec<CellColor>, FrameError> {
    let expected = resolution.content_chunks();
    if chunks.len() != expected {
        return Err(FrameError::ChunkCountMismatch {
            expected,
            got: chunks.len(),
        });
    }
    if let Some((index, &value)) = chunks.iter().enumerate().find(|(_, &v)| v >= 4096) {
        return Err(FrameError::ChunkOutOfRange { index, value });
    }

    let r = resolution.value();
    let mut grid = vec![CellColor::Black; r * r];

    for (x, y, color) in template_cells(resolution) {
        grid[y * r + x] = color;
    }

    let mut next = 0;
    for_each_chunk(resolution, |site| {
        let value = chunks[next];
        next += 1;
        for (i, (&(x, y), &(mx, my))) in site.cells.iter().zip(&site.mask).enumerate() {
            let bits = (value >> (9 - 3 * i)) as u8 & 7;
            grid[y * r + x] = CellColor::from_data_bits(mx, my, bits);
        }
    });

    Ok(grid)
}

/// Paint a color grid as a displayable marker image: an optional white quiet
/// zone, the one-cell black border ring, then the content cells, each
/// `cell_px` pixels square.
pub fn paint_marker(
    grid: &[CellColor],
    resolution: Resolution,
    cell_px: usize,
    margin_cells: usize,
) -> RgbImage {
    let r = resolution.value();
    debug_assert_eq!(grid.len(), r * r);

    let total_cells = r + 2 + 2 * margin_cells;
    let side = total_cells * cell_px;
    let mut out = RgbImage::default();
    out.reset(side, side);

    for cy in 0..total_cells {
        for cx in 0..total_cells {
            let color = cell_at(grid, r, margin_cells, cx, cy);
            let rgb = color.rgb();
            for py in cy * cell_px..(cy + 1) * cell_px {
                let row = py * side * 3;
                for px in cx * cell_px..(cx + 1) * cell_px {
                    out.data[row + px * 3..row + px * 3 + 3].copy_from_slice(&rgb);
                }
            }
        }
    }

    out
}

fn cell_at(
    grid: &[CellColor],
    resolution: usize,
    margin_cells: usize,
    cx: usize,
    cy: usize,
) -> CellColor {
    let ring = margin_cells;
    let interior = margin_cells + 1;
    if cx < ring || cy < ring || cx >= resolution + 2 + ring || cy >= resolution + 2 + ring {
        return CellColor::White;
    }
    if cx == ring || cy == ring || cx == resolution + 1 + ring || cy == resolution + 1 + ring {
        return CellColor::Black;
    }
    grid[(cy - interior) * resolution + (cx - interior)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect_chunks;

    fn sample_chunks(resolution: Resolution) -> Vec<u16> {
        (0..resolution.content_chunks())
            .map(|i| ((i * 37 + 5) % 4096) as u16)
            .collect()
    }

    #[test]
    fn render_rejects_wrong_chunk_count() {
        let err = render_grid(&[0u16; 3], Resolution::R8).unwrap_err();
        assert_eq!(
            err,
            FrameError::ChunkCountMismatch {
                expected: 14,
                got: 3
            }
        );
    }

    #[test]
    fn render_rejects_oversized_chunks() {
        let mut chunks = sample_chunks(Resolution::R8);
        chunks[5] = 4096;
        let err = render_grid(&chunks, Resolution::R8).unwrap_err();
        assert_eq!(
            err,
            FrameError::ChunkOutOfRange {
                index: 5,
                value: 4096
            }
        );
    }

    #[test]
    fn grid_round_trips_through_collect() {
        for resolution in [Resolution::R8, Resolution::R16, Resolution::R24] {
            let chunks = sample_chunks(resolution);
            let grid = render_grid(&chunks, resolution).expect("render");
            let mut back = Vec::new();
            collect_chunks(&grid, resolution, &mut back);
            assert_eq!(back, chunks);
        }
    }

    #[test]
    fn painted_marker_has_ring_and_quiet_zone() {
        let resolution = Resolution::R8;
        let grid = render_grid(&sample_chunks(resolution), resolution).expect("render");
        let img = paint_marker(&grid, resolution, 4, 1);
        // (8 + 2 + 2) cells * 4 px
        assert_eq!(img.width, 48);

        let px = |x: usize, y: usize| {
            let i = (y * img.width + x) * 3;
            [img.data[i], img.data[i + 1], img.data[i + 2]]
        };
        assert_eq!(px(0, 0), [255, 255, 255]); // quiet zone
        assert_eq!(px(5, 5), [0, 0, 0]); // border ring
        assert_eq!(px(9, 9), CellColor::White.rgb()); // template corner (0,0)
    }
}
