//! Placement of template cells and content chunks inside the data grid.
//!
//! Both the renderer and the payload assembler walk the grid through this
//! module, so the two sides cannot drift apart. The traversal is part of the
//! wire format and is intentionally irregular: chunk 0 sits in row 1
//! underneath the top template cells, the first block row starts two cells
//! in, and the last block row starts one cell in, leaving room for the
//! vertical template pairs in the bottom corners.

use crate::{CellColor, Resolution};

/// Grid positions of one 12-bit chunk's four cells, most significant
/// triplet first, along with the coordinates fed to the positional mask.
///
/// The two coincide everywhere except chunk 0, which is masked as if it
/// were located at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkSite {
    pub cells: [(usize, usize); 4],
    pub mask: [(usize, usize); 4],
}

/// The eight template cells of a frame: position and fixed color.
///
/// Each corner holds a primary orientation color and a secondary one. The
/// top pairs run horizontally, the bottom pairs vertically.
pub fn template_cells(resolution: Resolution) -> [(usize, usize, CellColor); 8] {
    let r = resolution.value();
    [
        (0, 0, CellColor::White),
        (1, 0, CellColor::Black),
        (r - 1, 0, CellColor::Green),
        (r - 2, 0, CellColor::Magenta),
        (0, r - 1, CellColor::Aqua),
        (0, r - 2, CellColor::Red),
        (r - 1, r - 1, CellColor::Yellow),
        (r - 1, r - 2, CellColor::Blue),
    ]
}

/// Visit every content chunk site of a frame, in wire order.
pub fn for_each_chunk(resolution: Resolution, mut f: impl FnMut(ChunkSite)) {
    let r = resolution.value();
    let block_cols = r / 2;

    // chunk 0 wraps around the upper template cells
    f(ChunkSite {
        cells: [(0, 1), (1, 1), (r - 1, 1), (r - 2, 1)],
        mask: [(0, 0), (1, 0), (0, 1), (1, 1)],
    });

    let row = |start_x: usize, y: usize, count: usize, f: &mut dyn FnMut(ChunkSite)| {
        for i in 0..count {
            let x = start_x + 2 * i;
            let cells = [(x, y), (x + 1, y), (x, y + 1), (x + 1, y + 1)];
            f(ChunkSite { cells, mask: cells });
        }
    };

    row(2, 0, block_cols - 2, &mut f);
    let mut y = 2;
    for _ in 2..block_cols {
        row(0, y, block_cols, &mut f);
        y += 2;
    }
    row(1, y, block_cols - 1, &mut f);
}

/// Read the content chunks out of a decoded color grid, in wire order,
/// unapplying the positional mask. `grid` is row-major with
/// `resolution x resolution` entries; `out` is cleared first and reused.
pub fn collect_chunks(grid: &[CellColor], resolution: Resolution, out: &mut Vec<u16>) {
    let r = resolution.value();
    debug_assert_eq!(grid.len(), r * r);

    out.clear();
    out.reserve(resolution.content_chunks());
    for_each_chunk(resolution, |site| {
        let mut value = 0u16;
        for (&(x, y), &(mx, my)) in site.cells.iter().zip(&site.mask) {
            value = value << 3 | grid[y * r + x].data_bits(mx, my) as u16;
        }
        out.push(value);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn traversal_covers_every_non_template_cell_once() {
        for resolution in [Resolution::R8, Resolution::R16, Resolution::R50] {
            let r = resolution.value();
            let mut seen = HashSet::new();
            let mut chunk_total = 0;
            for_each_chunk(resolution, |site| {
                chunk_total += 1;
                for &(x, y) in &site.cells {
                    assert!(x < r && y < r);
                    assert!(seen.insert((x, y)), "cell ({x},{y}) visited twice");
                }
            });
            assert_eq!(chunk_total, resolution.content_chunks());

            for (x, y, _) in template_cells(resolution) {
                assert!(
                    !seen.contains(&(x, y)),
                    "template cell ({x},{y}) must not carry payload"
                );
            }
            assert_eq!(seen.len() + 8, r * r);
        }
    }

    #[test]
    fn first_chunk_sits_under_the_top_templates() {
        let mut first = None;
        for_each_chunk(Resolution::R16, |site| {
            if first.is_none() {
                first = Some(site);
            }
        });
        let site = first.unwrap();
        assert_eq!(site.cells, [(0, 1), (1, 1), (15, 1), (14, 1)]);
        assert_eq!(site.mask, [(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn last_block_row_is_shifted_right_by_one_cell() {
        let mut last = None;
        for_each_chunk(Resolution::R8, |site| last = Some(site));
        // resolution 8: last row starts at x=1 and stops before the
        // bottom-right template column
        assert_eq!(last.unwrap().cells, [(5, 6), (6, 6), (5, 7), (6, 7)]);
    }
}
