//! Suzuki-style border following over a binarized frame.
//!
//! All outer and hole borders are collected into one flat list; nesting is
//! not tracked. The tracer works on an `i32` copy of the binary image with a
//! one-pixel zero frame so neighborhood probes never leave the buffer.

use chromacode_core::GrayImageView;
use nalgebra::Point2;

/// One traced boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contour {
    /// Boundary pixel coordinates, in trace order.
    pub points: Vec<Point2<i32>>,
    /// Whether this boundary encloses a hole of its region.
    pub hole: bool,
}

/// Clockwise 8-neighborhood, starting from "east".
const NEIGHBORHOOD: [(i32, i32); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn neighbor_offsets(stride: i32) -> [i32; 16] {
    let mut offsets = [0i32; 16];
    for (i, &(dx, dy)) in NEIGHBORHOOD.iter().enumerate() {
        offsets[i] = dx + dy * stride;
        offsets[i + 8] = offsets[i];
    }
    offsets
}

/// Contour tracer with a pooled label raster.
#[derive(Default)]
pub struct ContourTracer {
    raster: Vec<i32>,
}

impl ContourTracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trace every border of the nonzero regions of `binary` into `out`.
    /// `out` is cleared first; its allocation is reused across frames.
    pub fn trace(&mut self, binary: &GrayImageView<'_>, out: &mut Vec<Contour>) {
        out.clear();

        let width = binary.width;
        let height = binary.height;
        let stride = width + 2;
        self.raster.clear();
        self.raster.resize(stride * (height + 2), 0);
        for y in 0..height {
            let src = &binary.data[y * width..(y + 1) * width];
            let dst = &mut self.raster[(y + 1) * stride + 1..(y + 1) * stride + 1 + width];
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = i32::from(s != 0);
            }
        }

        let offsets = neighbor_offsets(stride as i32);
        let mut label = 1i32;

        for y in 0..height {
            let mut pos = (y + 1) * stride + 1;
            for x in 0..width {
                let pix = self.raster[pos];
                if pix != 0 {
                    let outer = pix == 1 && self.raster[pos - 1] == 0;
                    let hole = !outer && pix >= 1 && self.raster[pos + 1] == 0;
                    if outer || hole {
                        label += 1;
                        let start = Point2::new(x as i32, y as i32);
                        out.push(follow_border(
                            &mut self.raster,
                            pos,
                            label,
                            start,
                            hole,
                            &offsets,
                        ));
                    }
                }
                pos += 1;
            }
        }
    }
}

fn follow_border(
    raster: &mut [i32],
    pos: usize,
    label: i32,
    mut point: Point2<i32>,
    hole: bool,
    offsets: &[i32; 16],
) -> Contour {
    let mut contour = Contour {
        points: Vec::new(),
        hole,
    };

    // Scan counterclockwise from the entry direction for the first nonzero
    // neighbor. Outer borders enter from the west, hole borders from the east.
    let mut dir: usize = if hole { 0 } else { 4 };
    let dir_start = dir;
    let mut first;
    loop {
        dir = dir.wrapping_sub(1) & 7;
        first = (pos as isize + offsets[dir] as isize) as usize;
        if raster[first] != 0 {
            break;
        }
        if dir == dir_start {
            break;
        }
    }

    if dir == dir_start {
        // isolated pixel
        raster[pos] = -label;
        contour.points.push(point);
        return contour;
    }

    let mut cur = pos;
    let mut dir_end;
    loop {
        dir_end = dir;

        let mut next;
        loop {
            dir = (dir + 1) & 15;
            next = (cur as isize + offsets[dir] as isize) as usize;
            if raster[next] != 0 {
                break;
            }
        }
        dir &= 7;

        // A right-side zero neighbor means `cur` also lies on a hole border;
        // mark it negative so the scan does not restart a trace there.
        if (dir.wrapping_sub(1) as u32) < dir_end as u32 {
            raster[cur] = -label;
        } else if raster[cur] == 1 {
            raster[cur] = label;
        }

        contour.points.push(point);
        point.x += NEIGHBORHOOD[dir].0;
        point.y += NEIGHBORHOOD[dir].1;

        if next == pos && cur == first {
            break;
        }

        cur = next;
        dir = (dir + 4) & 7;
    }

    contour
}
