use serde::{Deserialize, Serialize};

/// The supported frame resolutions (data cells along one edge).
///
/// The set is fixed by the protocol; a displayed frame additionally carries
/// one border cell on each side, so the painted grid is `value + 2` cells
/// wide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    R8,
    R12,
    R16,
    R24,
    R32,
    R40,
    R50,
    R64,
    R80,
    R100,
    R128,
}

impl Resolution {
    pub const ALL: [Resolution; 11] = [
        Resolution::R8,
        Resolution::R12,
        Resolution::R16,
        Resolution::R24,
        Resolution::R32,
        Resolution::R40,
        Resolution::R50,
        Resolution::R64,
        Resolution::R80,
        Resolution::R100,
        Resolution::R128,
    ];

    /// The resolution itself, as a number.
    pub fn value(self) -> usize {
        match self {
            Resolution::R8 => 8,
            Resolution::R12 => 12,
            Resolution::R16 => 16,
            Resolution::R24 => 24,
            Resolution::R32 => 32,
            Resolution::R40 => 40,
            Resolution::R50 => 50,
            Resolution::R64 => 64,
            Resolution::R80 => 80,
            Resolution::R100 => 100,
            Resolution::R128 => 128,
        }
    }

    /// The resolution associated with `value`, if supported.
    pub fn from_value(value: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.value() == value)
    }

    /// The count of content chunks a frame of this resolution holds. Two
    /// 2x2 blocks worth of cells are taken up by the corner templates.
    pub fn content_chunks(self) -> usize {
        let v = self.value();
        v * v / 4 - 2
    }

    /// Side length of one cell in a rectified image of `max_code_size`
    /// pixels, accounting for the one-cell border ring on each side.
    pub fn nominal_cell_size(self, max_code_size: usize) -> f64 {
        max_code_size as f64 / (self.value() as f64 + 2.0)
    }

    /// The supported resolution whose nominal cell size is closest to the
    /// measured one. Always yields a value; downstream validation is
    /// responsible for rejecting frames that are not actually present.
    pub fn nearest(cell_size: f64, max_code_size: usize) -> Self {
        let mut best = Resolution::R8;
        let mut best_distance = f64::MAX;
        for resolution in Self::ALL {
            let distance = (resolution.nominal_cell_size(max_code_size) - cell_size).abs();
            if distance < best_distance {
                best_distance = distance;
                best = resolution;
            }
        }
        best
    }
}
