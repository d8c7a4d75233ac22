use crate::DecoderError;
use serde::{Deserialize, Serialize};

/// Shorter frame sides leave no room for the border scan windows.
pub const MIN_FRAME_SIDE: usize = 64;

/// Configuration for the frame decoder, fixed at construction.
///
/// Only the frame dimensions vary between deployments; the remaining values
/// are protocol constants shared with the frame generator and changing them
/// breaks compatibility. They are kept here, rather than hard-coded at the
/// call sites, so that one struct documents the whole contract.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecoderParams {
    /// Width of every incoming frame in pixels.
    pub width: usize,
    /// Height of every incoming frame in pixels.
    pub height: usize,
    /// Candidate contours must cover at least this fraction of the frame.
    pub min_area_fraction: f64,
    /// Polygon simplification tolerance, scaled by the contour point count.
    pub approx_epsilon_factor: f64,
    /// Side length of the L-shaped window used by the border-width scan.
    pub black_scan_length: usize,
    /// Intensities at or below this mean count as black.
    pub black_threshold: f64,
}

impl DecoderParams {
    /// Parameters for the given frame dimensions with the protocol defaults.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            min_area_fraction: 0.10,
            approx_epsilon_factor: 0.04,
            black_scan_length: 13,
            black_threshold: 255.0 * 0.15,
        }
    }

    /// Side length of the canonical rectified image.
    pub fn max_code_size(&self) -> usize {
        self.width.min(self.height)
    }

    /// Minimum contour area in pixels for a candidate.
    pub fn min_contour_area(&self) -> f64 {
        (self.width * self.height) as f64 * self.min_area_fraction
    }

    pub(crate) fn validate(&self) -> Result<(), DecoderError> {
        if self.max_code_size() < MIN_FRAME_SIDE {
            return Err(DecoderError::FrameTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_FRAME_SIDE,
            });
        }
        Ok(())
    }
}
