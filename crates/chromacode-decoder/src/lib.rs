//! Detection and decoding pipeline for color-matrix-code markers.
//!
//! A camera frame goes through the following stages, each feeding the next
//! and any of them free to discard a candidate:
//!
//! 1. binarization and contour tracing over the whole frame,
//! 2. filtering of contours down to large convex quadrilaterals,
//! 3. perspective rectification of each quad onto a canonical square,
//! 4. adaptive estimation of the frame resolution from the border width,
//! 5. validation of the black border ring and the corner templates,
//!    resolving the marker's rotation and mirroring,
//! 6. per-cell color sampling into a canonical grid and chunk assembly.
//!
//! The pipeline is single-threaded and owns all of its working buffers;
//! create one [`FrameDecoder`] per concurrent stream.

mod contours;
mod decoder;
mod error;
mod estimate;
mod params;
mod quad;
mod rectify;
mod sample;
mod template;

pub use contours::{Contour, ContourTracer};
pub use decoder::{CandidateRejection, DecodedFrame, FrameDecoder, FrameReport};
pub use error::DecoderError;
pub use estimate::{estimate_resolution, measure_cell_size};
pub use params::DecoderParams;
pub use quad::filter_quads;
pub use rectify::{order_corners, OrderedCorners};
pub use template::{border_is_black, check_corners, Orientation};
