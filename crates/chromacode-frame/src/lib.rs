//! Wire format of color-matrix-code frames.
//!
//! A frame is a square grid of colored cells. Each cell carries 3 bits (one
//! per RGB channel), scrambled by a fixed positional mask; four 2-cell corner
//! templates encode orientation, and the remaining cells hold 12-bit chunks
//! packed four cells at a time. This crate owns that layout end to end:
//! encoding chunks into a color grid, painting a displayable marker image,
//! and reading chunks back out of a decoded grid.
//!
//! It deliberately knows nothing about cameras or detection; see
//! `chromacode-decoder` for the pixel side.

mod chunks;
mod color;
mod layout;
mod render;
mod resolution;

pub use chunks::{byte_count, bytes_to_chunks, chunk_count, chunks_to_bytes};
pub use color::CellColor;
pub use layout::{collect_chunks, for_each_chunk, template_cells, ChunkSite};
pub use render::{paint_marker, render_grid, FrameError};
pub use resolution::Resolution;
