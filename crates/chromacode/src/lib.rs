//! High-level facade crate for the `chromacode-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying crates
//! - (feature-gated) end-to-end helpers decoding `image` crate buffers
//! - (feature-gated) the `chromacode` CLI for decoding and rendering markers
//!
//! ## Quickstart
//!
//! ```no_run
//! use chromacode::detect;
//! use image::ImageReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("frame.png")?.decode()?.to_rgb8();
//! for frame in detect::decode_image(&img)? {
//!     println!("resolution {}: {} chunks", frame.resolution.value(), frame.chunks.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `chromacode::core`: image buffers, binarization, homographies.
//! - `chromacode::frame`: the wire format — cell colors, chunk layout, rendering.
//! - `chromacode::decoder`: the camera-frame detection pipeline.
//! - `chromacode::detect` (feature `image`): end-to-end helpers from `image::RgbImage`.

pub use chromacode_core as core;
pub use chromacode_decoder as decoder;
pub use chromacode_frame as frame;

pub use chromacode_decoder::{DecodedFrame, DecoderParams, FrameDecoder, FrameReport};
pub use chromacode_frame::{CellColor, Resolution};

#[cfg(feature = "image")]
pub mod detect;
