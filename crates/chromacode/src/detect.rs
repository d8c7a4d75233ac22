//! End-to-end helpers bridging the `image` crate to the decoder pipeline.

use crate::{core, decoder, DecodedFrame, DecoderParams, FrameDecoder};

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid RGB image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: u32, height: u32 },

    #[error(transparent)]
    Decoder(#[from] decoder::DecoderError),
}

/// Convert an `image::RgbImage` into the lightweight `chromacode-core` view type.
pub fn rgb_view(img: &::image::RgbImage) -> core::RgbImageView<'_> {
    core::RgbImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Build a decoder sized for the given image.
pub fn decoder_for(img: &::image::RgbImage) -> Result<FrameDecoder, DetectError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(DetectError::InvalidDimensions {
            width: img.width(),
            height: img.height(),
        });
    }
    let params = DecoderParams::new(img.width() as usize, img.height() as usize);
    Ok(FrameDecoder::new(params)?)
}

/// Decode every marker in a single image.
///
/// For video streams, build one [`FrameDecoder`] up front and feed it views
/// instead; this helper constructs a fresh pipeline per call.
pub fn decode_image(img: &::image::RgbImage) -> Result<Vec<DecodedFrame>, DetectError> {
    let mut decoder = decoder_for(img)?;
    Ok(decoder.decode(&rgb_view(img))?)
}

/// Render a marker grid into an `image::RgbImage`.
pub fn marker_image(
    grid: &[crate::CellColor],
    resolution: crate::Resolution,
    cell_px: usize,
    margin_cells: usize,
) -> ::image::RgbImage {
    let painted = chromacode_frame::paint_marker(grid, resolution, cell_px, margin_cells);
    ::image::RgbImage::from_raw(painted.width as u32, painted.height as u32, painted.data)
        .expect("painted buffer matches its dimensions")
}
