//! The per-frame decoding pipeline.

use crate::contours::{Contour, ContourTracer};
use crate::estimate::estimate_resolution;
use crate::quad::filter_quads;
use crate::rectify::{order_corners, rectify};
use crate::sample::sample_grid;
use crate::template::{border_is_black, check_corners};
use crate::{DecoderError, DecoderParams};
use chromacode_core::{Binarizer, GrayImage, RgbImage, RgbImageView};
use chromacode_frame::{collect_chunks, CellColor, Resolution};
use log::{debug, trace};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// One successfully decoded marker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedFrame {
    pub resolution: Resolution,
    /// Content chunks in wire order, each in `0..4096`.
    pub chunks: Vec<u16>,
}

/// Why a candidate quad was discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CandidateRejection {
    /// The corner geometry did not admit a homography.
    DegenerateGeometry,
    /// The border ring of the rectified image was not black.
    BorderMismatch,
    /// The border matched but the corner template cells did not.
    TemplateMismatch,
}

/// Outcome of one processed frame.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameReport {
    pub decoded: Vec<DecodedFrame>,
    /// Count of quads that reached rectification.
    pub candidates: usize,
    pub rejected_border: usize,
    pub rejected_template: usize,
}

/// Single-stream frame decoder.
///
/// Owns every working buffer and reuses them across candidates and frames;
/// nothing is retained between frames besides those allocations. Use one
/// instance per concurrent frame stream.
pub struct FrameDecoder {
    params: DecoderParams,
    binarizer: Binarizer,
    frame_binary: GrayImage,
    tracer: ContourTracer,
    contours: Vec<Contour>,
    quads: Vec<[Point2<f32>; 4]>,
    rectified: RgbImage,
    rectified_binary: GrayImage,
    grid: Vec<CellColor>,
    chunks: Vec<u16>,
}

impl FrameDecoder {
    pub fn new(params: DecoderParams) -> Result<Self, DecoderError> {
        params.validate()?;
        Ok(Self {
            params,
            binarizer: Binarizer::new(),
            frame_binary: GrayImage::default(),
            tracer: ContourTracer::new(),
            contours: Vec::new(),
            quads: Vec::new(),
            rectified: RgbImage::default(),
            rectified_binary: GrayImage::default(),
            grid: Vec::new(),
            chunks: Vec::new(),
        })
    }

    #[inline]
    pub fn params(&self) -> &DecoderParams {
        &self.params
    }

    /// Process one frame: every candidate quad is evaluated independently
    /// and each validated marker becomes one entry of the report.
    pub fn process(&mut self, frame: &RgbImageView<'_>) -> Result<FrameReport, DecoderError> {
        self.check_input(frame)?;
        let mut report = FrameReport::default();

        self.binarizer.binarize_rgb(frame, &mut self.frame_binary);
        self.tracer
            .trace(&self.frame_binary.view(), &mut self.contours);
        filter_quads(
            &self.contours,
            self.params.min_contour_area(),
            self.params.approx_epsilon_factor,
            &mut self.quads,
        );
        debug!(
            "frame: {} contours, {} candidate quads",
            self.contours.len(),
            self.quads.len()
        );

        let quad_count = self.quads.len();
        for index in 0..quad_count {
            let quad = self.quads[index];
            report.candidates += 1;
            match self.try_candidate(frame, &quad) {
                Ok(decoded) => {
                    debug!(
                        "candidate {index}: decoded resolution {}",
                        decoded.resolution.value()
                    );
                    report.decoded.push(decoded);
                }
                Err(CandidateRejection::BorderMismatch) => {
                    trace!("candidate {index}: border mismatch");
                    report.rejected_border += 1;
                }
                Err(CandidateRejection::TemplateMismatch) => {
                    trace!("candidate {index}: template mismatch");
                    report.rejected_template += 1;
                }
                Err(CandidateRejection::DegenerateGeometry) => {
                    trace!("candidate {index}: degenerate geometry");
                }
            }
        }

        Ok(report)
    }

    /// Convenience wrapper around [`FrameDecoder::process`] returning only
    /// the decoded markers.
    pub fn decode(&mut self, frame: &RgbImageView<'_>) -> Result<Vec<DecodedFrame>, DecoderError> {
        Ok(self.process(frame)?.decoded)
    }

    fn check_input(&self, frame: &RgbImageView<'_>) -> Result<(), DecoderError> {
        if frame.width != self.params.width || frame.height != self.params.height {
            return Err(DecoderError::DimensionMismatch {
                width: self.params.width,
                height: self.params.height,
                got_width: frame.width,
                got_height: frame.height,
            });
        }
        let expected = frame.width * frame.height * 3;
        if frame.data.len() != expected {
            return Err(DecoderError::InvalidBufferLength {
                expected,
                got: frame.data.len(),
            });
        }
        Ok(())
    }

    fn try_candidate(
        &mut self,
        frame: &RgbImageView<'_>,
        quad: &[Point2<f32>; 4],
    ) -> Result<DecodedFrame, CandidateRejection> {
        let size = self.params.max_code_size();
        let corners = order_corners(quad);
        if !rectify(frame, &corners, size, &mut self.rectified) {
            return Err(CandidateRejection::DegenerateGeometry);
        }
        self.binarizer
            .binarize_rgb(&self.rectified.view(), &mut self.rectified_binary);

        let resolution = estimate_resolution(
            &self.rectified_binary.view(),
            self.params.black_scan_length,
            self.params.black_threshold,
        );
        let cell_size = resolution.nominal_cell_size(size);

        if !border_is_black(
            &self.rectified_binary.view(),
            cell_size,
            self.params.black_threshold,
        ) {
            return Err(CandidateRejection::BorderMismatch);
        }

        let orientation = check_corners(&self.rectified.view(), cell_size, resolution)
            .ok_or(CandidateRejection::TemplateMismatch)?;

        sample_grid(
            &self.rectified.view(),
            cell_size,
            resolution,
            orientation,
            &mut self.grid,
        );
        collect_chunks(&self.grid, resolution, &mut self.chunks);

        Ok(DecodedFrame {
            resolution,
            chunks: self.chunks.clone(),
        })
    }
}
