//! Core image and geometry primitives for color-matrix-code processing.
//!
//! This crate is intentionally small and buffer-oriented. It does *not*
//! depend on any concrete image I/O library or detection pipeline.

mod binarize;
mod homography;
mod image;
mod logger;

pub use binarize::{otsu_threshold, Binarizer};
pub use homography::{homography_from_4pt, warp_nearest_rgb, Homography};
pub use image::{mean_rect, mean_rect_rgb, GrayImage, GrayImageView, RgbImage, RgbImageView};
pub use logger::init_with_level;
