//! Grayscale conversion and Otsu binarization.

use crate::{GrayImage, RgbImageView};

/// Compute the Otsu threshold of a set of intensities.
pub fn otsu_threshold(samples: &[u8]) -> u8 {
    if samples.is_empty() {
        return 127;
    }

    let mut min_v = 255u8;
    let mut max_v = 0u8;
    for &v in samples {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }
    if min_v == max_v {
        return min_v;
    }

    let mut hist = [0u32; 256];
    for &v in samples {
        hist[v as usize] += 1;
    }
    let nonzero_bins = hist.iter().filter(|&&h| h > 0).count();
    if nonzero_bins <= 2 {
        return ((min_v as u16 + max_v as u16) / 2) as u8;
    }

    let total = samples.len() as f64;
    let mut sum_total = 0f64;
    for (i, &h) in hist.iter().enumerate() {
        sum_total += (i as f64) * (h as f64);
    }

    let mut sum_b = 0f64;
    let mut w_b = 0f64;
    let mut best_var = -1f64;
    let mut best_t = 127u8;

    for (t, &h) in hist.iter().enumerate() {
        w_b += h as f64;
        if w_b < 1.0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f < 1.0 {
            break;
        }

        sum_b += (t as f64) * (h as f64);
        let m_b = sum_b / w_b;
        let m_f = (sum_total - sum_b) / w_f;

        let var_between = w_b * w_f * (m_b - m_f) * (m_b - m_f);
        if var_between > best_var {
            best_var = var_between;
            best_t = t as u8;
        }
    }

    best_t
}

/// RGB -> binary converter with pooled intermediate buffers.
///
/// The steps mirror the classic global-threshold pipeline: luma conversion,
/// 3x3 Gaussian smoothing, Otsu threshold, 0/255 output.
#[derive(Default)]
pub struct Binarizer {
    luma: Vec<u8>,
    blurred: Vec<u8>,
}

impl Binarizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binarize an RGB image into `out`. `out` is resized as needed and its
    /// allocation is reused across calls.
    pub fn binarize_rgb(&mut self, src: &RgbImageView<'_>, out: &mut GrayImage) {
        self.luma.clear();
        self.luma.reserve(src.width * src.height);
        for px in src.data.chunks_exact(3) {
            self.luma.push(luma(px[0], px[1], px[2]));
        }

        gaussian_blur_3x3(&self.luma, src.width, src.height, &mut self.blurred);

        let threshold = otsu_threshold(&self.blurred);
        out.reset(src.width, src.height);
        for (dst, &v) in out.data.iter_mut().zip(&self.blurred) {
            *dst = if v > threshold { 255 } else { 0 };
        }
    }
}

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    (r as f32 * 0.299 + g as f32 * 0.587 + b as f32 * 0.114 + 0.5) as u8
}

/// Separable 3x3 Gaussian ([1 2 1] / 4 per axis) with clamped borders.
fn gaussian_blur_3x3(src: &[u8], width: usize, height: usize, dst: &mut Vec<u8>) {
    debug_assert_eq!(src.len(), width * height);
    dst.clear();
    dst.resize(width * height, 0);

    let at = |x: i32, y: i32| -> u32 {
        let cx = x.clamp(0, width as i32 - 1);
        let cy = y.clamp(0, height as i32 - 1);
        src[cy as usize * width + cx as usize] as u32
    };

    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let mut acc = 0u32;
            for (dy, wy) in [(-1i32, 1u32), (0, 2), (1, 1)] {
                let mut row = 0u32;
                for (dx, wx) in [(-1i32, 1u32), (0, 2), (1, 1)] {
                    row += wx * at(x + dx, y + dy);
                }
                acc += wy * row;
            }
            dst[y as usize * width + x as usize] = ((acc + 8) / 16) as u8;
        }
    }
}
