#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

#[derive(Clone, Debug, Default)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Resize the backing buffer for reuse across frames without reallocating
    /// once the steady-state size has been reached.
    pub fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize(width * height, 0);
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RgbImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major RGB interleaved, len = w*h*3
}

#[derive(Clone, Debug, Default)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbImage {
    pub fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize(width * height * 3, 0);
    }

    pub fn view(&self) -> RgbImageView<'_> {
        RgbImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

#[inline]
pub(crate) fn get_rgb(src: &RgbImageView<'_>, x: i32, y: i32) -> [u8; 3] {
    if x < 0 || y < 0 || x >= src.width as i32 || y >= src.height as i32 {
        return [0, 0, 0];
    }
    let idx = (y as usize * src.width + x as usize) * 3;
    [src.data[idx], src.data[idx + 1], src.data[idx + 2]]
}

/// Mean intensity over an axis-aligned rectangle. The rectangle must lie
/// fully inside the image.
pub fn mean_rect(src: &GrayImageView<'_>, x: usize, y: usize, w: usize, h: usize) -> f64 {
    debug_assert!(x + w <= src.width && y + h <= src.height);
    debug_assert!(w > 0 && h > 0);
    let mut sum = 0u64;
    for row in y..y + h {
        let start = row * src.width + x;
        for &v in &src.data[start..start + w] {
            sum += v as u64;
        }
    }
    sum as f64 / (w * h) as f64
}

/// Per-channel mean over an axis-aligned rectangle of an RGB image.
pub fn mean_rect_rgb(src: &RgbImageView<'_>, x: usize, y: usize, w: usize, h: usize) -> [f64; 3] {
    debug_assert!(x + w <= src.width && y + h <= src.height);
    debug_assert!(w > 0 && h > 0);
    let mut sum = [0u64; 3];
    for row in y..y + h {
        let start = (row * src.width + x) * 3;
        for px in src.data[start..start + w * 3].chunks_exact(3) {
            sum[0] += px[0] as u64;
            sum[1] += px[1] as u64;
            sum[2] += px[2] as u64;
        }
    }
    let n = (w * h) as f64;
    [sum[0] as f64 / n, sum[1] as f64 / n, sum[2] as f64 / n]
}
