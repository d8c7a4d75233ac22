//! Corner ordering and perspective rectification of candidate quads.

use chromacode_core::{homography_from_4pt, warp_nearest_rgb, RgbImage, RgbImageView};
use nalgebra::Point2;

/// A candidate quad's corners with a consistent labeling, independent of
/// the winding order the contour trace produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrderedCorners {
    pub top_left: Point2<f32>,
    pub top_right: Point2<f32>,
    pub bottom_left: Point2<f32>,
    pub bottom_right: Point2<f32>,
}

/// Label the four corners: split into the top and bottom pair by y, then
/// order each pair by x.
pub fn order_corners(quad: &[Point2<f32>; 4]) -> OrderedCorners {
    let mut sorted = *quad;
    sorted.sort_by(|a, b| a.y.total_cmp(&b.y));

    if sorted[0].x > sorted[1].x {
        sorted.swap(0, 1);
    }
    if sorted[2].x > sorted[3].x {
        sorted.swap(2, 3);
    }

    OrderedCorners {
        top_left: sorted[0],
        top_right: sorted[1],
        bottom_left: sorted[2],
        bottom_right: sorted[3],
    }
}

/// Warp the quad onto a `size` x `size` canonical square with
/// nearest-neighbor sampling. Fails only for degenerate corner geometry.
pub fn rectify(
    frame: &RgbImageView<'_>,
    corners: &OrderedCorners,
    size: usize,
    out: &mut RgbImage,
) -> bool {
    let s = size as f32;
    let canonical = [
        Point2::new(0.0, 0.0),
        Point2::new(s, 0.0),
        Point2::new(0.0, s),
        Point2::new(s, s),
    ];
    let image = [
        corners.top_left,
        corners.top_right,
        corners.bottom_left,
        corners.bottom_right,
    ];

    let Some(h) = homography_from_4pt(&canonical, &image) else {
        return false;
    };
    warp_nearest_rgb(frame, &h, size, out);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_corners() -> [Point2<f32>; 4] {
        [
            Point2::new(10.0, 20.0),  // top-left
            Point2::new(90.0, 22.0),  // top-right
            Point2::new(12.0, 80.0),  // bottom-left
            Point2::new(88.0, 78.0),  // bottom-right
        ]
    }

    #[test]
    fn ordering_already_ordered_input_is_identity() {
        let [tl, tr, bl, br] = rect_corners();
        let ordered = order_corners(&rect_corners());
        assert_eq!(ordered.top_left, tl);
        assert_eq!(ordered.top_right, tr);
        assert_eq!(ordered.bottom_left, bl);
        assert_eq!(ordered.bottom_right, br);
    }

    #[test]
    fn ordering_is_invariant_under_input_permutation() {
        let base = rect_corners();
        let expected = order_corners(&base);

        // all cyclic rotations and the reversed winding
        let mut inputs = Vec::new();
        for shift in 0..4 {
            let mut rotated = base;
            rotated.rotate_left(shift);
            inputs.push(rotated);
            let mut reversed = rotated;
            reversed.reverse();
            inputs.push(reversed);
        }

        for input in inputs {
            assert_eq!(order_corners(&input), expected, "input {input:?}");
        }
    }

    #[test]
    fn rectify_axis_aligned_quad_crops_the_region() {
        // 8x8 frame: a 4x4 red block at (2,2), green elsewhere
        let mut data = Vec::new();
        for y in 0..8 {
            for x in 0..8 {
                if (2..6).contains(&x) && (2..6).contains(&y) {
                    data.extend_from_slice(&[255, 0, 0]);
                } else {
                    data.extend_from_slice(&[0, 255, 0]);
                }
            }
        }
        let frame = RgbImageView {
            width: 8,
            height: 8,
            data: &data,
        };

        let corners = order_corners(&[
            Point2::new(2.0, 2.0),
            Point2::new(6.0, 2.0),
            Point2::new(6.0, 6.0),
            Point2::new(2.0, 6.0),
        ]);

        let mut out = RgbImage::default();
        assert!(rectify(&frame, &corners, 8, &mut out));

        // interior of the rectified image is solid red
        for y in 1..7 {
            for x in 1..7 {
                let i = (y * 8 + x) * 3;
                assert_eq!(&out.data[i..i + 3], &[255, 0, 0], "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn rectify_rejects_degenerate_quads() {
        let p = Point2::new(5.0, 5.0);
        let corners = OrderedCorners {
            top_left: p,
            top_right: p,
            bottom_left: p,
            bottom_right: p,
        };
        let frame_data = vec![0u8; 8 * 8 * 3];
        let frame = RgbImageView {
            width: 8,
            height: 8,
            data: &frame_data,
        };
        let mut out = RgbImage::default();
        assert!(!rectify(&frame, &corners, 8, &mut out));
    }
}
