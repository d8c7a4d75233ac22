//! Reduction of traced contours to candidate quadrilaterals.

use crate::contours::Contour;
use nalgebra::Point2;

/// Area enclosed by a closed polygon (shoelace formula).
pub fn polygon_area(points: &[Point2<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0i64;
    let mut prev = points[points.len() - 1];
    for &p in points {
        twice_area += prev.x as i64 * p.y as i64 - p.x as i64 * prev.y as i64;
        prev = p;
    }
    (twice_area.abs() as f64) / 2.0
}

/// Douglas-Peucker simplification of a closed contour.
///
/// The two anchor points are picked by iterated farthest-point search so the
/// split is stable regardless of where the trace happened to start.
pub fn approx_polygon(points: &[Point2<i32>], epsilon: f64) -> Vec<Point2<i32>> {
    let n = points.len();
    if n <= 2 {
        return points.to_vec();
    }

    let mut a = 0;
    for _ in 0..2 {
        a = farthest_from(points, a);
    }
    let b = farthest_from(points, a);

    let mut keep = vec![false; n];
    keep[a] = true;
    keep[b] = true;

    let mut stack = vec![(a, b), (b, a)];
    while let Some((start, end)) = stack.pop() {
        if let Some((k, dist)) = farthest_from_chord(points, start, end) {
            if dist > epsilon {
                keep[k] = true;
                stack.push((start, k));
                stack.push((k, end));
            }
        }
    }

    let mut out = Vec::new();
    let mut i = a;
    loop {
        if keep[i] {
            out.push(points[i]);
        }
        i = (i + 1) % n;
        if i == a {
            break;
        }
    }
    out
}

fn farthest_from(points: &[Point2<i32>], from: usize) -> usize {
    let origin = points[from];
    let mut best = from;
    let mut best_dist = -1i64;
    for (i, p) in points.iter().enumerate() {
        let dx = (p.x - origin.x) as i64;
        let dy = (p.y - origin.y) as i64;
        let dist = dx * dx + dy * dy;
        if dist > best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}

/// Interior point of the cyclic arc `start..end` farthest from the chord,
/// with its perpendicular distance. `None` when the arc has no interior.
fn farthest_from_chord(
    points: &[Point2<i32>],
    start: usize,
    end: usize,
) -> Option<(usize, f64)> {
    let n = points.len();
    let p0 = points[start];
    let p1 = points[end];
    let dx = (p1.x - p0.x) as f64;
    let dy = (p1.y - p0.y) as f64;
    let chord_len = (dx * dx + dy * dy).sqrt();

    let mut best = None;
    let mut best_dist = -1.0f64;
    let mut i = (start + 1) % n;
    while i != end {
        let p = points[i];
        let dist = if chord_len > 0.0 {
            ((p.y - p0.y) as f64 * dx - (p.x - p0.x) as f64 * dy).abs() / chord_len
        } else {
            let ex = (p.x - p0.x) as f64;
            let ey = (p.y - p0.y) as f64;
            (ex * ex + ey * ey).sqrt()
        };
        if dist > best_dist {
            best_dist = dist;
            best = Some((i, dist));
        }
        i = (i + 1) % n;
    }
    best
}

/// Strict convexity test for a closed polygon: every turn must have the
/// same sign.
pub fn is_convex(points: &[Point2<i32>]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }

    let mut orientation = 0u8;
    let mut prev = points[n - 1];
    let mut cur = points[0];
    let mut dx0 = (cur.x - prev.x) as i64;
    let mut dy0 = (cur.y - prev.y) as i64;

    for j in 1..=n {
        prev = cur;
        cur = points[j % n];
        let dx = (cur.x - prev.x) as i64;
        let dy = (cur.y - prev.y) as i64;

        let cross = dy * dx0 - dx * dy0;
        orientation |= match cross.cmp(&0) {
            std::cmp::Ordering::Greater => 1,
            std::cmp::Ordering::Less => 2,
            std::cmp::Ordering::Equal => 3,
        };
        if orientation == 3 {
            return false;
        }

        dx0 = dx;
        dy0 = dy;
    }

    true
}

/// Filter contours down to candidate quads: enough points, enough area,
/// exactly four corners after simplification, convex.
pub fn filter_quads(
    contours: &[Contour],
    min_area: f64,
    epsilon_factor: f64,
    out: &mut Vec<[Point2<f32>; 4]>,
) {
    out.clear();
    for contour in contours {
        let points = &contour.points;
        if points.len() < 4 || polygon_area(points) < min_area {
            continue;
        }

        let epsilon = epsilon_factor * points.len() as f64;
        let poly = approx_polygon(points, epsilon);
        if poly.len() != 4 || !is_convex(&poly) {
            continue;
        }

        out.push([
            Point2::new(poly[0].x as f32, poly[0].y as f32),
            Point2::new(poly[1].x as f32, poly[1].y as f32),
            Point2::new(poly[2].x as f32, poly[2].y as f32),
            Point2::new(poly[3].x as f32, poly[3].y as f32),
        ]);
    }
}
