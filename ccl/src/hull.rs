//! Convex hull of pixel point sets.

use glam::IVec2;

#[inline]
fn cross(o: IVec2, a: IVec2, b: IVec2) -> i64 {
    let (ax, ay) = ((a.x - o.x) as i64, (a.y - o.y) as i64);
    let (bx, by) = ((b.x - o.x) as i64, (b.y - o.y) as i64);
    ax * by - ay * bx
}

/// Convex hull vertices via Andrew's monotone chain.
///
/// Vertices are returned clockwise as seen on screen (y axis pointing down),
/// starting from the left-most, top-most point. Collinear points are
/// dropped. Inputs with fewer than three distinct points are returned as
/// their distinct points.
pub fn convex_hull(points: &[IVec2]) -> Vec<IVec2> {
    let mut pts = points.to_vec();
    pts.sort_unstable_by_key(|p| (p.x, p.y));
    pts.dedup();
    if pts.len() <= 2 {
        return pts;
    }

    let mut hull: Vec<IVec2> = Vec::with_capacity(pts.len() + 1);
    for &p in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }

    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0
        {
            hull.pop();
        }
        hull.push(p);
    }
    // last point repeats the first
    hull.pop();
    hull
}

/// Twice the signed area of a closed polygon.
///
/// Positive for clockwise winding in screen coordinates.
pub fn signed_area2(polygon: &[IVec2]) -> i64 {
    let n = polygon.len();
    (0..n)
        .map(|i| {
            let (a, b) = (polygon[i], polygon[(i + 1) % n]);
            a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
        })
        .sum()
}
