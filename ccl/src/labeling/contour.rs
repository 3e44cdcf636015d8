//! Contour-tracing labeling.
//!
//! Labels components in a single raster scan while recording their outer and
//! inner boundaries. On the first pixel of a new component the outer contour
//! is traced and labeled; on a pixel with unvisited background directly
//! below, the boundary of the hole underneath is traced; every other
//! foreground pixel takes the label of its west neighbour.
//!
//! Works on a `u32` scratch plane where background is `0` and unlabeled
//! foreground is [`FOREGROUND`]. Background examined while tracing is set to
//! [`MARKED`] so each hole is traced once. On return every foreground cell
//! holds its final label.

use glam::IVec2;

use crate::config::Connectivity;

/// Unlabeled foreground cell.
pub(crate) const FOREGROUND: u32 = u32::MAX - 1;
/// Background cell visited by the tracer.
pub(crate) const MARKED: u32 = u32::MAX;

/// True for cells holding a component label.
#[inline]
pub(crate) fn is_label(value: u32) -> bool {
    value != 0 && value < FOREGROUND
}

#[inline]
fn is_foreground(value: u32) -> bool {
    value != 0 && value != MARKED
}

/// Moore neighbourhood, clockwise on screen starting east.
const MOORE: [IVec2; 8] = [
    IVec2::new(1, 0),
    IVec2::new(1, 1),
    IVec2::new(0, 1),
    IVec2::new(-1, 1),
    IVec2::new(-1, 0),
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
];

/// 4-neighbourhood, clockwise on screen starting east.
const VON_NEUMANN: [IVec2; 4] = [
    IVec2::new(1, 0),
    IVec2::new(0, 1),
    IVec2::new(-1, 0),
    IVec2::new(0, -1),
];

/// Search directions for one connectivity.
#[derive(Debug, Clone, Copy)]
struct Neighbourhood {
    offsets: &'static [IVec2],
    /// First direction searched from the start of an outer contour.
    external_start: usize,
    /// First direction searched from the start of an inner contour.
    internal_start: usize,
    /// Added to the arrival direction to get the next search start: one
    /// step clockwise past the previous contour point.
    back_step: usize,
}

impl Neighbourhood {
    fn of(connectivity: Connectivity) -> Self {
        match connectivity {
            Connectivity::Eight => Self {
                offsets: &MOORE,
                external_start: 7,
                internal_start: 3,
                back_step: 6,
            },
            Connectivity::Four => Self {
                offsets: &VON_NEUMANN,
                external_start: 0,
                internal_start: 2,
                back_step: 3,
            },
        }
    }
}

/// Result of tracing a plane.
#[derive(Debug, Default)]
pub(crate) struct Traced {
    pub count: u32,
    /// Outer contour per label, index `label - 1`.
    pub outer: Vec<Vec<IVec2>>,
    /// Inner contours per label, empty unless requested.
    pub inner: Vec<Vec<Vec<IVec2>>>,
}

struct ContourScanner<'a> {
    plane: &'a mut [u32],
    width: i32,
    height: i32,
    nb: Neighbourhood,
    keep_inner: bool,
    traced: Traced,
}

impl ContourScanner<'_> {
    #[inline]
    fn index(&self, p: IVec2) -> usize {
        p.y as usize * self.width as usize + p.x as usize
    }

    /// Find the next contour point around `p`, searching clockwise from
    /// direction `start`. Examined background is marked. `None` means `p`
    /// has no foreground neighbour.
    fn next_point(&mut self, p: IVec2, start: usize) -> Option<(IVec2, usize)> {
        let n = self.nb.offsets.len();
        for i in 0..n {
            let dir = (start + i) % n;
            let q = p + self.nb.offsets[dir];
            if q.x < 0 || q.y < 0 || q.x >= self.width || q.y >= self.height {
                continue;
            }
            let idx = self.index(q);
            if is_foreground(self.plane[idx]) {
                return Some((q, dir));
            }
            self.plane[idx] = MARKED;
        }
        None
    }

    /// Follow the boundary through `start`, labeling every point on it.
    ///
    /// Stops when the walk is back at `start` about to step onto the second
    /// point again, so boundaries passing through `start` twice are followed
    /// in full.
    fn trace(&mut self, start: IVec2, first_dir: usize, label: u32) -> Vec<IVec2> {
        let idx = self.index(start);
        self.plane[idx] = label;
        let mut contour = vec![start];

        let Some((second, mut dir)) = self.next_point(start, first_dir) else {
            return contour;
        };

        let n = self.nb.offsets.len();
        let mut current = second;
        loop {
            let search = (dir + self.nb.back_step) % n;
            let Some((next, next_dir)) = self.next_point(current, search) else {
                break;
            };
            if current == start && next == second {
                break;
            }
            let idx = self.index(current);
            self.plane[idx] = label;
            contour.push(current);
            current = next;
            dir = next_dir;
        }
        contour
    }

    /// Start a new component at `p`.
    fn external(&mut self, p: IVec2) -> u32 {
        self.traced.count += 1;
        let label = self.traced.count;
        let contour = self.trace(p, self.nb.external_start, label);
        self.traced.outer.push(contour);
        self.traced.inner.push(Vec::new());
        label
    }

    fn internal(&mut self, p: IVec2, label: u32) {
        let contour = self.trace(p, self.nb.internal_start, label);
        if self.keep_inner {
            self.traced.inner[label as usize - 1].push(contour);
        }
    }

    /// Label of the west neighbour, or a new component when there is none.
    fn inherit(&mut self, p: IVec2) -> u32 {
        let west = if p.x > 0 {
            self.plane[self.index(p) - 1]
        } else {
            0
        };
        if is_label(west) {
            west
        } else {
            self.external(p)
        }
    }

    fn scan(&mut self) {
        let width = self.width as usize;
        for y in 0..self.height {
            for x in 0..self.width {
                let p = IVec2::new(x, y);
                let idx = self.index(p);
                let mut label = self.plane[idx];
                if !is_foreground(label) {
                    continue;
                }

                let above_is_background = y == 0 || !is_foreground(self.plane[idx - width]);
                if label == FOREGROUND && above_is_background {
                    label = self.external(p);
                }

                let below_unvisited = y + 1 < self.height && self.plane[idx + width] == 0;
                if below_unvisited {
                    if label == FOREGROUND {
                        label = self.inherit(p);
                    }
                    self.internal(p, label);
                }

                if label == FOREGROUND {
                    label = self.inherit(p);
                    self.plane[idx] = label;
                }
            }
        }
    }
}

/// Label a scratch plane and collect contours.
///
/// `plane` holds `height` rows of `width` cells, `0` for background and
/// [`FOREGROUND`] otherwise. Inner contours are always traced; they are only
/// returned when `keep_inner` is set.
pub(crate) fn trace_plane(
    plane: &mut [u32],
    width: usize,
    height: usize,
    connectivity: Connectivity,
    keep_inner: bool,
) -> Traced {
    debug_assert_eq!(plane.len(), width * height);
    let mut scanner = ContourScanner {
        plane,
        width: width as i32,
        height: height as i32,
        nb: Neighbourhood::of(connectivity),
        keep_inner,
        traced: Traced::default(),
    };
    scanner.scan();
    scanner.traced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane_from(rows: &[&str]) -> (Vec<u32>, usize, usize) {
        let height = rows.len();
        let width = rows[0].len();
        let plane = rows
            .iter()
            .flat_map(|r| r.bytes())
            .map(|b| if b == b'#' { FOREGROUND } else { 0 })
            .collect();
        (plane, width, height)
    }

    fn labels(plane: &[u32]) -> Vec<u32> {
        plane.iter().map(|&v| if is_label(v) { v } else { 0 }).collect()
    }

    fn pts(raw: &[(i32, i32)]) -> Vec<IVec2> {
        raw.iter().map(|&(x, y)| IVec2::new(x, y)).collect()
    }

    #[test]
    fn test_isolated_pixel_terminates() {
        let (mut plane, w, h) = plane_from(&["...", ".#.", "..."]);
        let traced = trace_plane(&mut plane, w, h, Connectivity::Eight, true);
        assert_eq!(traced.count, 1);
        assert_eq!(traced.outer[0], pts(&[(1, 1)]));
        assert!(traced.inner[0].is_empty());
        assert_eq!(labels(&plane), vec![0, 0, 0, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_ring_outer_and_inner() {
        let (mut plane, w, h) = plane_from(&[".....", ".###.", ".#.#.", ".###.", "....."]);
        let traced = trace_plane(&mut plane, w, h, Connectivity::Eight, true);
        assert_eq!(traced.count, 1);
        assert_eq!(
            traced.outer[0],
            pts(&[(1, 1), (2, 1), (3, 1), (3, 2), (3, 3), (2, 3), (1, 3), (1, 2)])
        );
        assert_eq!(traced.inner[0].len(), 1);
        assert_eq!(traced.inner[0][0], pts(&[(2, 1), (1, 2), (2, 3), (3, 2)]));
    }

    #[test]
    fn test_ring_four_connected_inner_includes_corners() {
        let (mut plane, w, h) = plane_from(&[".....", ".###.", ".#.#.", ".###.", "....."]);
        let traced = trace_plane(&mut plane, w, h, Connectivity::Four, true);
        assert_eq!(traced.count, 1);
        assert_eq!(traced.outer[0].len(), 8);
        assert_eq!(traced.inner[0][0].len(), 8);
    }

    #[test]
    fn test_inner_contours_dropped_unless_kept() {
        let (mut plane, w, h) = plane_from(&["###", "#.#", "###"]);
        let traced = trace_plane(&mut plane, w, h, Connectivity::Eight, false);
        assert_eq!(traced.count, 1);
        assert!(traced.inner[0].is_empty());
        assert_eq!(labels(&plane), vec![1, 1, 1, 1, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_diagonal_pixels_follow_connectivity() {
        let rows = ["#..", ".#.", "..#"];
        let (mut plane, w, h) = plane_from(&rows);
        assert_eq!(trace_plane(&mut plane, w, h, Connectivity::Eight, false).count, 1);

        let (mut plane, w, h) = plane_from(&rows);
        let traced = trace_plane(&mut plane, w, h, Connectivity::Four, false);
        assert_eq!(traced.count, 3);
        assert_eq!(labels(&plane), vec![1, 0, 0, 0, 2, 0, 0, 0, 3]);
    }

    #[test]
    fn test_interior_pixels_inherit_west_label() {
        let (mut plane, w, h) = plane_from(&["#####", "#####", "#####", "#####"]);
        let traced = trace_plane(&mut plane, w, h, Connectivity::Eight, true);
        assert_eq!(traced.count, 1);
        assert!(labels(&plane).iter().all(|&l| l == 1));
        // boundary of a 5x4 block has 14 pixels
        assert_eq!(traced.outer[0].len(), 14);
    }

    #[test]
    fn test_nested_components() {
        let (mut plane, w, h) = plane_from(&[
            "#######", //
            "#.....#", //
            "#.###.#", //
            "#.#.#.#", //
            "#.###.#", //
            "#.....#", //
            "#######",
        ]);
        let traced = trace_plane(&mut plane, w, h, Connectivity::Eight, true);
        assert_eq!(traced.count, 2);
        assert_eq!(traced.inner[0].len(), 1);
        assert_eq!(traced.inner[1].len(), 1);
        let labels = labels(&plane);
        assert_eq!(labels[0], 1);
        assert_eq!(labels[2 * w + 2], 2);
        assert_eq!(labels[3 * w + 3], 0);
        assert_eq!(labels[6 * w + 6], 1);
    }
}
