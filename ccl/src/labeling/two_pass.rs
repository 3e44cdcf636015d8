//! Two-pass labeling.
//!
//! The first pass assigns provisional labels in raster order looking only at
//! already visited neighbours and records equivalences in a [`UnionFind`].
//! After flattening, the second pass writes the final labels.

use crate::array_view::ArrayView;
use crate::config::Connectivity;
use crate::error::Result;
use crate::pixel::Pixel;
use crate::union_find::UnionFind;

/// First pass: provisional labels into `plane` (row-major, `width` cells per
/// row), `0` for background.
pub(crate) fn scan<T: Pixel>(
    view: &ArrayView<'_, T>,
    background: T,
    connectivity: Connectivity,
    table: &mut UnionFind,
    plane: &mut [u32],
) -> Result<()> {
    match connectivity {
        Connectivity::Four => scan4(view, background, table, plane),
        Connectivity::Eight => scan8(view, background, table, plane),
    }
}

/// 4-connectivity: north and west neighbours.
fn scan4<T: Pixel>(
    view: &ArrayView<'_, T>,
    background: T,
    table: &mut UnionFind,
    plane: &mut [u32],
) -> Result<()> {
    let width = view.width();
    for y in 0..view.height() {
        let row = view.row(y)?;
        let base = y * width;
        for (x, &value) in row.iter().enumerate() {
            let idx = base + x;
            if value == background {
                plane[idx] = 0;
                continue;
            }
            let north = if y > 0 { plane[idx - width] } else { 0 };
            let west = if x > 0 { plane[idx - 1] } else { 0 };
            plane[idx] = match (north, west) {
                (0, 0) => table.make_set()?,
                (n, 0) => n,
                (0, w) => w,
                (n, w) if n == w => n,
                (n, w) => table.merge(n, w)?,
            };
        }
    }
    Ok(())
}

/// 8-connectivity decision tree.
///
/// North is checked first: when it is labeled every other causal neighbour
/// is already connected to it. Otherwise north-east may bridge north-west or
/// west, which are adjacent to each other.
fn scan8<T: Pixel>(
    view: &ArrayView<'_, T>,
    background: T,
    table: &mut UnionFind,
    plane: &mut [u32],
) -> Result<()> {
    let width = view.width();
    for y in 0..view.height() {
        let row = view.row(y)?;
        let base = y * width;
        for (x, &value) in row.iter().enumerate() {
            let idx = base + x;
            if value == background {
                plane[idx] = 0;
                continue;
            }
            let has_north = y > 0;
            let north = if has_north { plane[idx - width] } else { 0 };
            let north_east = if has_north && x + 1 < width {
                plane[idx - width + 1]
            } else {
                0
            };
            let north_west = if has_north && x > 0 {
                plane[idx - width - 1]
            } else {
                0
            };
            let west = if x > 0 { plane[idx - 1] } else { 0 };

            plane[idx] = if north != 0 {
                north
            } else if north_east != 0 {
                if north_west != 0 {
                    table.merge(north_east, north_west)?
                } else if west != 0 {
                    table.merge(north_east, west)?
                } else {
                    north_east
                }
            } else if north_west != 0 {
                north_west
            } else if west != 0 {
                west
            } else {
                table.make_set()?
            };
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_grid(grid: &[u8], width: usize, connectivity: Connectivity) -> (Vec<u32>, u32) {
        let view = ArrayView::new(grid, width, grid.len() / width).unwrap();
        let mut table = UnionFind::new();
        let mut plane = vec![0u32; grid.len()];
        scan(&view, 0, connectivity, &mut table, &mut plane).unwrap();
        let count = table.flatten();
        let finals = plane
            .iter()
            .map(|&l| if l == 0 { 0 } else { table.get(l).unwrap() })
            .collect();
        (finals, count)
    }

    #[test]
    fn test_u_shape_merges() {
        #[rustfmt::skip]
        let grid = [
            1, 0, 1,
            1, 0, 1,
            1, 1, 1,
        ];
        let (labels, count) = scan_grid(&grid, 3, Connectivity::Four);
        assert_eq!(count, 1);
        assert_eq!(labels, vec![1, 0, 1, 1, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_north_east_bridges_west() {
        #[rustfmt::skip]
        let grid = [
            0, 0, 1,
            1, 1, 0,
        ];
        let (labels, count) = scan_grid(&grid, 3, Connectivity::Eight);
        assert_eq!(count, 1);
        assert_eq!(labels, vec![0, 0, 1, 1, 1, 0]);

        let (labels, count) = scan_grid(&grid, 3, Connectivity::Four);
        assert_eq!(count, 2);
        assert_eq!(labels, vec![0, 0, 1, 2, 2, 0]);
    }

    #[test]
    fn test_north_east_bridges_north_west() {
        #[rustfmt::skip]
        let grid = [
            1, 0, 1,
            0, 1, 0,
        ];
        let (labels, count) = scan_grid(&grid, 3, Connectivity::Eight);
        assert_eq!(count, 1);
        assert_eq!(labels, vec![1, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_labels_follow_first_pixel_order() {
        #[rustfmt::skip]
        let grid = [
            0, 0, 0, 1,
            1, 0, 0, 1,
            1, 0, 1, 1,
            1, 1, 1, 0,
        ];
        let (labels, count) = scan_grid(&grid, 4, Connectivity::Four);
        assert_eq!(count, 1);
        assert!(labels.iter().all(|&l| l <= 1));

        #[rustfmt::skip]
        let grid = [
            0, 1, 0, 1,
            1, 0, 0, 0,
        ];
        let (labels, count) = scan_grid(&grid, 4, Connectivity::Four);
        assert_eq!(count, 3);
        assert_eq!(labels, vec![0, 1, 0, 2, 3, 0, 0, 0]);
    }
}
