//! Grid and partition helpers shared by labeling tests and benches.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Parse rows of text into a row-major grid.
///
/// `.` is 0, `#` is 1, a digit is its value. All rows must have the same
/// width.
pub fn parse_grid(rows: &[&str]) -> (Vec<u8>, usize, usize) {
    let width = rows.first().map_or(0, |r| r.len());
    let mut data = Vec::with_capacity(width * rows.len());
    for row in rows {
        assert_eq!(row.len(), width, "Ragged grid row: {row:?}");
        data.extend(row.chars().map(|c| match c {
            '.' => 0,
            '#' => 1,
            d => d
                .to_digit(10)
                .unwrap_or_else(|| panic!("Unexpected grid character {c:?}")) as u8,
        }));
    }
    (data, width, rows.len())
}

/// Random 0/1 grid with roughly `density` foreground, reproducible by seed.
pub fn random_mask(width: usize, height: usize, density: f64, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..width * height)
        .map(|_| rng.random_bool(density) as u8)
        .collect()
}

/// Reference labeling by flood fill.
///
/// Components are numbered in scan order of their first pixel, background
/// is 0. Slow but obviously correct.
pub fn flood_fill_labels(mask: &[bool], width: usize, height: usize, eight: bool) -> Vec<u32> {
    const FOUR: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
    const EIGHT: [(isize, isize); 8] = [
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ];
    let steps: &[(isize, isize)] = if eight { &EIGHT } else { &FOUR };

    let mut labels = vec![0u32; width * height];
    let mut next = 0u32;
    let mut stack = Vec::new();
    for start in 0..width * height {
        if !mask[start] || labels[start] != 0 {
            continue;
        }
        next += 1;
        labels[start] = next;
        stack.push((start % width, start / width));
        while let Some((x, y)) = stack.pop() {
            for &(dx, dy) in steps {
                let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
                else {
                    continue;
                };
                if nx >= width || ny >= height {
                    continue;
                }
                let idx = ny * width + nx;
                if mask[idx] && labels[idx] == 0 {
                    labels[idx] = next;
                    stack.push((nx, ny));
                }
            }
        }
    }
    labels
}

/// Check that two labelings describe the same partition.
///
/// Background (0) must coincide and the label correspondence must be a
/// bijection; the label values themselves may differ.
pub fn same_partition(a: &[u32], b: &[u32]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut forward = std::collections::HashMap::new();
    let mut backward = std::collections::HashMap::new();
    for (&la, &lb) in a.iter().zip(b) {
        if (la == 0) != (lb == 0) {
            return false;
        }
        if la == 0 {
            continue;
        }
        if *forward.entry(la).or_insert(lb) != lb || *backward.entry(lb).or_insert(la) != la {
            return false;
        }
    }
    true
}
