//! Pixel-space rectangles and point helpers.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pixel coordinates.
///
/// Covers the columns `x..x + width` and rows `y..y + height`, so a
/// single pixel has a width and height of 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[inline]
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Tight bounds of a set of points, `None` when the set is empty or
    /// holds negative coordinates.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a IVec2>) -> Option<Self> {
        let mut bounds = BoundsAccumulator::empty();
        for p in points {
            if p.x < 0 || p.y < 0 {
                return None;
            }
            bounds.include(p.x as usize, p.y as usize);
        }
        bounds.finish()
    }

    /// One past the right-most column.
    #[inline]
    pub const fn right(&self) -> usize {
        self.x + self.width
    }

    /// One past the bottom row.
    #[inline]
    pub const fn bottom(&self) -> usize {
        self.y + self.height
    }

    #[inline]
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point lies inside the rectangle.
    #[inline]
    pub fn contains(&self, p: IVec2) -> bool {
        p.x >= 0
            && p.y >= 0
            && (p.x as usize) >= self.x
            && (p.x as usize) < self.right()
            && (p.y as usize) >= self.y
            && (p.y as usize) < self.bottom()
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}x{}]", self.x, self.y, self.width, self.height)
    }
}

/// Running min/max of included pixels.
///
/// Starts with inverted bounds so the first included pixel sets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BoundsAccumulator {
    x_min: usize,
    y_min: usize,
    x_max: usize,
    y_max: usize,
}

impl BoundsAccumulator {
    #[inline]
    pub(crate) const fn empty() -> Self {
        Self {
            x_min: usize::MAX,
            y_min: usize::MAX,
            x_max: 0,
            y_max: 0,
        }
    }

    #[inline]
    pub(crate) fn include(&mut self, x: usize, y: usize) {
        self.x_min = self.x_min.min(x);
        self.y_min = self.y_min.min(y);
        self.x_max = self.x_max.max(x);
        self.y_max = self.y_max.max(y);
    }

    /// Convert inclusive min/max into a rectangle.
    #[inline]
    pub(crate) fn finish(&self) -> Option<Rect> {
        if self.x_min > self.x_max || self.y_min > self.y_max {
            return None;
        }
        Some(Rect::new(
            self.x_min,
            self.y_min,
            self.x_max - self.x_min + 1,
            self.y_max - self.y_min + 1,
        ))
    }
}

/// Scan-order key of a point: rows first, then columns.
#[inline]
pub(crate) fn scan_order(p: &IVec2) -> (i32, i32) {
    (p.y, p.x)
}
