//! Connected component records.
//!
//! A [`ConnectedComponent`] holds whatever the selected extractors gathered
//! during labeling. Derived values are computed on first access from the
//! data that is present and cached; asking for a value whose inputs were
//! never extracted fails with [`Error::MissingFeature`].

use std::sync::OnceLock;

use glam::{DVec2, IVec2};

use crate::color::Color;
use crate::config::Connectivity;
use crate::error::{Error, Result};
use crate::extractor::Accumulators;
use crate::geometry::{Rect, scan_order};
use crate::hull::convex_hull;
use crate::labeling::contour::{self, FOREGROUND};

fn missing(need: &'static str, feature: &'static str) -> Error {
    Error::MissingFeature { need, feature }
}

/// Return the cached value or compute and store it.
fn cached<T>(cell: &OnceLock<T>, compute: impl FnOnce() -> Result<T>) -> Result<&T> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = compute()?;
    Ok(cell.get_or_init(|| value))
}

/// A labeled region and its extracted features.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectedComponent {
    label: u32,
    connectivity: Connectivity,
    pub(crate) area: Option<usize>,
    /// Member pixels in scan order.
    pub(crate) points: Option<Vec<IVec2>>,
    pub(crate) bounding_box: OnceLock<Rect>,
    pub(crate) centroid: OnceLock<DVec2>,
    extent: OnceLock<f64>,
    pub(crate) contour: OnceLock<Vec<IVec2>>,
    pub(crate) inner_contours: OnceLock<Vec<Vec<IVec2>>>,
    pub(crate) hull: OnceLock<Vec<IVec2>>,
    fill_color: Option<Color>,
    pub(crate) acc: Accumulators,
}

impl ConnectedComponent {
    /// Empty record for `label`.
    pub fn new(label: u32, connectivity: Connectivity) -> Self {
        Self {
            label,
            connectivity,
            area: None,
            points: None,
            bounding_box: OnceLock::new(),
            centroid: OnceLock::new(),
            extent: OnceLock::new(),
            contour: OnceLock::new(),
            inner_contours: OnceLock::new(),
            hull: OnceLock::new(),
            fill_color: None,
            acc: Accumulators::default(),
        }
    }

    /// Record built from a set of member pixels.
    ///
    /// Points are sorted into scan order and deduplicated.
    pub fn from_points(
        label: u32,
        connectivity: Connectivity,
        points: impl IntoIterator<Item = IVec2>,
    ) -> Self {
        let mut points: Vec<IVec2> = points.into_iter().collect();
        points.sort_unstable_by_key(scan_order);
        points.dedup();
        let mut component = Self::new(label, connectivity);
        component.area = Some(points.len());
        component.points = Some(points);
        component
    }

    #[inline]
    pub fn label(&self) -> u32 {
        self.label
    }

    #[inline]
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Number of member pixels.
    pub fn area(&self) -> Result<usize> {
        match (self.area, &self.points) {
            (Some(area), _) => Ok(area),
            (None, Some(points)) => Ok(points.len()),
            (None, None) => Err(missing("area or point set", "area")),
        }
    }

    /// Alias of [`area`](Self::area).
    #[inline]
    pub fn size(&self) -> Result<usize> {
        self.area()
    }

    /// Member pixels in scan order.
    pub fn points(&self) -> Result<&[IVec2]> {
        self.points
            .as_deref()
            .ok_or_else(|| missing("point set", "points"))
    }

    fn points_for(&self, feature: &'static str) -> Result<&[IVec2]> {
        self.points
            .as_deref()
            .ok_or_else(|| missing("point set", feature))
    }

    /// Mean position of the member pixels.
    ///
    /// Computed in `f64`; callers needing `f32` convert with
    /// [`DVec2::as_vec2`].
    pub fn centroid(&self) -> Result<DVec2> {
        cached(&self.centroid, || {
            let points = self.points_for("centroid")?;
            if points.is_empty() {
                return Err(missing("non-empty point set", "centroid"));
            }
            let sum = points
                .iter()
                .fold(DVec2::ZERO, |acc, p| acc + p.as_dvec2());
            Ok(sum / points.len() as f64)
        })
        .copied()
    }

    /// Tight bounds of the member pixels.
    ///
    /// Derived from the point set, or from the outer contour when only
    /// contours were extracted.
    pub fn bounding_box(&self) -> Result<Rect> {
        cached(&self.bounding_box, || {
            let source = match (&self.points, self.contour.get()) {
                (Some(points), _) => points.as_slice(),
                (None, Some(contour)) => contour.as_slice(),
                (None, None) => return Err(missing("point set or contour", "bounding box")),
            };
            Rect::from_points(source).ok_or_else(|| missing("non-empty point set", "bounding box"))
        })
        .copied()
    }

    /// Bounding box area divided by pixel area, 1 for filled rectangles.
    ///
    /// Always `f64`, whatever the pixel type.
    pub fn extent(&self) -> Result<f64> {
        cached(&self.extent, || {
            let bbox = self.bounding_box()?;
            let area = self.area()?;
            if area == 0 {
                return Err(missing("non-empty area", "extent"));
            }
            Ok(bbox.area() as f64 / area as f64)
        })
        .copied()
    }

    /// Check whether a pixel belongs to the component.
    pub fn contains(&self, p: IVec2) -> Result<bool> {
        let points = self.points_for("membership")?;
        Ok(points
            .binary_search_by_key(&scan_order(&p), scan_order)
            .is_ok())
    }

    /// Outer boundary, clockwise on screen, starting at the top-left pixel.
    pub fn contour(&self) -> Result<&[IVec2]> {
        cached(&self.contour, || {
            let (outer, inner) = self.trace_points()?;
            let _ = self.inner_contours.set(inner);
            Ok(outer)
        })
        .map(Vec::as_slice)
    }

    /// Boundaries of the holes, one per hole.
    pub fn inner_contours(&self) -> Result<&[Vec<IVec2>]> {
        cached(&self.inner_contours, || {
            let (outer, inner) = self.trace_points()?;
            let _ = self.contour.set(outer);
            Ok(inner)
        })
        .map(Vec::as_slice)
    }

    /// True when the component has no holes.
    pub fn solid(&self) -> Result<bool> {
        Ok(self.inner_contours()?.is_empty())
    }

    /// Convex hull vertices, clockwise on screen.
    pub fn convex_hull(&self) -> Result<&[IVec2]> {
        cached(&self.hull, || match self.contour.get() {
            Some(contour) => Ok(convex_hull(contour)),
            None => Ok(convex_hull(self.points_for("convex hull")?)),
        })
        .map(Vec::as_slice)
    }

    /// Convex hull vertices, counter-clockwise on screen, from the same
    /// starting vertex.
    pub fn convex_hull_ccw(&self) -> Result<Vec<IVec2>> {
        let mut hull = self.convex_hull()?.to_vec();
        if hull.len() > 1 {
            hull[1..].reverse();
        }
        Ok(hull)
    }

    /// Smallest Euclidean distance between member pixels of two components.
    pub fn distance(&self, other: &ConnectedComponent) -> Result<f64> {
        let a = self.points_for("distance")?;
        let b = other.points_for("distance")?;
        let best = a
            .iter()
            .flat_map(|p| b.iter().map(move |q| (*p - *q).as_i64vec2().length_squared()))
            .min()
            .ok_or_else(|| missing("non-empty point set", "distance"))?;
        Ok((best as f64).sqrt())
    }

    /// Absorb `other` into this component.
    ///
    /// The label becomes the smaller of the two and the area their sum.
    /// Point sets are united when both components have one, otherwise the
    /// point set is dropped. Every derived value is recomputed on demand.
    pub fn merge(&mut self, other: &ConnectedComponent) {
        self.label = self.label.min(other.label);
        self.area = match (self.area(), other.area()) {
            (Ok(a), Ok(b)) => Some(a + b),
            _ => None,
        };
        self.points = match (self.points.take(), &other.points) {
            (Some(mut points), Some(theirs)) => {
                points.extend_from_slice(theirs);
                points.sort_unstable_by_key(scan_order);
                points.dedup();
                Some(points)
            }
            _ => None,
        };
        self.invalidate();
    }

    /// Fill the holes of the component.
    ///
    /// Hole pixels join the point set, so area and centroid change while
    /// the outer contour, bounding box and hull stay valid.
    pub fn fill(&mut self) -> Result<()> {
        let points = self.points_for("fill")?;
        let Some(bbox) = Rect::from_points(points) else {
            return Ok(());
        };
        let (mask, width, height) = padded_mask(points, bbox);

        // Background of an 8-connected region is 4-connected and vice versa
        let outside = flood_outside(&mask, width, height, self.connectivity);
        let holes: Vec<IVec2> = (1..height - 1)
            .flat_map(|y| (1..width - 1).map(move |x| (x, y)))
            .filter(|&(x, y)| mask[y * width + x] == 0 && !outside[y * width + x])
            .map(|(x, y)| IVec2::new((bbox.x + x - 1) as i32, (bbox.y + y - 1) as i32))
            .collect();

        if !holes.is_empty() {
            let mut filled = points.to_vec();
            filled.extend(holes);
            filled.sort_unstable_by_key(scan_order);
            self.area = Some(filled.len());
            self.points = Some(filled);
            self.centroid.take();
            self.extent.take();
        }
        self.inner_contours = OnceLock::from(Vec::new());
        Ok(())
    }

    #[inline]
    pub fn fill_color(&self) -> Option<Color> {
        self.fill_color
    }

    #[inline]
    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = Some(color);
    }

    fn invalidate(&mut self) {
        self.bounding_box.take();
        self.centroid.take();
        self.extent.take();
        self.contour.take();
        self.inner_contours.take();
        self.hull.take();
    }

    /// Trace outer and inner contours on a padded mask of the point set.
    fn trace_points(&self) -> Result<(Vec<IVec2>, Vec<Vec<IVec2>>)> {
        let points = self.points_for("contours")?;
        let bbox =
            Rect::from_points(points).ok_or_else(|| missing("non-empty point set", "contours"))?;
        let (mut plane, width, height) = padded_mask(points, bbox);
        let traced = contour::trace_plane(&mut plane, width, height, self.connectivity, true);

        let offset = IVec2::new(bbox.x as i32 - 1, bbox.y as i32 - 1);
        let shift = |c: Vec<IVec2>| c.into_iter().map(|p| p + offset).collect::<Vec<_>>();
        let outer = traced.outer.into_iter().next().map(shift).unwrap_or_default();
        let inner = traced
            .inner
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(shift)
            .collect();
        Ok((outer, inner))
    }
}

/// Scratch plane of `bbox` grown by one pixel on every side, with member
/// pixels set to [`FOREGROUND`].
fn padded_mask(points: &[IVec2], bbox: Rect) -> (Vec<u32>, usize, usize) {
    let width = bbox.width + 2;
    let height = bbox.height + 2;
    let mut plane = vec![0u32; width * height];
    for p in points {
        let x = p.x as usize - bbox.x + 1;
        let y = p.y as usize - bbox.y + 1;
        plane[y * width + x] = FOREGROUND;
    }
    (plane, width, height)
}

/// Background cells reachable from the padded border.
fn flood_outside(mask: &[u32], width: usize, height: usize, region: Connectivity) -> Vec<bool> {
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
    let steps: &[(isize, isize)] = match region {
        Connectivity::Eight => &FOUR,
        Connectivity::Four => &EIGHT,
    };

    let mut outside = vec![false; mask.len()];
    let mut stack = vec![(0usize, 0usize)];
    outside[0] = true;
    while let Some((x, y)) = stack.pop() {
        for &(dx, dy) in steps {
            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                continue;
            };
            if nx >= width || ny >= height {
                continue;
            }
            let idx = ny * width + nx;
            if mask[idx] == 0 && !outside[idx] {
                outside[idx] = true;
                stack.push((nx, ny));
            }
        }
    }
    outside
}

#[cfg(test)]
mod tests;
