//! Per-pixel feature extractors run during the relabeling pass.
//!
//! Every extractor kind follows the same protocol: `initialise` once per
//! component before the pass, `update` once per member pixel in scan order,
//! `finalise` once per component after the pass. Each kind only touches its
//! own accumulator and output fields, so kinds compose freely.

use std::sync::OnceLock;

use glam::{DVec2, IVec2};

use crate::component::ConnectedComponent;
use crate::feature::FeatureFlags;
use crate::geometry::BoundsAccumulator;

/// Running per-component state owned by [`ConnectedComponent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Accumulators {
    area: usize,
    sum_x: u64,
    sum_y: u64,
    samples: usize,
    bounds: BoundsAccumulator,
}

impl Default for Accumulators {
    fn default() -> Self {
        Self {
            area: 0,
            sum_x: 0,
            sum_y: 0,
            samples: 0,
            bounds: BoundsAccumulator::empty(),
        }
    }
}

/// A feature extractor kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extractor {
    /// Pixel count.
    Area,
    /// Mean pixel position.
    Centroid,
    /// Member pixel list; also sets the area.
    Points,
    /// Running min/max, converted to a rectangle at the end.
    BoundingBox,
}

impl Extractor {
    #[inline]
    pub fn initialise(self, component: &mut ConnectedComponent) {
        let acc = &mut component.acc;
        match self {
            Extractor::Area => acc.area = 0,
            Extractor::Centroid => {
                acc.sum_x = 0;
                acc.sum_y = 0;
                acc.samples = 0;
            }
            Extractor::Points => component.points = Some(Vec::new()),
            Extractor::BoundingBox => acc.bounds = BoundsAccumulator::empty(),
        }
    }

    #[inline]
    pub fn update(self, x: usize, y: usize, component: &mut ConnectedComponent) {
        let acc = &mut component.acc;
        match self {
            Extractor::Area => acc.area += 1,
            Extractor::Centroid => {
                acc.sum_x += x as u64;
                acc.sum_y += y as u64;
                acc.samples += 1;
            }
            Extractor::Points => component
                .points
                .get_or_insert_with(Vec::new)
                .push(IVec2::new(x as i32, y as i32)),
            Extractor::BoundingBox => acc.bounds.include(x, y),
        }
    }

    #[inline]
    pub fn finalise(self, component: &mut ConnectedComponent) {
        let acc = component.acc;
        match self {
            Extractor::Area => component.area = Some(acc.area),
            Extractor::Centroid => {
                if acc.samples > 0 {
                    let n = acc.samples as f64;
                    let centroid = DVec2::new(acc.sum_x as f64 / n, acc.sum_y as f64 / n);
                    component.centroid = OnceLock::from(centroid);
                }
            }
            Extractor::Points => {
                component.area = Some(component.points.as_ref().map_or(0, Vec::len));
            }
            Extractor::BoundingBox => {
                if let Some(rect) = acc.bounds.finish() {
                    component.bounding_box = OnceLock::from(rect);
                }
            }
        }
    }
}

/// Extractors selected for one labeling call, in a fixed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractorSet {
    extractors: Vec<Extractor>,
}

impl ExtractorSet {
    /// Select extractors for `flags`.
    ///
    /// The order is always area, centroid, points, bounding box. Extent
    /// selects both area and bounding box; contour and hull flags select
    /// nothing here.
    pub fn from_flags(flags: FeatureFlags) -> Self {
        const EXTENT_ONLY: FeatureFlags = FeatureFlags::from_bits_truncate(0x010);

        let mut extractors = Vec::with_capacity(4);
        if flags.intersects(FeatureFlags::AREA) || flags.intersects(EXTENT_ONLY) {
            extractors.push(Extractor::Area);
        }
        if flags.intersects(FeatureFlags::CENTROID) {
            extractors.push(Extractor::Centroid);
        }
        if flags.intersects(FeatureFlags::POINTS) {
            extractors.push(Extractor::Points);
        }
        if flags.intersects(FeatureFlags::BOUNDING_BOX) {
            extractors.push(Extractor::BoundingBox);
        }
        Self { extractors }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Extractor> + '_ {
        self.extractors.iter().copied()
    }

    pub fn initialise(&self, components: &mut [ConnectedComponent]) {
        for &extractor in &self.extractors {
            components.iter_mut().for_each(|c| extractor.initialise(c));
        }
    }

    #[inline]
    pub fn update(&self, x: usize, y: usize, component: &mut ConnectedComponent) {
        for &extractor in &self.extractors {
            extractor.update(x, y, component);
        }
    }

    pub fn finalise(&self, components: &mut [ConnectedComponent]) {
        for &extractor in &self.extractors {
            components.iter_mut().for_each(|c| extractor.finalise(c));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Connectivity;
    use crate::geometry::Rect;

    fn run(set: &ExtractorSet, pixels: &[(usize, usize)]) -> ConnectedComponent {
        let mut components = vec![ConnectedComponent::new(1, Connectivity::Eight)];
        set.initialise(&mut components);
        for &(x, y) in pixels {
            set.update(x, y, &mut components[0]);
        }
        set.finalise(&mut components);
        components.remove(0)
    }

    #[test]
    fn test_fixed_order() {
        let set = ExtractorSet::from_flags(
            FeatureFlags::BOUNDING_BOX | FeatureFlags::POINTS | FeatureFlags::AREA,
        );
        let kinds: Vec<Extractor> = set.iter().collect();
        assert_eq!(
            kinds,
            vec![Extractor::Area, Extractor::Points, Extractor::BoundingBox]
        );
    }

    #[test]
    fn test_extent_selects_area_and_bbox() {
        let set = ExtractorSet::from_flags(FeatureFlags::EXTENT);
        let kinds: Vec<Extractor> = set.iter().collect();
        assert_eq!(kinds, vec![Extractor::Area, Extractor::BoundingBox]);
    }

    #[test]
    fn test_contours_select_nothing() {
        assert!(ExtractorSet::from_flags(FeatureFlags::ALL_CONTOURS).is_empty());
        assert!(ExtractorSet::from_flags(FeatureFlags::NONE).is_empty());
        assert_eq!(ExtractorSet::from_flags(FeatureFlags::ALL).len(), 4);
    }

    #[test]
    fn test_area_and_centroid() {
        let set = ExtractorSet::from_flags(FeatureFlags::AREA | FeatureFlags::CENTROID);
        let c = run(&set, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        assert_eq!(c.area().unwrap(), 4);
        let centroid = c.centroid().unwrap();
        assert!((centroid.x - 1.5).abs() < 1e-12);
        assert!((centroid.y - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_bounding_box_inclusive() {
        let set = ExtractorSet::from_flags(FeatureFlags::BOUNDING_BOX);
        let c = run(&set, &[(4, 2), (6, 3), (5, 5)]);
        assert_eq!(c.bounding_box().unwrap(), Rect::new(4, 2, 3, 4));
    }

    #[test]
    fn test_points_set_area() {
        let set = ExtractorSet::from_flags(FeatureFlags::POINTS);
        let c = run(&set, &[(0, 0), (1, 0), (0, 1)]);
        assert_eq!(c.area().unwrap(), 3);
        assert_eq!(
            c.points().unwrap(),
            &[IVec2::new(0, 0), IVec2::new(1, 0), IVec2::new(0, 1)]
        );
    }

    #[test]
    fn test_reinitialise_resets_state() {
        let set = ExtractorSet::from_flags(FeatureFlags::AREA | FeatureFlags::CENTROID);
        let mut components = vec![ConnectedComponent::new(1, Connectivity::Four)];
        set.initialise(&mut components);
        set.update(9, 9, &mut components[0]);
        set.initialise(&mut components);
        set.update(1, 1, &mut components[0]);
        set.finalise(&mut components);
        assert_eq!(components[0].area().unwrap(), 1);
        assert_eq!(components[0].centroid().unwrap(), DVec2::new(1.0, 1.0));
    }
}
