//! Copy-producing labeling.

use std::ops::Index;

use crate::array_view::{ArrayView, ArrayViewMut};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::labeling::Labeler;
use crate::pixel::Pixel;

/// Dense label plane computed from a view without modifying it.
///
/// Labels are `1..=num_labels` for components and `0` for background,
/// stored row-major with no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: Vec<u32>,
    num_labels: usize,
    width: usize,
    height: usize,
}

impl LabelMap {
    /// Label a copy of `view`. The configured features are ignored.
    pub fn from_view<T: Pixel>(view: &ArrayView<'_, T>, config: &Config<T>) -> Result<Self> {
        config.validate()?;
        let (width, height) = (view.width(), view.height());
        let mut labels: Vec<u32> = view
            .iter()
            .map(|&v| u32::from(!config.is_background(v)))
            .collect();

        let mask_config = Config::new(1u32, 0u32).with_connectivity(config.connectivity);
        let num_labels = {
            let mut mask = ArrayViewMut::new(&mut labels, width, height)?;
            Labeler::new(mask_config)?.label(&mut mask)?
        };
        tracing::debug!(width, height, num_labels, "Built label map");

        Ok(Self {
            labels,
            num_labels,
            width,
            height,
        })
    }

    #[inline]
    pub fn num_labels(&self) -> usize {
        self.num_labels
    }

    #[inline]
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Label at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Result<u32> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x: x as i64,
                y: y as i64,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.labels[y * self.width + x])
    }

    /// Pixel count per label, index `label - 1`.
    pub fn areas(&self) -> Vec<usize> {
        let mut areas = vec![0usize; self.num_labels];
        for &label in self.labels.iter().filter(|&&l| l != 0) {
            areas[label as usize - 1] += 1;
        }
        areas
    }
}

impl Index<usize> for LabelMap {
    type Output = u32;

    #[inline]
    fn index(&self, idx: usize) -> &Self::Output {
        &self.labels[idx]
    }
}
