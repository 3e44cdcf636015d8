//! Connected component labeling engine.
//!
//! Two strategies share one entry point. Without contour features a
//! two-pass union-find scan assigns labels; with any contour or hull feature
//! a contour-tracing scan labels and traces boundaries in one go. Both
//! number components in the scan order of their first pixel, write labels
//! `1..=K` over the input (background becomes `0`), and run the selected
//! extractors while writing.
//!
//! Labeling is destructive: the caller's buffer becomes a label map, so
//! labeling the same buffer twice treats the labels of the first run as
//! pixel values. Use [`LabelMap::from_view`](crate::LabelMap::from_view) to
//! keep the input intact.

pub(crate) mod contour;
mod two_pass;


use crate::array_view::{ArrayView, ArrayViewMut};
use crate::component::ConnectedComponent;
use crate::config::{Config, Connectivity};
use crate::error::{Error, Result};
use crate::extractor::ExtractorSet;
use crate::feature::FeatureFlags;
use crate::hull::convex_hull;
use crate::pixel::Pixel;
use crate::union_find::UnionFind;

/// Scanner used for a labeling call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Union-find raster scan followed by a relabeling pass.
    TwoPass,
    /// Boundary tracing; needed for contour and hull features.
    ContourTracing,
}

/// Output of [`label_with_features`].
#[derive(Debug, Clone, PartialEq)]
pub struct Labeling {
    /// Number of components; labels run from 1 to `count`.
    pub count: usize,
    /// One record per label, `components[label - 1]`. Empty when no
    /// features were requested.
    pub components: Vec<ConnectedComponent>,
}

/// Reusable labeling engine.
///
/// Owns the scratch state of a labeling call (label table, scratch plane,
/// selected extractors) so repeated calls reuse allocations. Calls take
/// `&mut self`, so one instance serves one call at a time.
#[derive(Debug)]
pub struct Labeler<T> {
    config: Config<T>,
    extractors: ExtractorSet,
    table: UnionFind,
    plane: Vec<u32>,
}

impl<T: Pixel> Labeler<T> {
    pub fn new(config: Config<T>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            extractors: ExtractorSet::from_flags(config.features),
            config,
            table: UnionFind::new(),
            plane: Vec::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &Config<T> {
        &self.config
    }

    #[inline]
    pub fn extractors(&self) -> &ExtractorSet {
        &self.extractors
    }

    /// Scanner selected for the configured features.
    pub fn strategy(&self) -> Strategy {
        if self.config.features.requires_contours() {
            Strategy::ContourTracing
        } else {
            Strategy::TwoPass
        }
    }

    /// Label `view` in place and return the number of components.
    ///
    /// Configured features are ignored.
    pub fn label(&mut self, view: &mut ArrayViewMut<'_, T>) -> Result<usize> {
        let count = self.scan_two_pass(&view.as_view())?;
        self.write_two_pass(view, count, None)?;
        tracing::debug!(
            width = view.width(),
            height = view.height(),
            connectivity = self.config.connectivity.neighbours(),
            count,
            "Labeled components"
        );
        Ok(count)
    }

    /// Label `view` in place and extract the configured features.
    pub fn label_with_features(&mut self, view: &mut ArrayViewMut<'_, T>) -> Result<Labeling> {
        if self.config.features.is_empty() {
            let count = self.label(view)?;
            return Ok(Labeling {
                count,
                components: Vec::new(),
            });
        }

        let strategy = self.strategy();
        let components = match strategy {
            Strategy::TwoPass => {
                let count = self.scan_two_pass(&view.as_view())?;
                let mut components = self.new_components(count);
                self.write_two_pass(view, count, Some(&mut components))?;
                components
            }
            Strategy::ContourTracing => self.label_contours(view)?,
        };

        tracing::debug!(
            width = view.width(),
            height = view.height(),
            connectivity = self.config.connectivity.neighbours(),
            ?strategy,
            features = ?self.config.features,
            count = components.len(),
            "Labeled components"
        );
        Ok(Labeling {
            count: components.len(),
            components,
        })
    }

    fn reset_plane(&mut self, len: usize) {
        self.plane.clear();
        self.plane.resize(len, 0);
    }

    /// Provisional scan and flattening; returns the component count after
    /// checking that it fits the pixel type.
    fn scan_two_pass(&mut self, view: &ArrayView<'_, T>) -> Result<usize> {
        self.table.clear();
        self.reset_plane(view.len());
        two_pass::scan(
            view,
            self.config.background,
            self.config.connectivity,
            &mut self.table,
            &mut self.plane,
        )?;
        let count = self.table.flatten();
        check_fits::<T>(count)?;
        Ok(count as usize)
    }

    fn new_components(&self, count: usize) -> Vec<ConnectedComponent> {
        let mut components: Vec<ConnectedComponent> = (1..=count as u32)
            .map(|label| ConnectedComponent::new(label, self.config.connectivity))
            .collect();
        self.extractors.initialise(&mut components);
        components
    }

    /// Second pass: final labels into the view, extractors on every
    /// labeled pixel.
    fn write_two_pass(
        &self,
        view: &mut ArrayViewMut<'_, T>,
        count: usize,
        mut components: Option<&mut Vec<ConnectedComponent>>,
    ) -> Result<()> {
        let width = view.width();
        for y in 0..view.height() {
            let provisional = &self.plane[y * width..(y + 1) * width];
            let row = view.row_mut(y)?;
            for (x, (out, &label)) in row.iter_mut().zip(provisional).enumerate() {
                if label == 0 {
                    *out = T::zero();
                    continue;
                }
                let label = self.table.get(label)?;
                *out = to_pixel(label, count)?;
                if let Some(components) = components.as_deref_mut() {
                    self.extractors
                        .update(x, y, &mut components[label as usize - 1]);
                }
            }
        }
        if let Some(components) = components {
            self.extractors.finalise(components);
        }
        Ok(())
    }

    fn label_contours(&mut self, view: &mut ArrayViewMut<'_, T>) -> Result<Vec<ConnectedComponent>> {
        let (width, height) = (view.width(), view.height());
        let background = self.config.background;
        self.reset_plane(width * height);
        for (cell, &value) in self.plane.iter_mut().zip(view.iter()) {
            if value != background {
                *cell = contour::FOREGROUND;
            }
        }

        let features = self.config.features;
        let traced = contour::trace_plane(
            &mut self.plane,
            width,
            height,
            self.config.connectivity,
            features.intersects(FeatureFlags::INNER_CONTOURS),
        );
        check_fits::<T>(traced.count)?;
        let count = traced.count as usize;

        let mut components = self.new_components(count);
        for ((component, outer), inner) in components
            .iter_mut()
            .zip(traced.outer)
            .zip(traced.inner)
        {
            if features.wants_hull() {
                component.hull.get_or_init(|| convex_hull(&outer));
            }
            if features.intersects(FeatureFlags::INNER_CONTOURS) {
                component.inner_contours.get_or_init(|| inner);
            }
            component.contour.get_or_init(|| outer);
        }

        for y in 0..height {
            let labels = &self.plane[y * width..(y + 1) * width];
            let row = view.row_mut(y)?;
            for (x, (out, &label)) in row.iter_mut().zip(labels).enumerate() {
                if !contour::is_label(label) {
                    *out = T::zero();
                    continue;
                }
                *out = to_pixel(label, count)?;
                self.extractors
                    .update(x, y, &mut components[label as usize - 1]);
            }
        }
        self.extractors.finalise(&mut components);
        Ok(components)
    }
}

fn check_fits<T: Pixel>(count: u32) -> Result<()> {
    if count > T::max_label() {
        return Err(Error::LabelOverflow {
            count: count as usize,
        });
    }
    Ok(())
}

#[inline]
fn to_pixel<T: Pixel>(label: u32, count: usize) -> Result<T> {
    T::from_label(label).ok_or(Error::LabelOverflow { count })
}

/// Build the configuration of a raw-buffer call and check the buffer shape.
fn validate_call<T: Pixel>(
    len: usize,
    width: usize,
    height: usize,
    stride: usize,
    connectivity: u8,
    foreground: T,
    background: T,
) -> Result<Config<T>> {
    let connectivity = Connectivity::try_from(connectivity)?;
    let config = Config::new(foreground, background).with_connectivity(connectivity);
    config.validate()?;
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }
    if stride < width {
        return Err(Error::StrideTooSmall { stride, width });
    }
    let expected = height * stride;
    if len != expected {
        return Err(Error::BufferSizeMismatch { len, expected });
    }
    Ok(config)
}

/// Label a raw buffer in place and return the number of components.
///
/// `buffer` holds `height` rows of `stride` elements of which the first
/// `width` are pixels. Pixels equal to `background` are background, all
/// others foreground. On success the pixels hold labels `1..=K` and
/// background `0`; on error the buffer is untouched.
pub fn label<T: Pixel>(
    buffer: &mut [T],
    width: usize,
    height: usize,
    stride: usize,
    connectivity: u8,
    foreground: T,
    background: T,
) -> Result<usize> {
    let config = validate_call(
        buffer.len(),
        width,
        height,
        stride,
        connectivity,
        foreground,
        background,
    )?;
    let mut view = ArrayViewMut::with_stride(buffer, width, height, stride)?;
    Labeler::new(config)?.label(&mut view)
}

/// Label a raw buffer in place and extract `features` per component.
///
/// Same contract as [`label`]. With [`FeatureFlags::NONE`] no component
/// records are produced.
#[allow(clippy::too_many_arguments)]
pub fn label_with_features<T: Pixel>(
    buffer: &mut [T],
    width: usize,
    height: usize,
    stride: usize,
    connectivity: u8,
    foreground: T,
    background: T,
    features: FeatureFlags,
) -> Result<Labeling> {
    let config = validate_call(
        buffer.len(),
        width,
        height,
        stride,
        connectivity,
        foreground,
        background,
    )?
    .with_features(features);
    let mut view = ArrayViewMut::with_stride(buffer, width, height, stride)?;
    Labeler::new(config)?.label_with_features(&mut view)
}
