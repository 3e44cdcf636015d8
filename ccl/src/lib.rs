//! CCL - connected component labeling for raster images.
//!
//! Labels the foreground regions of a 2D integer buffer in place and
//! optionally extracts per-region features:
//! - Two-pass union-find labeling for area, centroid, points and bounds
//! - Contour-tracing labeling for outer/inner contours and convex hulls
//! - 4- or 8-connectivity, strided and pitched buffers, subviews
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ccl::{FeatureFlags, label_with_features};
//!
//! let mut pixels: Vec<u8> = load_mask();
//! let result = label_with_features(&mut pixels, 640, 480, 640, 8, 255, 0, FeatureFlags::AREA)?;
//! for component in &result.components {
//!     println!("{} -> {} px", component.label(), component.area()?);
//! }
//! ```

mod array_view;
mod color;
mod component;
mod config;
mod error;
mod extractor;
mod feature;
mod geometry;
pub mod hull;
mod label_map;
mod labeling;
mod pixel;
mod union_find;

// ============================================================================
// Errors
// ============================================================================

pub use error::{Error, ErrorKind, Result};

// ============================================================================
// Buffers and geometry
// ============================================================================

pub use array_view::{ArrayView, ArrayViewMut, Pitch};
pub use color::{Color, random_color};
pub use geometry::Rect;
pub use pixel::Pixel;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{Config, Connectivity};
pub use feature::FeatureFlags;

// ============================================================================
// Labeling
// ============================================================================

pub use component::ConnectedComponent;
pub use extractor::{Extractor, ExtractorSet};
pub use hull::convex_hull;
pub use label_map::LabelMap;
pub use labeling::{Labeler, Labeling, Strategy, label, label_with_features};
pub use union_find::UnionFind;
