//! Error types for labeling and feature extraction.

use thiserror::Error;

use crate::geometry::Rect;

/// Broad classification of an [`Error`].
///
/// Every error belongs to exactly one kind, so callers can react to the
/// category (bad arguments, inconsistent buffer shape, out-of-range access,
/// missing prerequisite feature) without matching individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid call arguments, detected before any scan starts.
    Argument,
    /// Buffer length or layout inconsistent with the declared shape.
    DataShape,
    /// Out-of-range index, coordinate or label.
    Bounds,
    /// A derived feature was requested without the data it is computed from.
    Precondition,
}

/// Errors that can occur while labeling or querying components.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("Connectivity must be 4 or 8, got {0}")]
    InvalidConnectivity(u8),

    #[error("Foreground and background values cannot be identical")]
    IdenticalMarkers,

    #[error("Image must not be empty, got {width}x{height}")]
    EmptyImage { width: usize, height: usize },

    #[error("Stride {stride} is smaller than width {width}")]
    StrideTooSmall { stride: usize, width: usize },

    #[error("Pitch of {pitch} bytes is not a multiple of the element size {element_size}")]
    UnalignedPitch { pitch: usize, element_size: usize },

    #[error("Buffer holds {len} elements, expected {expected}")]
    BufferSizeMismatch { len: usize, expected: usize },

    #[error("{count} components do not fit in the pixel type")]
    LabelOverflow { count: usize },

    #[error("Coordinate ({x}, {y}) out of bounds for {width}x{height} view")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    #[error("Index {index} out of bounds for view of {len} elements")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Invalid label {label}, table holds {len} entries")]
    InvalidLabel { label: u32, len: usize },

    #[error("Subview {rect:?} exceeds parent bounds {width}x{height}")]
    SubviewOutOfBounds {
        rect: Rect,
        width: usize,
        height: usize,
    },

    #[error("Need at least {need} to compute {feature}")]
    MissingFeature {
        need: &'static str,
        feature: &'static str,
    },
}

impl Error {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidConnectivity(_) | Error::IdenticalMarkers | Error::EmptyImage { .. } => {
                ErrorKind::Argument
            }
            Error::StrideTooSmall { .. }
            | Error::UnalignedPitch { .. }
            | Error::BufferSizeMismatch { .. }
            | Error::LabelOverflow { .. } => ErrorKind::DataShape,
            Error::OutOfBounds { .. }
            | Error::IndexOutOfBounds { .. }
            | Error::InvalidLabel { .. }
            | Error::SubviewOutOfBounds { .. } => ErrorKind::Bounds,
            Error::MissingFeature { .. } => ErrorKind::Precondition,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_message() {
        let err = Error::InvalidConnectivity(6);
        assert_eq!(err.to_string(), "Connectivity must be 4 or 8, got 6");
        assert_eq!(err.kind(), ErrorKind::Argument);
    }

    #[test]
    fn test_missing_feature_message() {
        let err = Error::MissingFeature {
            need: "point set",
            feature: "centroid",
        };
        assert_eq!(err.to_string(), "Need at least point set to compute centroid");
        assert_eq!(err.kind(), ErrorKind::Precondition);
    }

    #[test]
    fn test_kinds_are_distinct() {
        let kinds = [
            Error::IdenticalMarkers.kind(),
            Error::BufferSizeMismatch {
                len: 3,
                expected: 4,
            }
            .kind(),
            Error::IndexOutOfBounds { index: 9, len: 4 }.kind(),
            Error::MissingFeature {
                need: "bounding box",
                feature: "extent",
            }
            .kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
