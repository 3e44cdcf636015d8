//! Integral element types that can hold pixel values and labels.

use std::fmt::Debug;

use num_traits::{NumCast, PrimInt};

/// An integral pixel type.
///
/// Labeling overwrites pixel values with label IDs, so the type must be
/// able to represent every final label; [`Pixel::from_label`] performs the
/// checked conversion.
pub trait Pixel: PrimInt + Debug + Send + Sync + 'static {
    /// Convert a label to this type, `None` if it does not fit.
    #[inline]
    fn from_label(label: u32) -> Option<Self> {
        <Self as NumCast>::from(label)
    }

    /// Largest label representable by this type.
    #[inline]
    fn max_label() -> u32 {
        Self::max_value().to_u32().unwrap_or(u32::MAX)
    }
}

impl<T: PrimInt + Debug + Send + Sync + 'static> Pixel for T {}
