//! Strided 2D views over flat pixel buffers.
//!
//! A view presents `height` rows of `width` elements, where consecutive rows
//! start `stride` elements apart in the backing slice. Views never own their
//! data; subviews share the parent's buffer and keep its stride. Coordinates
//! are `(x, y)` = (column, row) throughout, and flat indices are logical
//! (row-major over the view's own extent, ignoring row padding).

use std::ops::{Index, IndexMut};

use crate::error::{Error, Result};
use crate::geometry::Rect;

/// Distance between the starts of consecutive rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pitch {
    /// Row distance in elements.
    Elements(usize),
    /// Row distance in bytes, must be a multiple of the element size.
    Bytes(usize),
}

impl Pitch {
    /// Normalize to a stride in elements of `T`.
    pub fn to_elements<T>(self) -> Result<usize> {
        match self {
            Pitch::Elements(n) => Ok(n),
            Pitch::Bytes(n) => {
                let element_size = size_of::<T>().max(1);
                if n % element_size != 0 {
                    return Err(Error::UnalignedPitch {
                        pitch: n,
                        element_size,
                    });
                }
                Ok(n / element_size)
            }
        }
    }
}

/// Check that a slice of `len` elements covers the described view.
fn validate_shape(len: usize, width: usize, height: usize, stride: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }
    if stride < width {
        return Err(Error::StrideTooSmall { stride, width });
    }
    let required = (height - 1) * stride + width;
    if len < required {
        return Err(Error::BufferSizeMismatch {
            len,
            expected: required,
        });
    }
    Ok(())
}

fn check_subview(rect: Rect, width: usize, height: usize) -> Result<()> {
    if rect.is_empty() {
        return Err(Error::EmptyImage {
            width: rect.width,
            height: rect.height,
        });
    }
    if rect.right() > width || rect.bottom() > height {
        return Err(Error::SubviewOutOfBounds {
            rect,
            width,
            height,
        });
    }
    Ok(())
}

/// Read accessors shared by [`ArrayView`] and [`ArrayViewMut`].
macro_rules! view_accessors {
    () => {
        #[inline]
        pub fn width(&self) -> usize {
            self.width
        }

        #[inline]
        pub fn height(&self) -> usize {
            self.height
        }

        /// Row distance in elements.
        #[inline]
        pub fn stride(&self) -> usize {
            self.stride
        }

        /// Row distance in bytes.
        #[inline]
        pub fn pitch_bytes(&self) -> usize {
            self.stride * size_of::<T>()
        }

        /// Number of logical elements (`width * height`).
        #[inline]
        pub fn len(&self) -> usize {
            self.width * self.height
        }

        /// Views are never empty; construction rejects zero-sized shapes.
        #[inline]
        pub fn is_empty(&self) -> bool {
            false
        }

        /// Extent of this view in the coordinates of the root buffer.
        #[inline]
        pub fn bounds(&self) -> Rect {
            Rect::new(self.origin.0, self.origin.1, self.width, self.height)
        }

        #[inline]
        pub fn is_subview(&self) -> bool {
            self.is_subview
        }

        /// Check whether a signed coordinate lies inside the view.
        #[inline]
        pub fn contains(&self, x: i64, y: i64) -> bool {
            x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
        }

        #[inline]
        fn offset(&self, x: usize, y: usize) -> usize {
            y * self.stride + x
        }

        #[inline]
        fn check_coord(&self, x: usize, y: usize) -> Result<()> {
            if x < self.width && y < self.height {
                Ok(())
            } else {
                Err(Error::OutOfBounds {
                    x: x as i64,
                    y: y as i64,
                    width: self.width,
                    height: self.height,
                })
            }
        }

        #[inline]
        fn check_index(&self, index: usize) -> Result<(usize, usize)> {
            if index < self.len() {
                Ok((index % self.width, index / self.width))
            } else {
                Err(Error::IndexOutOfBounds {
                    index,
                    len: self.len(),
                })
            }
        }

        /// Element at column `x`, row `y`.
        #[inline]
        pub fn get(&self, x: usize, y: usize) -> Result<&T> {
            self.check_coord(x, y)?;
            Ok(&self.data[self.offset(x, y)])
        }

        /// Element at a logical row-major index.
        #[inline]
        pub fn at(&self, index: usize) -> Result<&T> {
            let (x, y) = self.check_index(index)?;
            Ok(&self.data[self.offset(x, y)])
        }

        /// The `width` elements of row `y`.
        #[inline]
        pub fn row(&self, y: usize) -> Result<&[T]> {
            self.check_coord(0, y)?;
            let start = self.offset(0, y);
            Ok(&self.data[start..start + self.width])
        }

        /// Row-major iterator over the logical elements.
        pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
            (0..self.height).flat_map(move |y| {
                let start = y * self.stride;
                self.data[start..start + self.width].iter()
            })
        }

        /// Compact row-major copy of the logical elements.
        pub fn to_vec(&self) -> Vec<T>
        where
            T: Copy,
        {
            self.iter().copied().collect()
        }
    };
}

/// Shared view over a strided buffer.
#[derive(Debug)]
pub struct ArrayView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
    origin: (usize, usize),
    is_subview: bool,
}

impl<'a, T> ArrayView<'a, T> {
    /// View over tightly packed rows.
    pub fn new(data: &'a [T], width: usize, height: usize) -> Result<Self> {
        Self::with_stride(data, width, height, width)
    }

    pub fn with_stride(data: &'a [T], width: usize, height: usize, stride: usize) -> Result<Self> {
        validate_shape(data.len(), width, height, stride)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            origin: (0, 0),
            is_subview: false,
        })
    }

    pub fn with_pitch(data: &'a [T], width: usize, height: usize, pitch: Pitch) -> Result<Self> {
        Self::with_stride(data, width, height, pitch.to_elements::<T>()?)
    }

    view_accessors!();

    /// Region of this view sharing the same buffer.
    pub fn subview(&self, rect: Rect) -> Result<ArrayView<'a, T>> {
        check_subview(rect, self.width, self.height)?;
        let start = self.offset(rect.x, rect.y);
        let data: &'a [T] = self.data;
        Ok(ArrayView {
            data: &data[start..],
            width: rect.width,
            height: rect.height,
            stride: self.stride,
            origin: (self.origin.0 + rect.x, self.origin.1 + rect.y),
            is_subview: true,
        })
    }
}

impl<T> Clone for ArrayView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArrayView<'_, T> {}

impl<T> Index<(usize, usize)> for ArrayView<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        assert!(
            x < self.width && y < self.height,
            "index ({x}, {y}) out of bounds for {}x{} view",
            self.width,
            self.height
        );
        &self.data[y * self.stride + x]
    }
}

impl<T> Index<usize> for ArrayView<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        assert!(index < self.len(), "index {index} out of bounds");
        &self.data[self.offset(index % self.width, index / self.width)]
    }
}

impl<T: PartialEq> PartialEq for ArrayView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.iter().eq(other.iter())
    }
}

/// Exclusive view over a strided buffer.
#[derive(Debug)]
pub struct ArrayViewMut<'a, T> {
    data: &'a mut [T],
    width: usize,
    height: usize,
    stride: usize,
    origin: (usize, usize),
    is_subview: bool,
}

impl<'a, T> ArrayViewMut<'a, T> {
    /// View over tightly packed rows.
    pub fn new(data: &'a mut [T], width: usize, height: usize) -> Result<Self> {
        Self::with_stride(data, width, height, width)
    }

    pub fn with_stride(
        data: &'a mut [T],
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<Self> {
        validate_shape(data.len(), width, height, stride)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            origin: (0, 0),
            is_subview: false,
        })
    }

    pub fn with_pitch(
        data: &'a mut [T],
        width: usize,
        height: usize,
        pitch: Pitch,
    ) -> Result<Self> {
        Self::with_stride(data, width, height, pitch.to_elements::<T>()?)
    }

    view_accessors!();

    /// Reborrow as a shared view.
    pub fn as_view(&self) -> ArrayView<'_, T> {
        ArrayView {
            data: &*self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
            origin: self.origin,
            is_subview: self.is_subview,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> Result<&mut T> {
        self.check_coord(x, y)?;
        let offset = self.offset(x, y);
        Ok(&mut self.data[offset])
    }

    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let (x, y) = self.check_index(index)?;
        let offset = self.offset(x, y);
        Ok(&mut self.data[offset])
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> Result<&mut [T]> {
        self.check_coord(0, y)?;
        let start = self.offset(0, y);
        Ok(&mut self.data[start..start + self.width])
    }

    /// Row-major mutable iterator over the logical elements.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        let width = self.width;
        self.data
            .chunks_mut(self.stride)
            .take(self.height)
            .flat_map(move |row| row[..width].iter_mut())
    }

    pub fn fill(&mut self, value: T)
    where
        T: Copy,
    {
        self.iter_mut().for_each(|e| *e = value);
    }

    /// Region of this view sharing the same buffer.
    pub fn subview(&self, rect: Rect) -> Result<ArrayView<'_, T>> {
        self.as_view().subview(rect)
    }

    /// Mutable region of this view sharing the same buffer.
    pub fn subview_mut(&mut self, rect: Rect) -> Result<ArrayViewMut<'_, T>> {
        check_subview(rect, self.width, self.height)?;
        let start = self.offset(rect.x, rect.y);
        Ok(ArrayViewMut {
            data: &mut self.data[start..],
            width: rect.width,
            height: rect.height,
            stride: self.stride,
            origin: (self.origin.0 + rect.x, self.origin.1 + rect.y),
            is_subview: true,
        })
    }
}

impl<T> Index<(usize, usize)> for ArrayViewMut<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        assert!(
            x < self.width && y < self.height,
            "index ({x}, {y}) out of bounds for {}x{} view",
            self.width,
            self.height
        );
        &self.data[y * self.stride + x]
    }
}

impl<T> IndexMut<(usize, usize)> for ArrayViewMut<'_, T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        assert!(
            x < self.width && y < self.height,
            "index ({x}, {y}) out of bounds for {}x{} view",
            self.width,
            self.height
        );
        &mut self.data[y * self.stride + x]
    }
}

impl<T> Index<usize> for ArrayViewMut<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        assert!(index < self.len(), "index {index} out of bounds");
        &self.data[self.offset(index % self.width, index / self.width)]
    }
}

impl<T> IndexMut<usize> for ArrayViewMut<'_, T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        assert!(index < self.len(), "index {index} out of bounds");
        let offset = self.offset(index % self.width, index / self.width);
        &mut self.data[offset]
    }
}
