// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Layout arithmetic over shapes and strides.
//!
//! Shapes are `&[usize]`, strides `&[isize]` in element units. A
//! zero-dimensional layout has shape `[]` and strides `[0]`.
use crate::error::{Error, Result};
use crate::index_mode::IndexMode;
use crate::order::Order;

pub use self::broadcast::broadcast_shapes;

mod broadcast;

/// Return the number of elements described by `shape`.
///
/// The empty shape has one element; any zero-length axis gives zero.
#[inline]
pub fn numel(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Return the number of elements described by `shape`, or `None` if the
/// product of the nonzero lengths does not fit in `isize`.
///
/// The nonzero lengths are checked so that the canonical strides of the
/// shape are representable too, even when an axis is empty.
///
/// ```
/// use ndarray_base::size_of_shape_checked;
///
/// assert_eq!(size_of_shape_checked(&[2, 0, 3]), Some(0));
/// assert_eq!(size_of_shape_checked(&[0, usize::MAX, 2]), None);
/// ```
pub fn size_of_shape_checked(shape: &[usize]) -> Option<usize> {
    let size_nonzero = shape
        .iter()
        .filter(|&&d| d != 0)
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))?;
    if size_nonzero > isize::MAX as usize {
        None
    } else {
        Some(numel(shape))
    }
}

/// Calculate offset from `Ix` stride converting sign properly
#[inline(always)]
pub(crate) fn stride_offset(n: usize, stride: isize) -> isize {
    (n as isize) * stride
}

/// Compute the canonical strides of a contiguous layout.
///
/// Shape (a, b, c) => strides (b * c, c, 1) in row major order and
/// (1, a, a * b) in column major order. A zero-length axis counts as
/// length one, so the strides stay well defined.
///
/// ```
/// use ndarray_base::{shape_to_strides, Order};
///
/// assert_eq!(shape_to_strides(&[3, 2], Order::RowMajor), vec![2, 1]);
/// assert_eq!(shape_to_strides(&[3, 2], Order::ColumnMajor), vec![1, 3]);
/// ```
pub fn shape_to_strides(shape: &[usize], order: Order) -> Vec<isize> {
    let mut strides = vec![0; shape.len()];
    let mut cum_prod = 1isize;
    match order {
        Order::RowMajor => {
            for (rs, &dim) in strides.iter_mut().zip(shape).rev() {
                *rs = cum_prod;
                cum_prod *= dim.max(1) as isize;
            }
        }
        Order::ColumnMajor => {
            for (rs, &dim) in strides.iter_mut().zip(shape) {
                *rs = cum_prod;
                cum_prod *= dim.max(1) as isize;
            }
        }
    }
    strides
}

/// Compute the buffer offset of the element at the all-zero subscript.
///
/// For an axis with a negative stride the first logical element sits at
/// the end of the axis in memory, so the offset is the sum of
/// `(dim - 1) * |stride|` over negative-stride axes. Empty axes
/// contribute nothing.
///
/// ```
/// use ndarray_base::strides_to_offset;
///
/// assert_eq!(strides_to_offset(&[3, 2], &[-2, 1]), 4);
/// assert_eq!(strides_to_offset(&[3, 2], &[-2, -1]), 5);
/// ```
pub fn strides_to_offset(shape: &[usize], strides: &[isize]) -> usize {
    let mut offset = 0;
    for (&dim, &s) in shape.iter().zip(strides) {
        if s < 0 && dim > 0 {
            offset += (dim - 1) * s.unsigned_abs();
        }
    }
    offset
}

/// Return the iteration order implied by the strides: `1` if all strides
/// are non-negative, `-1` if all are non-positive, `0` if mixed.
pub fn iteration_order(strides: &[isize]) -> i8 {
    let pos = strides.iter().any(|&s| s > 0);
    let neg = strides.iter().any(|&s| s < 0);
    match (pos, neg) {
        (true, true) => 0,
        (false, true) => -1,
        _ => 1,
    }
}

/// Return the smallest buffer index addressed by the layout.
pub fn min_view_buffer_index(shape: &[usize], strides: &[isize], offset: usize) -> isize {
    let mut idx = offset as isize;
    for (&dim, &s) in shape.iter().zip(strides) {
        if s < 0 && dim > 0 {
            idx += stride_offset(dim - 1, s);
        }
    }
    idx
}

/// Return the largest buffer index addressed by the layout.
pub fn max_view_buffer_index(shape: &[usize], strides: &[isize], offset: usize) -> isize {
    let mut idx = offset as isize;
    for (&dim, &s) in shape.iter().zip(strides) {
        if s > 0 && dim > 0 {
            idx += stride_offset(dim - 1, s);
        }
    }
    idx
}

/// Return whether a buffer of `len` elements can hold every element the
/// layout addresses.
pub fn is_buffer_length_compatible(len: usize, shape: &[usize], strides: &[isize], offset: usize) -> bool {
    if numel(shape) == 0 {
        return true;
    }
    min_view_buffer_index(shape, strides, offset) >= 0
        && (max_view_buffer_index(shape, strides, offset) as usize) < len
}

/// Return whether a buffer of `len` elements has room for the elements
/// of a contiguous array of `shape`.
pub fn is_buffer_length_compatible_shape(len: usize, shape: &[usize]) -> bool {
    size_of_shape_checked(shape).map_or(false, |n| n <= len)
}

/// Return whether the layout addresses exactly one span of adjacent
/// buffer elements, with no gaps and no element addressed twice.
///
/// A layout without elements spans nothing and is not single segment.
///
/// ```
/// use ndarray_base::is_single_segment_compatible;
///
/// assert!(is_single_segment_compatible(&[3, 2], &[-2, 1], 4));
/// assert!(!is_single_segment_compatible(&[3, 2], &[4, 1], 0));
/// assert!(!is_single_segment_compatible(&[3, 2], &[0, 1], 0));
/// ```
pub fn is_single_segment_compatible(shape: &[usize], strides: &[isize], offset: usize) -> bool {
    let span = max_view_buffer_index(shape, strides, offset) - min_view_buffer_index(shape, strides, offset) + 1;
    numel(shape) as isize == span
}

fn is_contiguous_in(shape: &[usize], strides: &[isize], order: Order) -> bool {
    if numel(shape) == 0 || shape.is_empty() {
        return true;
    }
    if iteration_order(strides) == 0 {
        return false;
    }
    let canonical = shape_to_strides(shape, order);
    // an axis of length 1 can have any stride
    shape
        .iter()
        .zip(strides.iter().zip(&canonical))
        .all(|(&dim, (&s, &c))| dim == 1 || s.abs() == c)
}

/// Return whether the layout is a single contiguous row major segment
/// (possibly traversed backwards).
pub fn is_row_major_contiguous(shape: &[usize], strides: &[isize]) -> bool {
    is_contiguous_in(shape, strides, Order::RowMajor)
}

/// Return whether the layout is a single contiguous column major segment.
pub fn is_column_major_contiguous(shape: &[usize], strides: &[isize]) -> bool {
    is_contiguous_in(shape, strides, Order::ColumnMajor)
}

/// Return whether the layout is contiguous in either order.
pub fn is_contiguous(shape: &[usize], strides: &[isize]) -> bool {
    is_row_major_contiguous(shape, strides) || is_column_major_contiguous(shape, strides)
}

/// Convert subscripts to a linear buffer index.
///
/// Each subscript is resolved with the index mode of its axis; `modes` is
/// recycled when shorter than the number of axes and defaults to
/// `throw` when empty.
///
/// ```
/// use ndarray_base::{sub2ind, IndexMode};
///
/// let idx = sub2ind(&[3, 2], &[-2, 1], 4, &[-1, 1], &[IndexMode::Wrap]).unwrap();
/// assert_eq!(idx, 1);
/// ```
pub fn sub2ind(
    shape: &[usize], strides: &[isize], offset: usize, subscripts: &[isize], modes: &[IndexMode],
) -> Result<usize> {
    if subscripts.len() != shape.len() {
        return Err(Error::IncompatibleShape {
            shape: shape.to_vec(),
            dim: subscripts.len().min(shape.len()),
        });
    }
    let mut idx = offset as isize;
    for (i, ((&dim, &s), &sub)) in shape.iter().zip(strides).zip(subscripts).enumerate() {
        if dim == 0 {
            return Err(Error::IndexOutOfBounds { index: sub, max: 0 });
        }
        let mode = if modes.is_empty() { IndexMode::Throw } else { modes[i % modes.len()] };
        let j = mode.resolve(sub, dim - 1)?;
        idx += stride_offset(j, s);
    }
    if idx < 0 {
        return Err(Error::IndexOutOfBounds { index: idx, max: 0 });
    }
    Ok(idx as usize)
}

/// Convert a logical linear index (counting elements in `order`) to
/// subscripts. The index is resolved with `mode` against the number of
/// elements.
///
/// ```
/// use ndarray_base::{ind2sub, IndexMode, Order};
///
/// assert_eq!(ind2sub(&[3, 2], Order::RowMajor, 3, IndexMode::Throw).unwrap(), vec![1, 1]);
/// assert_eq!(ind2sub(&[3, 2], Order::ColumnMajor, 3, IndexMode::Throw).unwrap(), vec![0, 1]);
/// ```
pub fn ind2sub(shape: &[usize], order: Order, index: isize, mode: IndexMode) -> Result<Vec<usize>> {
    let len = numel(shape);
    if len == 0 {
        return Err(Error::IndexOutOfBounds { index, max: 0 });
    }
    let mut rem = mode.resolve(index, len - 1)?;
    let mut out = vec![0; shape.len()];
    match order {
        Order::RowMajor => {
            for (o, &dim) in out.iter_mut().zip(shape).rev() {
                *o = rem % dim;
                rem /= dim;
            }
        }
        Order::ColumnMajor => {
            for (o, &dim) in out.iter_mut().zip(shape) {
                *o = rem % dim;
                rem /= dim;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use quickcheck::quickcheck;

    #[test]
    fn strides_of_empty_axes() {
        assert_eq!(shape_to_strides(&[2, 0, 3], Order::RowMajor), vec![3, 3, 1]);
        assert_eq!(shape_to_strides(&[2, 0, 3], Order::ColumnMajor), vec![1, 2, 2]);
        assert_eq!(shape_to_strides(&[], Order::RowMajor), Vec::<isize>::new());
        assert_eq!(strides_to_offset(&[0, 4], &[-4, -1]), 3);
    }

    #[test]
    fn numel_boundaries() {
        assert_eq!(numel(&[]), 1);
        assert_eq!(numel(&[2, 0]), 0);
        assert_eq!(numel(&[2, 3, 4]), 24);
    }

    #[test]
    fn checked_size_overflow() {
        assert_eq!(size_of_shape_checked(&[]), Some(1));
        assert_eq!(size_of_shape_checked(&[2, 3, 4]), Some(24));
        assert_eq!(size_of_shape_checked(&[1 << 20, 0]), Some(0));
        assert_eq!(size_of_shape_checked(&[usize::MAX / 2, 3]), None);
        assert_eq!(size_of_shape_checked(&[isize::MAX as usize + 1]), None);
        assert_eq!(size_of_shape_checked(&[isize::MAX as usize]), Some(isize::MAX as usize));
    }

    #[test]
    fn buffer_fit() {
        assert!(is_buffer_length_compatible_shape(6, &[3, 2]));
        assert!(is_buffer_length_compatible_shape(10, &[3, 2]));
        assert!(!is_buffer_length_compatible_shape(5, &[3, 2]));
        assert!(is_buffer_length_compatible_shape(0, &[3, 0]));
        assert!(is_buffer_length_compatible_shape(1, &[]));
        assert!(!is_buffer_length_compatible_shape(usize::MAX, &[usize::MAX / 2, 3]));
    }

    #[test]
    fn single_segment() {
        assert!(is_single_segment_compatible(&[3, 2], &[2, 1], 0));
        assert!(is_single_segment_compatible(&[3, 2], &[1, 3], 5));
        assert!(is_single_segment_compatible(&[], &[0], 3));
        assert!(!is_single_segment_compatible(&[3, 2], &[2, 2], 0));
        assert!(!is_single_segment_compatible(&[2, 0], &[1, 1], 0));
    }

    #[test]
    fn contiguity() {
        assert!(is_row_major_contiguous(&[3, 2], &[2, 1]));
        assert!(is_row_major_contiguous(&[3, 2], &[-2, -1]));
        assert!(!is_row_major_contiguous(&[3, 2], &[-2, 1]));
        assert!(is_column_major_contiguous(&[3, 2], &[1, 3]));
        assert!(!is_contiguous(&[3, 2], &[4, 1]));
        assert!(is_contiguous(&[1, 3], &[7, 1]));
    }

    #[test]
    fn sub2ind_modes() {
        let (sh, st) = ([3, 2], [2, 1]);
        assert_eq!(sub2ind(&sh, &st, 0, &[2, 1], &[]).unwrap(), 5);
        assert_eq!(sub2ind(&sh, &st, 0, &[5, -1], &[IndexMode::Clamp, IndexMode::Wrap]).unwrap(), 5);
        let err = sub2ind(&sh, &st, 0, &[3, 0], &[IndexMode::Throw]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfBounds);
        let err = sub2ind(&sh, &st, 0, &[0], &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompatibleShape);
    }

    #[test]
    fn ind2sub_wraps() {
        assert_eq!(ind2sub(&[2, 2, 2], Order::RowMajor, -1, IndexMode::Wrap).unwrap(), vec![1, 1, 1]);
        assert_eq!(ind2sub(&[2, 3], Order::ColumnMajor, 7, IndexMode::Clamp).unwrap(), vec![1, 2]);
        assert_eq!(ind2sub(&[], Order::RowMajor, 0, IndexMode::Throw).unwrap(), Vec::<usize>::new());
        assert!(ind2sub(&[2, 0], Order::RowMajor, 0, IndexMode::Wrap).is_err());
    }

    quickcheck! {
        // Flipping the sign of any stride and anchoring with the computed
        // offset keeps every index inside a buffer of exactly numel elements.
        fn offset_keeps_layout_in_bounds(dims: Vec<u8>, flips: Vec<bool>, column_major: bool) -> bool {
            let shape: Vec<usize> = dims.iter().take(5).map(|&d| (d % 5) as usize).collect();
            let order = if column_major { Order::ColumnMajor } else { Order::RowMajor };
            let mut strides = shape_to_strides(&shape, order);
            for (s, &f) in strides.iter_mut().zip(flips.iter().chain(std::iter::repeat(&false))) {
                if f {
                    *s = -*s;
                }
            }
            let offset = strides_to_offset(&shape, &strides);
            is_buffer_length_compatible(numel(&shape), &shape, &strides, offset)
        }

        fn ind2sub_inverts_row_major_linear_index(dims: Vec<u8>, index: usize) -> bool {
            let shape: Vec<usize> = dims.iter().take(4).map(|&d| (d % 4) as usize + 1).collect();
            let len = numel(&shape);
            let index = index % len;
            let strides = shape_to_strides(&shape, Order::RowMajor);
            let subs = ind2sub(&shape, Order::RowMajor, index as isize, IndexMode::Throw).unwrap();
            let subs: Vec<isize> = subs.iter().map(|&s| s as isize).collect();
            sub2ind(&shape, &strides, 0, &subs, &[]).unwrap() == index
        }
    }
}
