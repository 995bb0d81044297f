// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Zero-copy view transformations.
use crate::error::{Error, Result};
use crate::view::{NdarrayLike, StridedView};

/// Return new strides when trying to grow `from` into shape `to`.
///
/// Broadcasting works by returning a "fake stride" where elements
/// to repeat are in axes with 0 stride, so that several indexes point
/// to the same element.
fn upcast(to: &[usize], from: &[usize], stride: &[isize]) -> Result<Vec<isize>> {
    if to.len() < from.len() {
        return Err(Error::Dimension {
            source_ndims: from.len(),
            target_ndims: to.len(),
        });
    }
    // remaining (prepended) axes keep stride 0
    let mut new_stride = vec![0; to.len()];
    let k = to.len() - from.len();
    // begin at the back (the least significant dimension)
    // size of the axis has to either agree or `from` has to be 1
    for i in (0..from.len()).rev() {
        let (d, dim) = (from[i], to[k + i]);
        if d == dim {
            new_stride[k + i] = stride[i];
        } else if d == 1 {
            // dead dimension, zero stride
            new_stride[k + i] = 0;
        } else {
            return Err(Error::BroadcastIncompatible {
                shape: from.to_vec(),
                target: to.to_vec(),
                dim: k + i,
            });
        }
    }
    Ok(new_stride)
}

/// Broadcast `view` to `shape` without copying.
///
/// The view's axes are matched against the trailing axes of `shape`;
/// leading axes of `shape` are added with stride 0. An axis of length 1
/// repeats (stride 0); any other axis must match exactly, tiling is not
/// supported.
///
/// The result shares the buffer and offset of `view`. Since repeated
/// elements alias one buffer slot, the result is always read-only.
///
/// **Errors** with `Dimension` if `shape` has fewer axes than `view`, and
/// with `BroadcastIncompatible` naming the first offending axis of `shape`.
///
/// ```
/// use ndarray_base::{broadcast_array, Buffer, NdarrayLike, Order, StridedView};
///
/// let x = StridedView::from_buffer(Buffer::from(vec![1., 2.]), vec![2], Order::RowMajor);
/// let y = broadcast_array(&x, &[3, 2]).unwrap();
/// assert_eq!(y.shape(), &[3, 2]);
/// assert_eq!(y.strides(), &[0, 1]);
/// assert!(y.is_read_only());
/// ```
pub fn broadcast_array(view: &StridedView, shape: &[usize]) -> Result<StridedView> {
    let strides = if shape.is_empty() && view.ndim() == 0 {
        vec![0]
    } else {
        upcast(shape, view.shape(), view.strides())?
    };
    log::trace!(
        "broadcast {:?} (strides {:?}) to {:?} (strides {:?})",
        view.shape(),
        view.strides(),
        shape,
        strides
    );
    Ok(view.with_layout(shape.to_vec(), strides, true))
}

/// Prepend `n` axes of length 1 to `view`.
///
/// The new axes get the stride of the current leading axis; existing axes
/// are untouched. The result is read-only exactly when `view` is.
///
/// ```
/// use ndarray_base::{prepend_singleton_dimensions, Buffer, NdarrayLike, Order, StridedView};
///
/// let x = StridedView::from_buffer(Buffer::from(vec![0f32; 6]), vec![3, 2], Order::RowMajor);
/// let y = prepend_singleton_dimensions(&x, 2);
/// assert_eq!(y.shape(), &[1, 1, 3, 2]);
/// assert_eq!(y.strides(), &[2, 2, 2, 1]);
/// ```
pub fn prepend_singleton_dimensions(view: &StridedView, n: usize) -> StridedView {
    let sh = view.shape();
    let st = view.strides();
    let lead = st.first().copied().unwrap_or(0);

    let mut shape = Vec::with_capacity(n + sh.len());
    let mut strides = Vec::with_capacity(n + sh.len());
    shape.resize(n, 1);
    strides.resize(n, lead);
    shape.extend_from_slice(sh);
    strides.extend_from_slice(&st[..sh.len()]);
    if shape.is_empty() {
        strides.push(0);
    }
    log::trace!("prepend {} singleton dimensions to {:?}", n, sh);
    view.with_layout(shape, strides, view.is_read_only())
}
