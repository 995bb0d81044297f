// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::sync::Arc;

use crate::buffer::{Buffer, SharedBuffer};
use crate::defaults::defaults;
use crate::dimension::{self, stride_offset};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::index_mode::IndexMode;
use crate::order::Order;
use crate::scalar::Scalar;

/// Read access to the descriptor of an ndarray-like value.
///
/// This is the seam through which the metadata codec and the factories
/// consume arrays: anything exposing a dtype, shape, strides, offset and
/// order can be described, broadcast against or used as a template.
pub trait NdarrayLike {
    fn dtype(&self) -> DType;
    fn shape(&self) -> &[usize];
    /// Strides in elements; `[0]` for zero-dimensional arrays.
    fn strides(&self) -> &[isize];
    /// Buffer index of the element at the all-zero subscript.
    fn offset(&self) -> usize;
    fn order(&self) -> Order;

    /// Index mode, if the value carries one.
    fn mode(&self) -> Option<IndexMode> {
        None
    }

    /// Per-axis index modes, if the value carries them.
    fn submode(&self) -> Option<&[IndexMode]> {
        None
    }

    fn is_read_only(&self) -> bool {
        false
    }

    /// A value that knows how to serialize its own metadata record
    /// returns it here; the codec then uses it unchanged.
    fn meta_data_record(&self) -> Option<Vec<u8>> {
        None
    }

    fn ndim(&self) -> usize {
        self.shape().len()
    }
}

/// Return whether `x` is flagged read-only.
pub fn is_read_only<V: NdarrayLike + ?Sized>(x: &V) -> bool {
    x.is_read_only()
}

/// Optional settings for [`StridedView::new`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Defaults to `defaults().index_mode`.
    pub mode: Option<IndexMode>,
    /// Defaults to `[mode]`.
    pub submode: Option<Vec<IndexMode>>,
    pub readonly: bool,
}

impl ViewOptions {
    pub fn readonly(readonly: bool) -> Self {
        ViewOptions {
            readonly,
            ..Default::default()
        }
    }
}

/// A strided view of a shared buffer.
///
/// Shape, strides, offset and order are fixed at construction; only the
/// buffer contents may change. Cloning a view, and every view derived
/// from it, shares the buffer instead of copying it.
#[derive(Clone)]
pub struct StridedView {
    dtype: DType,
    data: SharedBuffer,
    shape: Vec<usize>,
    strides: Vec<isize>,
    offset: usize,
    order: Order,
    mode: IndexMode,
    submode: Vec<IndexMode>,
    readonly: bool,
}

impl StridedView {
    /// Create a view of `data`.
    ///
    /// The layout is taken as given; callers are responsible for passing
    /// strides and an offset that stay within the buffer (see
    /// [`is_buffer_length_compatible`](crate::is_buffer_length_compatible)).
    pub fn new(
        dtype: DType, data: SharedBuffer, shape: Vec<usize>, strides: Vec<isize>, offset: usize,
        order: Order, options: ViewOptions,
    ) -> StridedView {
        debug_assert!(
            strides.len() == shape.len() || (shape.is_empty() && strides.len() == 1),
            "strides {:?} do not match shape {:?}",
            strides,
            shape
        );
        let mode = options.mode.unwrap_or(defaults().index_mode);
        let submode = match options.submode {
            Some(sm) if !sm.is_empty() => sm,
            _ => vec![mode],
        };
        StridedView {
            dtype,
            data,
            shape,
            strides,
            offset,
            order,
            mode,
            submode,
            readonly: options.readonly,
        }
    }

    /// Create a view over an owned buffer with the canonical layout for
    /// `shape` and `order`.
    pub fn from_buffer(buffer: Buffer, shape: Vec<usize>, order: Order) -> StridedView {
        let strides = if shape.is_empty() {
            vec![0]
        } else {
            dimension::shape_to_strides(&shape, order)
        };
        let offset = dimension::strides_to_offset(&shape, &strides);
        StridedView::new(
            buffer.dtype(),
            buffer.into_shared(),
            shape,
            strides,
            offset,
            order,
            ViewOptions::default(),
        )
    }

    /// The shared buffer.
    pub fn data(&self) -> &SharedBuffer {
        &self.data
    }

    /// Return whether two views alias the same buffer.
    pub fn shares_buffer(&self, other: &StridedView) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        dimension::numel(&self.shape)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return true if an axis of length greater than one has stride zero,
    /// i.e. several logical elements alias one buffer slot.
    pub fn is_broadcast(&self) -> bool {
        self.shape.iter().zip(&self.strides).any(|(&d, &s)| d > 1 && s == 0)
    }

    pub fn is_contiguous(&self) -> bool {
        dimension::is_contiguous(&self.shape, &self.strides)
    }

    pub fn index_mode(&self) -> IndexMode {
        self.mode
    }

    pub fn index_submode(&self) -> &[IndexMode] {
        &self.submode
    }

    /// Read the element at `subscripts`, resolving each subscript with
    /// the submode of its axis.
    pub fn get(&self, subscripts: &[isize]) -> Result<Scalar> {
        let idx = dimension::sub2ind(&self.shape, &self.strides, self.offset, subscripts, &self.submode)?;
        self.read(idx)
    }

    /// Read the element at logical linear index `index`, counted in the
    /// view's order and resolved with its index mode.
    pub fn iget(&self, index: isize) -> Result<Scalar> {
        let subs = dimension::ind2sub(&self.shape, self.order, index, self.mode)?;
        let mut idx = self.offset as isize;
        for (&i, &s) in subs.iter().zip(&self.strides) {
            idx += stride_offset(i, s);
        }
        if idx < 0 {
            return Err(Error::IndexOutOfBounds { index: idx, max: 0 });
        }
        self.read(idx as usize)
    }

    fn read(&self, idx: usize) -> Result<Scalar> {
        let data = self.data.read();
        data.get(idx).ok_or(Error::IndexOutOfBounds {
            index: idx as isize,
            max: data.len().wrapping_sub(1),
        })
    }

    /// Derive a view with a new layout over the same buffer and offset.
    pub(crate) fn with_layout(&self, shape: Vec<usize>, strides: Vec<isize>, readonly: bool) -> StridedView {
        StridedView {
            dtype: self.dtype,
            data: self.data.clone(),
            shape,
            strides,
            offset: self.offset,
            order: self.order,
            mode: self.mode,
            submode: self.submode.clone(),
            readonly,
        }
    }
}

impl NdarrayLike for StridedView {
    fn dtype(&self) -> DType {
        self.dtype
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn strides(&self) -> &[isize] {
        &self.strides
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn order(&self) -> Order {
        self.order
    }

    fn mode(&self) -> Option<IndexMode> {
        Some(self.mode)
    }

    fn submode(&self) -> Option<&[IndexMode]> {
        Some(&self.submode)
    }

    fn is_read_only(&self) -> bool {
        self.readonly
    }
}

impl fmt::Debug for StridedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StridedView")
            .field("dtype", &self.dtype)
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .field("order", &self.order)
            .field("mode", &self.mode)
            .field("submode", &self.submode)
            .field("readonly", &self.readonly)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_3x2() -> StridedView {
        let data = Buffer::from(vec![1., 2., 3., 4., 5., 6.]).into_shared();
        StridedView::new(
            DType::Float64,
            data,
            vec![3, 2],
            vec![-2, 1],
            4,
            Order::RowMajor,
            ViewOptions {
                mode: Some(IndexMode::Wrap),
                ..Default::default()
            },
        )
    }

    #[test]
    fn defaults_applied() {
        let v = StridedView::from_buffer(Buffer::from(vec![0i32; 6]), vec![2, 3], Order::ColumnMajor);
        assert_eq!(v.strides(), &[1, 2]);
        assert_eq!(v.index_mode(), IndexMode::Throw);
        assert_eq!(v.index_submode(), &[IndexMode::Throw]);
        assert!(!v.is_read_only());
        assert_eq!(v.len(), 6);
    }

    #[test]
    fn element_access() {
        let v = view_3x2();
        assert_eq!(v.index_submode(), &[IndexMode::Wrap]);
        assert_eq!(v.get(&[0, 0]).unwrap(), Scalar::Float64(5.));
        assert_eq!(v.get(&[-1, 1]).unwrap(), Scalar::Float64(2.));
        assert_eq!(v.iget(1).unwrap(), Scalar::Float64(6.));
        assert_eq!(v.iget(-1).unwrap(), Scalar::Float64(2.));
    }

    #[test]
    fn zero_dimensional_get() {
        let v = StridedView::from_buffer(Buffer::from(vec![7u8]), vec![], Order::RowMajor);
        assert_eq!(v.strides(), &[0]);
        assert_eq!(v.get(&[]).unwrap(), Scalar::Uint8(7));
        assert_eq!(v.iget(0).unwrap(), Scalar::Uint8(7));
    }

    #[test]
    fn clones_share_buffer() {
        let v = view_3x2();
        let w = v.clone();
        assert!(v.shares_buffer(&w));
        w.data().write().set(4, &Scalar::from(50.)).unwrap();
        assert_eq!(v.get(&[0, 0]).unwrap(), Scalar::Float64(50.));
    }
}
