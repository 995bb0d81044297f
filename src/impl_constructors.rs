// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Factories for new arrays: zero-filled, shaped like another array, or
//! holding a single value.
//!
//! Every factory has an `_in` variant taking the [`Allocator`] to get the
//! buffer from; the plain variants use [`HostAllocator`].
use crate::buffer::{Allocator, HostAllocator};
use crate::defaults::defaults;
use crate::dimension::{shape_to_strides, size_of_shape_checked, strides_to_offset};
use crate::dtype::DType;
use crate::error::{invalid_option, Error, Result};
use crate::index_mode::IndexMode;
use crate::order::Order;
use crate::scalar::Scalar;
use crate::view::{NdarrayLike, StridedView, ViewOptions};

/// A `shape` option: a single length, or one length per axis.
///
/// Lengths are signed so that negative values can be reported as invalid
/// options instead of wrapping.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ShapeArg {
    Scalar(i64),
    Seq(Vec<i64>),
}

impl ShapeArg {
    fn to_shape(&self) -> Result<Vec<usize>> {
        let dims: &[i64] = match self {
            ShapeArg::Scalar(n) => std::slice::from_ref(n),
            ShapeArg::Seq(v) => v,
        };
        dims.iter()
            .map(|&d| usize::try_from(d))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| {
                invalid_option(
                    "shape",
                    self,
                    "must be a nonnegative integer or a sequence of nonnegative integers",
                )
            })
    }
}

impl From<i64> for ShapeArg {
    fn from(n: i64) -> Self {
        ShapeArg::Scalar(n)
    }
}

impl From<Vec<i64>> for ShapeArg {
    fn from(v: Vec<i64>) -> Self {
        ShapeArg::Seq(v)
    }
}

impl From<&[usize]> for ShapeArg {
    fn from(v: &[usize]) -> Self {
        ShapeArg::Seq(v.iter().map(|&d| d as i64).collect())
    }
}

/// Overrides for [`zeros_like`]; unset fields are taken from the
/// template array (`mode`, `submode` and `readonly` from the defaults).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZerosLikeOptions {
    pub dtype: Option<String>,
    pub shape: Option<ShapeArg>,
    pub order: Option<String>,
    pub mode: Option<String>,
    pub submode: Option<Vec<String>>,
    pub readonly: Option<bool>,
}

impl ZerosLikeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dtype<S: Into<String>>(mut self, dtype: S) -> Self {
        self.dtype = Some(dtype.into());
        self
    }

    pub fn shape<S: Into<ShapeArg>>(mut self, shape: S) -> Self {
        self.shape = Some(shape.into());
        self
    }

    pub fn order<S: Into<String>>(mut self, order: S) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn mode<S: Into<String>>(mut self, mode: S) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn submode<I, S>(mut self, submode: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.submode = Some(submode.into_iter().map(Into::into).collect());
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = Some(readonly);
        self
    }
}

/// Options for [`scalar_to_ndarray`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScalarOptions {
    /// Inferred from the value when unset.
    pub dtype: Option<String>,
    /// Defaults to `defaults().order`.
    pub order: Option<String>,
    pub readonly: Option<bool>,
}

impl ScalarOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dtype<S: Into<String>>(mut self, dtype: S) -> Self {
        self.dtype = Some(dtype.into());
        self
    }

    pub fn order<S: Into<String>>(mut self, order: S) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = Some(readonly);
        self
    }
}

fn parse_dtype(s: &str) -> Result<DType> {
    s.parse().map_err(|_| invalid_option("dtype", s, "must be a recognized data type"))
}

/// Canonical strides and buffer length for `shape`; a zero-dimensional
/// array gets strides `[0]` and one element.
///
/// **Errors** with `InvalidOption` if the element count overflows.
fn layout(shape: &[usize], order: Order) -> Result<(Vec<isize>, usize)> {
    if shape.is_empty() {
        return Ok((vec![0], 1));
    }
    let len = size_of_shape_checked(shape)
        .ok_or_else(|| invalid_option("shape", shape, "number of elements must not overflow `isize`"))?;
    Ok((shape_to_strides(shape, order), len))
}

fn unrecognized(dtype: DType) -> Error {
    Error::UnrecognizedDataType(dtype.as_str().to_string())
}

/// Create a zero-filled array.
///
/// **Errors** with `InvalidOption` if the number of elements of `shape`
/// overflows, and with `UnrecognizedDataType` if the allocator does not
/// support the dtype.
///
/// ```
/// use ndarray_base::{zeros, DType, NdarrayLike, Order, Scalar};
///
/// let a = zeros(DType::Int32, &[2, 3], Order::ColumnMajor).unwrap();
/// assert_eq!(a.strides(), &[1, 2]);
/// assert_eq!(a.get(&[1, 2]).unwrap(), Scalar::Int32(0));
/// ```
pub fn zeros(dtype: DType, shape: &[usize], order: Order) -> Result<StridedView> {
    zeros_in(dtype, shape, order, &HostAllocator)
}

/// Create a zero-filled array with a buffer from `alloc`.
pub fn zeros_in<A: Allocator + ?Sized>(dtype: DType, shape: &[usize], order: Order, alloc: &A) -> Result<StridedView> {
    let (strides, len) = layout(shape, order)?;
    let buf = alloc.zeros(dtype, len).ok_or_else(|| unrecognized(dtype))?;
    let offset = strides_to_offset(shape, &strides);
    log::trace!("zeros: {} {:?} {}", dtype, shape, order);
    Ok(StridedView::new(
        dtype,
        buf.into_shared(),
        shape.to_vec(),
        strides,
        offset,
        order,
        ViewOptions::default(),
    ))
}

/// Create an array with the dtype, shape and order of `x` and a fresh
/// buffer whose contents are unspecified.
///
/// **Errors** with `UnrecognizedDataType` if the allocator does not
/// support the dtype of `x`.
pub fn empty_like<V: NdarrayLike + ?Sized>(x: &V) -> Result<StridedView> {
    empty_like_in(x, &HostAllocator)
}

/// Like [`empty_like`], with a buffer from `alloc`.
pub fn empty_like_in<V, A>(x: &V, alloc: &A) -> Result<StridedView>
where
    V: NdarrayLike + ?Sized,
    A: Allocator + ?Sized,
{
    let (dtype, order) = (x.dtype(), x.order());
    let (strides, len) = layout(x.shape(), order)?;
    let buf = alloc.empty(dtype, len).ok_or_else(|| unrecognized(dtype))?;
    let offset = strides_to_offset(x.shape(), &strides);
    log::trace!("empty_like: {} {:?} {}", dtype, x.shape(), order);
    Ok(StridedView::new(
        dtype,
        buf.into_shared(),
        x.shape().to_vec(),
        strides,
        offset,
        order,
        ViewOptions::default(),
    ))
}

/// Create a zero-filled array shaped like `x`, with any of its
/// properties overridden through `options`.
///
/// **Errors** with `InvalidOption` if an override is malformed (an unknown
/// dtype, order or mode name, a negative length or a shape whose
/// element count overflows), and with
/// `UnrecognizedDataType` if the allocator does not support the dtype.
///
/// ```
/// use ndarray_base::{zeros_like, Buffer, DType, NdarrayLike, Order, StridedView, ZerosLikeOptions};
///
/// let x = StridedView::from_buffer(Buffer::from(vec![1f32; 4]), vec![2, 2], Order::RowMajor);
/// let opts = ZerosLikeOptions::new().dtype("int16").shape(vec![3i64]);
/// let y = zeros_like(&x, &opts).unwrap();
/// assert_eq!(y.dtype(), DType::Int16);
/// assert_eq!(y.shape(), &[3]);
/// ```
pub fn zeros_like<V: NdarrayLike + ?Sized>(x: &V, options: &ZerosLikeOptions) -> Result<StridedView> {
    zeros_like_in(x, options, &HostAllocator)
}

/// Like [`zeros_like`], with a buffer from `alloc`.
pub fn zeros_like_in<V, A>(x: &V, options: &ZerosLikeOptions, alloc: &A) -> Result<StridedView>
where
    V: NdarrayLike + ?Sized,
    A: Allocator + ?Sized,
{
    let dtype = match &options.dtype {
        Some(s) => parse_dtype(s)?,
        None => x.dtype(),
    };
    let shape = match &options.shape {
        Some(sh) => sh.to_shape()?,
        None => x.shape().to_vec(),
    };
    let order = match &options.order {
        Some(s) => s.parse::<Order>()?,
        None => x.order(),
    };
    let mode = options.mode.as_deref().map(str::parse::<IndexMode>).transpose()?;
    let submode = match &options.submode {
        Some(names) => Some(
            names
                .iter()
                .map(|s| {
                    s.parse::<IndexMode>()
                        .map_err(|_| invalid_option("submode", names, "must be a sequence of recognized index modes"))
                })
                .collect::<Result<Vec<_>>>()?,
        ),
        None => None,
    };

    let (strides, len) = layout(&shape, order)?;
    let buf = alloc.zeros(dtype, len).ok_or_else(|| unrecognized(dtype))?;
    let offset = strides_to_offset(&shape, &strides);
    log::trace!("zeros_like: {} {:?} {}", dtype, shape, order);
    Ok(StridedView::new(
        dtype,
        buf.into_shared(),
        shape,
        strides,
        offset,
        order,
        ViewOptions {
            mode,
            submode,
            readonly: options.readonly.unwrap_or(false),
        },
    ))
}

/// Create a zero-dimensional array holding `value`.
///
/// Without a `dtype` option, real numbers are stored as `float64`, complex
/// numbers as `complex128` and anything else as `generic`. A real number
/// stored into a complex dtype gets a zero imaginary part.
///
/// **Errors** with `InvalidOption` if the `dtype` or `order` option is not
/// recognized (or the dtype is not supported by the allocator), and with
/// `InvalidValue` if `value` cannot be stored in the dtype.
///
/// ```
/// use ndarray_base::{scalar_to_ndarray, DType, NdarrayLike, Scalar, ScalarOptions};
///
/// let x = scalar_to_ndarray(2.5, &ScalarOptions::new()).unwrap();
/// assert_eq!(x.dtype(), DType::Float64);
/// assert_eq!(x.shape(), &[] as &[usize]);
/// assert_eq!(x.strides(), &[0]);
/// assert_eq!(x.get(&[]).unwrap(), Scalar::Float64(2.5));
/// ```
pub fn scalar_to_ndarray<T: Into<Scalar>>(value: T, options: &ScalarOptions) -> Result<StridedView> {
    scalar_to_ndarray_in(value, options, &HostAllocator)
}

/// Like [`scalar_to_ndarray`], with a buffer from `alloc`.
pub fn scalar_to_ndarray_in<T, A>(value: T, options: &ScalarOptions, alloc: &A) -> Result<StridedView>
where
    T: Into<Scalar>,
    A: Allocator + ?Sized,
{
    let value = value.into();
    let dtype = match &options.dtype {
        Some(s) => parse_dtype(s)?,
        None => value.default_dtype(),
    };
    let order = match &options.order {
        Some(s) => s.parse::<Order>()?,
        None => defaults().order,
    };
    let mut buf = alloc
        .zeros(dtype, 1)
        .ok_or_else(|| invalid_option("dtype", dtype.as_str(), "must be a recognized data type"))?;
    buf.set(0, &value)?;
    log::trace!("scalar_to_ndarray: {:?} as {}", value, dtype);
    Ok(StridedView::new(
        dtype,
        buf.into_shared(),
        Vec::new(),
        vec![0],
        0,
        order,
        ViewOptions::readonly(options.readonly.unwrap_or(false)),
    ))
}
