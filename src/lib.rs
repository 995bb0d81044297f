// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![allow(clippy::many_single_char_names, clippy::len_without_is_empty)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! The `ndarray-base` crate provides the building blocks of strided
//! n-dimensional array views over dynamically typed buffers.
//!
//! An array is described by a data type, a shared buffer, a shape, per-axis
//! strides (in elements, possibly negative or zero), an offset into the
//! buffer and an order. This crate computes and transforms such
//! descriptors; it does not implement arithmetic on the elements.
//!
//! ## Crate Summary and Features
//!
//! - Layout arithmetic: [`shape_to_strides`], [`strides_to_offset`],
//!   [`sub2ind`], [`ind2sub`] and contiguity predicates.
//! - The data type table [`DType`] with its casting tables
//!   ([`is_safe_cast`], [`is_same_kind_cast`], [`promote`]).
//! - [`StridedView`], a view of a shared [`Buffer`], and the
//!   [`NdarrayLike`] trait for anything that exposes a descriptor.
//! - Zero-copy transformations: [`broadcast_array`] and
//!   [`prepend_singleton_dimensions`].
//! - Conversion to and from nested sequences: [`to_nested`],
//!   [`from_nested`] and the [`nested!`] macro.
//! - A binary metadata record for handing descriptors across a boundary:
//!   [`serialize_meta_data`] and [`deserialize_meta_data`].
//! - Factories: [`zeros`], [`empty_like`], [`zeros_like`] and
//!   [`scalar_to_ndarray`].
//!
//! ## Crate Feature Flags
//!
//! The following crate feature flags are available. They are configured in
//! your `Cargo.toml`. See [`doc::crate_feature_flags`] for more information.
//!
//! - `std`: Rust standard library-using functionality (enabled by default)
//! - `serde`: serialization support for the descriptor and option types
//!
//! ## Logging
//!
//! Factories and view transformations log their inputs at `trace` level,
//! the metadata codec at `debug` level, through the [`log`] facade.

#[macro_use]
mod nested;

pub mod doc;

mod buffer;
mod casting;
mod defaults;
mod dimension;
mod dtype;
mod error;
mod impl_constructors;
mod impl_views;
mod index_mode;
mod meta_data;
mod order;
mod scalar;
mod view;

pub use crate::buffer::{Allocator, Buffer, HostAllocator, SharedBuffer};
pub use crate::casting::{
    is_allowed_cast, is_safe_cast, is_same_kind_cast, promote, safe_cast_rank, same_kind_cast_rank, CastingMode,
};
pub use crate::defaults::{defaults, DefaultDTypes, Defaults};
pub use crate::dimension::{
    broadcast_shapes, ind2sub, is_buffer_length_compatible, is_buffer_length_compatible_shape,
    is_column_major_contiguous, is_contiguous, is_row_major_contiguous, is_single_segment_compatible, iteration_order,
    max_view_buffer_index, min_view_buffer_index, numel, shape_to_strides, size_of_shape_checked, strides_to_offset,
    sub2ind,
};
pub use crate::dtype::{DType, Kind};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::impl_constructors::{
    empty_like, empty_like_in, scalar_to_ndarray, scalar_to_ndarray_in, zeros, zeros_in, zeros_like, zeros_like_in,
    ScalarOptions, ShapeArg, ZerosLikeOptions,
};
pub use crate::impl_views::{broadcast_array, prepend_singleton_dimensions};
pub use crate::index_mode::IndexMode;
pub use crate::meta_data::{deserialize_meta_data, serialize_meta_data, MetaData};
pub use crate::nested::{from_nested, to_nested, Nested};
pub use crate::order::Order;
pub use crate::scalar::Scalar;
pub use crate::view::{is_read_only, NdarrayLike, StridedView, ViewOptions};
