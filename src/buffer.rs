// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Host buffers and the allocation seam used by the factories.
use std::sync::Arc;

use num_complex::{Complex32, Complex64};
use parking_lot::RwLock;

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::scalar::Scalar;

/// A linear store of elements of one data type.
#[derive(Clone, Debug, PartialEq)]
pub enum Buffer {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Uint8c(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Int64(Vec<i64>),
    Uint64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Complex64(Vec<Complex32>),
    Complex128(Vec<Complex64>),
    Binary(Vec<u8>),
    Generic(Vec<Scalar>),
}

/// A buffer shared between all views derived from the same allocation.
///
/// The lock makes single reads and writes memory safe; it does not order
/// writes made through aliasing views.
pub type SharedBuffer = Arc<RwLock<Buffer>>;

/// Apply `$e` to the vector inside any buffer variant.
macro_rules! with_vec {
    ($b:expr, $v:ident => $e:expr) => {
        match $b {
            Buffer::Int8($v) => $e,
            Buffer::Uint8($v) => $e,
            Buffer::Uint8c($v) => $e,
            Buffer::Int16($v) => $e,
            Buffer::Uint16($v) => $e,
            Buffer::Int32($v) => $e,
            Buffer::Uint32($v) => $e,
            Buffer::Int64($v) => $e,
            Buffer::Uint64($v) => $e,
            Buffer::Float32($v) => $e,
            Buffer::Float64($v) => $e,
            Buffer::Complex64($v) => $e,
            Buffer::Complex128($v) => $e,
            Buffer::Binary($v) => $e,
            Buffer::Generic($v) => $e,
        }
    };
}

impl Buffer {
    /// Create a zero-filled buffer; `generic` buffers are filled with
    /// `Scalar::Float64(0.)`.
    pub fn zeros(dtype: DType, len: usize) -> Buffer {
        match dtype {
            DType::Int8 => Buffer::Int8(vec![0; len]),
            DType::Uint8 => Buffer::Uint8(vec![0; len]),
            DType::Uint8c => Buffer::Uint8c(vec![0; len]),
            DType::Int16 => Buffer::Int16(vec![0; len]),
            DType::Uint16 => Buffer::Uint16(vec![0; len]),
            DType::Int32 => Buffer::Int32(vec![0; len]),
            DType::Uint32 => Buffer::Uint32(vec![0; len]),
            DType::Int64 => Buffer::Int64(vec![0; len]),
            DType::Uint64 => Buffer::Uint64(vec![0; len]),
            DType::Float32 => Buffer::Float32(vec![0.; len]),
            DType::Float64 => Buffer::Float64(vec![0.; len]),
            DType::Complex64 => Buffer::Complex64(vec![Complex32::new(0., 0.); len]),
            DType::Complex128 => Buffer::Complex128(vec![Complex64::new(0., 0.); len]),
            DType::Binary => Buffer::Binary(vec![0; len]),
            DType::Generic => Buffer::Generic(vec![Scalar::Float64(0.); len]),
        }
    }

    /// Raw byte store for `binary` data.
    ///
    /// Reading uninitialized memory is undefined behaviour in Rust, so the
    /// bytes are set; callers must still treat the contents as unspecified.
    pub fn alloc_bytes(len: usize) -> Buffer {
        let mut v = Vec::with_capacity(len);
        v.resize(len, 0u8);
        Buffer::Binary(v)
    }

    pub fn dtype(&self) -> DType {
        match self {
            Buffer::Int8(_) => DType::Int8,
            Buffer::Uint8(_) => DType::Uint8,
            Buffer::Uint8c(_) => DType::Uint8c,
            Buffer::Int16(_) => DType::Int16,
            Buffer::Uint16(_) => DType::Uint16,
            Buffer::Int32(_) => DType::Int32,
            Buffer::Uint32(_) => DType::Uint32,
            Buffer::Int64(_) => DType::Int64,
            Buffer::Uint64(_) => DType::Uint64,
            Buffer::Float32(_) => DType::Float32,
            Buffer::Float64(_) => DType::Float64,
            Buffer::Complex64(_) => DType::Complex64,
            Buffer::Complex128(_) => DType::Complex128,
            Buffer::Binary(_) => DType::Binary,
            Buffer::Generic(_) => DType::Generic,
        }
    }

    pub fn len(&self) -> usize {
        with_vec!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the element at buffer index `i`, or `None` if out of bounds.
    pub fn get(&self, i: usize) -> Option<Scalar> {
        Some(match self {
            Buffer::Int8(v) => Scalar::Int8(*v.get(i)?),
            Buffer::Uint8(v) | Buffer::Uint8c(v) | Buffer::Binary(v) => Scalar::Uint8(*v.get(i)?),
            Buffer::Int16(v) => Scalar::Int16(*v.get(i)?),
            Buffer::Uint16(v) => Scalar::Uint16(*v.get(i)?),
            Buffer::Int32(v) => Scalar::Int32(*v.get(i)?),
            Buffer::Uint32(v) => Scalar::Uint32(*v.get(i)?),
            Buffer::Int64(v) => Scalar::Int64(*v.get(i)?),
            Buffer::Uint64(v) => Scalar::Uint64(*v.get(i)?),
            Buffer::Float32(v) => Scalar::Float32(*v.get(i)?),
            Buffer::Float64(v) => Scalar::Float64(*v.get(i)?),
            Buffer::Complex64(v) => Scalar::Complex64(*v.get(i)?),
            Buffer::Complex128(v) => Scalar::Complex128(*v.get(i)?),
            Buffer::Generic(v) => v.get(i)?.clone(),
        })
    }

    /// Store `value` at buffer index `i`, converting it to the buffer's
    /// data type.
    ///
    /// Real values stored into complex buffers get a zero imaginary part;
    /// `uint8c` clamps. Values not representable in the data type fail
    /// with `InvalidValue`, an out-of-bounds index with `IndexOutOfBounds`.
    pub fn set(&mut self, i: usize, value: &Scalar) -> Result<()> {
        let len = self.len();
        if i >= len {
            return Err(Error::IndexOutOfBounds {
                index: i as isize,
                max: len.wrapping_sub(1),
            });
        }
        let dtype = self.dtype();
        let invalid = || Error::InvalidValue {
            value: value.to_string(),
            dtype: dtype.as_str(),
        };
        match self {
            Buffer::Int8(v) => v[i] = value.to_integer().ok_or_else(invalid)?,
            Buffer::Uint8(v) | Buffer::Binary(v) => v[i] = value.to_integer().ok_or_else(invalid)?,
            Buffer::Uint8c(v) => v[i] = value.to_clamped_u8().ok_or_else(invalid)?,
            Buffer::Int16(v) => v[i] = value.to_integer().ok_or_else(invalid)?,
            Buffer::Uint16(v) => v[i] = value.to_integer().ok_or_else(invalid)?,
            Buffer::Int32(v) => v[i] = value.to_integer().ok_or_else(invalid)?,
            Buffer::Uint32(v) => v[i] = value.to_integer().ok_or_else(invalid)?,
            Buffer::Int64(v) => v[i] = value.to_integer().ok_or_else(invalid)?,
            Buffer::Uint64(v) => v[i] = value.to_integer().ok_or_else(invalid)?,
            Buffer::Float32(v) => v[i] = value.to_real().ok_or_else(invalid)?,
            Buffer::Float64(v) => v[i] = value.to_real().ok_or_else(invalid)?,
            Buffer::Complex64(v) => v[i] = value.to_complex().ok_or_else(invalid)?,
            Buffer::Complex128(v) => v[i] = value.to_complex().ok_or_else(invalid)?,
            Buffer::Generic(v) => v[i] = value.clone(),
        }
        Ok(())
    }

    /// Wrap the buffer for sharing between views.
    pub fn into_shared(self) -> SharedBuffer {
        Arc::new(RwLock::new(self))
    }
}

macro_rules! impl_from_vec {
    ($($t:ty => $v:ident,)*) => {
        $(
        impl From<Vec<$t>> for Buffer {
            fn from(v: Vec<$t>) -> Self {
                Buffer::$v(v)
            }
        }
        )*
    };
}

impl_from_vec! {
    i8 => Int8,
    u8 => Uint8,
    i16 => Int16,
    u16 => Uint16,
    i32 => Int32,
    u32 => Uint32,
    i64 => Int64,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    Complex32 => Complex64,
    Complex64 => Complex128,
    Scalar => Generic,
}

/// Buffer allocation facility used by the factories.
///
/// Returning `None` signals that the data type is not supported by the
/// allocator; factories report it as `UnrecognizedDataType` (or as an
/// invalid `dtype` option).
pub trait Allocator {
    /// Allocate a zero-filled buffer of `len` elements.
    fn zeros(&self, dtype: DType, len: usize) -> Option<Buffer>;

    /// Allocate a buffer of `len` elements whose contents are unspecified.
    fn empty(&self, dtype: DType, len: usize) -> Option<Buffer> {
        self.zeros(dtype, len)
    }
}

/// Allocator for ordinary host memory; supports every data type.
#[derive(Copy, Clone, Debug, Default)]
pub struct HostAllocator;

impl Allocator for HostAllocator {
    fn zeros(&self, dtype: DType, len: usize) -> Option<Buffer> {
        Some(Buffer::zeros(dtype, len))
    }

    fn empty(&self, dtype: DType, len: usize) -> Option<Buffer> {
        match dtype {
            DType::Binary => Some(Buffer::alloc_bytes(len)),
            DType::Generic => Some(Buffer::Generic(vec![Scalar::Null; len])),
            _ => Some(Buffer::zeros(dtype, len)),
        }
    }
}
