// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use num_complex::{Complex, Complex32, Complex64};
use num_traits::{Float, NumCast, PrimInt};

use crate::dtype::DType;

/// A single element value, as read from or written to a buffer.
///
/// Buffers of the `generic` data type store `Scalar`s directly, which is
/// how they hold arbitrary values: `Opaque` boxes any `Send + Sync` value.
#[derive(Clone)]
pub enum Scalar {
    Int8(i8),
    Uint8(u8),
    Int16(i16),
    Uint16(u16),
    Int32(i32),
    Uint32(u32),
    Int64(i64),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Complex64(Complex32),
    Complex128(Complex64),
    Bool(bool),
    Str(String),
    Null,
    Opaque(Arc<dyn Any + Send + Sync>),
}

macro_rules! real_dispatch {
    ($s:expr, $x:ident => $e:expr, _ => $other:expr) => {
        match *$s {
            Scalar::Int8($x) => $e,
            Scalar::Uint8($x) => $e,
            Scalar::Int16($x) => $e,
            Scalar::Uint16($x) => $e,
            Scalar::Int32($x) => $e,
            Scalar::Uint32($x) => $e,
            Scalar::Int64($x) => $e,
            Scalar::Uint64($x) => $e,
            Scalar::Float32($x) => $e,
            Scalar::Float64($x) => $e,
            _ => $other,
        }
    };
}

impl Scalar {
    /// Return true for real numbers of any width.
    pub fn is_real_number(&self) -> bool {
        real_dispatch!(self, _x => true, _ => false)
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Scalar::Complex64(_) | Scalar::Complex128(_))
    }

    /// The data type a 0-d array holding this value gets by default:
    /// real numbers are `float64`, complex numbers `complex128`, anything
    /// else `generic`.
    pub fn default_dtype(&self) -> DType {
        if self.is_real_number() {
            DType::Float64
        } else if self.is_complex() {
            DType::Complex128
        } else {
            DType::Generic
        }
    }

    /// Convert a real number (or bool) to `T`; `None` if the value is not
    /// a real number or is out of range for `T`.
    pub fn to_real<T: NumCast>(&self) -> Option<T> {
        match *self {
            Scalar::Bool(b) => <T as NumCast>::from(b as u8),
            _ => real_dispatch!(self, x => <T as NumCast>::from(x), _ => None),
        }
    }

    /// Convert a real number (or bool) to the integer type `T`; `None` if
    /// the value has a fractional part, is not finite or is out of range.
    pub fn to_integer<T: PrimInt>(&self) -> Option<T> {
        match *self {
            Scalar::Float32(x) if x.fract() != 0. => None,
            Scalar::Float64(x) if x.fract() != 0. => None,
            _ => self.to_real(),
        }
    }

    /// Convert to a complex number; real numbers get a zero imaginary part.
    pub fn to_complex<T: Float>(&self) -> Option<Complex<T>> {
        match *self {
            Scalar::Complex64(c) => Some(Complex::new(<T as NumCast>::from(c.re)?, <T as NumCast>::from(c.im)?)),
            Scalar::Complex128(c) => Some(Complex::new(<T as NumCast>::from(c.re)?, <T as NumCast>::from(c.im)?)),
            _ => self.to_real::<T>().map(|re| Complex::new(re, T::zero())),
        }
    }

    /// Convert to a clamped unsigned byte, rounding to nearest.
    pub fn to_clamped_u8(&self) -> Option<u8> {
        let x = self.to_real::<f64>()?;
        if x.is_nan() {
            return Some(0);
        }
        Some(x.round().clamp(0., 255.) as u8)
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Complex64(c) => write!(f, "Complex64({:?})", c),
            Scalar::Complex128(c) => write!(f, "Complex128({:?})", c),
            Scalar::Bool(b) => write!(f, "Bool({:?})", b),
            Scalar::Str(s) => write!(f, "Str({:?})", s),
            Scalar::Null => f.write_str("Null"),
            Scalar::Opaque(_) => f.write_str("Opaque(..)"),
            other => real_dispatch!(other, x => write!(f, "{:?}", x), _ => Ok(())),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Complex64(c) => write!(f, "{}", c),
            Scalar::Complex128(c) => write!(f, "{}", c),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Str(s) => write!(f, "{}", s),
            Scalar::Null => f.write_str("null"),
            Scalar::Opaque(_) => f.write_str("<opaque>"),
            other => real_dispatch!(other, x => write!(f, "{}", x), _ => Ok(())),
        }
    }
}

/// Values compare by variant and value; opaque values compare by identity.
impl PartialEq for Scalar {
    fn eq(&self, rhs: &Self) -> bool {
        use self::Scalar::*;
        match (self, rhs) {
            (Int8(a), Int8(b)) => a == b,
            (Uint8(a), Uint8(b)) => a == b,
            (Int16(a), Int16(b)) => a == b,
            (Uint16(a), Uint16(b)) => a == b,
            (Int32(a), Int32(b)) => a == b,
            (Uint32(a), Uint32(b)) => a == b,
            (Int64(a), Int64(b)) => a == b,
            (Uint64(a), Uint64(b)) => a == b,
            (Float32(a), Float32(b)) => a == b,
            (Float64(a), Float64(b)) => a == b,
            (Complex64(a), Complex64(b)) => a == b,
            (Complex128(a), Complex128(b)) => a == b,
            (Bool(a), Bool(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Null, Null) => true,
            (Opaque(a), Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

macro_rules! impl_from {
    ($($t:ty => $v:ident,)*) => {
        $(
        impl From<$t> for Scalar {
            #[inline]
            fn from(x: $t) -> Self {
                Scalar::$v(x)
            }
        }
        )*
    };
}

impl_from! {
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
    bool => Bool,
    String => Str,
}

impl<'a> From<&'a str> for Scalar {
    fn from(s: &'a str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        assert_eq!(Scalar::from(3i32).to_real::<f64>(), Some(3.));
        assert_eq!(Scalar::from(300i32).to_real::<u8>(), None);
        assert_eq!(Scalar::from(-1.5f64).to_integer::<i16>(), None);
        assert_eq!(Scalar::from(-2f64).to_integer::<i16>(), Some(-2));
        assert_eq!(Scalar::from(f32::NAN).to_integer::<u32>(), None);
        assert_eq!(Scalar::from(f64::INFINITY).to_integer::<i64>(), None);
        assert_eq!(Scalar::from(1000.).to_integer::<i8>(), None);
        assert_eq!(Scalar::from(true).to_integer::<u8>(), Some(1));
        assert_eq!(Scalar::from(2.5f32).to_complex::<f64>(), Some(Complex64::new(2.5, 0.)));
        assert_eq!(Scalar::from("x").to_real::<f64>(), None);
        assert_eq!(Scalar::from(Complex64::new(1., 2.)).to_real::<f64>(), None);
        assert_eq!(Scalar::from(300.).to_clamped_u8(), Some(255));
        assert_eq!(Scalar::from(-3).to_clamped_u8(), Some(0));
    }

    #[test]
    fn default_dtype_inference() {
        assert_eq!(Scalar::from(1u8).default_dtype(), DType::Float64);
        assert_eq!(Scalar::from(Complex32::new(1., 0.)).default_dtype(), DType::Complex128);
        assert_eq!(Scalar::from(true).default_dtype(), DType::Generic);
        assert_eq!(Scalar::Null.default_dtype(), DType::Generic);
    }

    #[test]
    fn opaque_identity() {
        let a: Arc<dyn Any + Send + Sync> = Arc::new(vec![1, 2, 3]);
        let x = Scalar::Opaque(a.clone());
        assert_eq!(x, Scalar::Opaque(a));
        assert_ne!(x, Scalar::Opaque(Arc::new(vec![1, 2, 3])));
    }
}
