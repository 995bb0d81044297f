// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The data type table.
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Element kind of a data type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Int,
    Uint,
    Float,
    Complex,
    Binary,
    Generic,
}

/// The data type of an array's elements.
///
/// The discriminant is the row/column of the data type in the casting
/// tables; the wire code used by the metadata record is [`DType::code`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum DType {
    Int8 = 0,
    Uint8,
    /// Unsigned 8-bit integer, clamped on assignment.
    Uint8c,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float32,
    Float64,
    Complex64,
    Complex128,
    /// Raw bytes.
    Binary,
    /// Arbitrary boxed values.
    Generic,
}

pub(crate) const NDTYPES: usize = 15;

struct Entry {
    name: &'static str,
    code: i16,
    kind: Kind,
    size: Option<usize>,
}

macro_rules! entry {
    ($name:expr, $code:expr, $kind:ident, $size:expr) => {
        Entry {
            name: $name,
            code: $code,
            kind: Kind::$kind,
            size: $size,
        }
    };
}

// indexed by `DType as usize`
static TABLE: [Entry; NDTYPES] = [
    entry!("int8", 1, Int, Some(1)),
    entry!("uint8", 2, Uint, Some(1)),
    entry!("uint8c", 3, Uint, Some(1)),
    entry!("int16", 4, Int, Some(2)),
    entry!("uint16", 5, Uint, Some(2)),
    entry!("int32", 6, Int, Some(4)),
    entry!("uint32", 7, Uint, Some(4)),
    entry!("int64", 8, Int, Some(8)),
    entry!("uint64", 9, Uint, Some(8)),
    entry!("float32", 16, Float, Some(4)),
    entry!("float64", 17, Float, Some(8)),
    entry!("complex64", 19, Complex, Some(8)),
    entry!("complex128", 20, Complex, Some(16)),
    entry!("binary", 21, Binary, Some(1)),
    entry!("generic", 22, Generic, None),
];

static ALL: [DType; NDTYPES] = [
    DType::Int8,
    DType::Uint8,
    DType::Uint8c,
    DType::Int16,
    DType::Uint16,
    DType::Int32,
    DType::Uint32,
    DType::Int64,
    DType::Uint64,
    DType::Float32,
    DType::Float64,
    DType::Complex64,
    DType::Complex128,
    DType::Binary,
    DType::Generic,
];

impl DType {
    #[inline]
    fn entry(self) -> &'static Entry {
        &TABLE[self as usize]
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// All data types, in table order.
    pub fn all() -> &'static [DType] {
        &ALL
    }

    pub fn as_str(self) -> &'static str {
        self.entry().name
    }

    pub fn kind(self) -> Kind {
        self.entry().kind
    }

    /// Size of one element in bytes; `None` for `generic`.
    pub fn byte_size(self) -> Option<usize> {
        self.entry().size
    }

    /// Stable wire code.
    pub fn code(self) -> i16 {
        self.entry().code
    }

    pub fn from_code(code: i16) -> Option<DType> {
        ALL.iter().copied().find(|dt| dt.code() == code)
    }

    pub fn is_integral(self) -> bool {
        matches!(self.kind(), Kind::Int | Kind::Uint)
    }

    pub fn is_signed_integer(self) -> bool {
        self.kind() == Kind::Int
    }

    pub fn is_unsigned_integer(self) -> bool {
        self.kind() == Kind::Uint
    }

    pub fn is_real_floating_point(self) -> bool {
        self.kind() == Kind::Float
    }

    pub fn is_complex_floating_point(self) -> bool {
        self.kind() == Kind::Complex
    }

    pub fn is_floating_point(self) -> bool {
        self.is_real_floating_point() || self.is_complex_floating_point()
    }

    pub fn is_numeric(self) -> bool {
        self.is_integral() || self.is_floating_point()
    }

    /// Real numeric data types, i.e. numeric and not complex.
    pub fn is_real(self) -> bool {
        self.is_integral() || self.is_real_floating_point()
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.iter()
            .copied()
            .find(|dt| dt.as_str() == s)
            .ok_or_else(|| Error::UnrecognizedDataType(s.to_string()))
    }
}
