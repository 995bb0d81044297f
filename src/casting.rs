// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Casting tables and type promotion.
//!
//! Both tables are indexed `[from][to]` in [`DType`] table order:
//!
//! ```text
//! i8 u8 u8c i16 u16 i32 u32 i64 u64 f32 f64 c64 c128 bin gen
//! ```
use std::fmt;
use std::str::FromStr;

use crate::dtype::{DType, NDTYPES};
use crate::error::{invalid_option, Error};

type Table = [[u8; NDTYPES]; NDTYPES];

#[rustfmt::skip]
static SAFE_CASTS: Table = [
    //i8 u8 u8c i16 u16 i32 u32 i64 u64 f32 f64 c64 c128 bin gen
    [1, 0, 0, 1, 0, 1, 0, 1, 0, 1, 1, 1, 1, 0, 1], // int8
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1], // uint8
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1], // uint8c
    [0, 0, 0, 1, 0, 1, 0, 1, 0, 1, 1, 1, 1, 0, 1], // int16
    [0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1], // uint16
    [0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 1, 0, 1, 0, 1], // int32
    [0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 1, 0, 1, 0, 1], // uint32
    [0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1], // int64
    [0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1], // uint64
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 1], // float32
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 1], // float64
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 1], // complex64
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1], // complex128
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0], // binary
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1], // generic
];

#[rustfmt::skip]
static SAME_KIND_CASTS: Table = [
    //i8 u8 u8c i16 u16 i32 u32 i64 u64 f32 f64 c64 c128 bin gen
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1], // int8
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1], // uint8
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1], // uint8c
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1], // int16
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1], // uint16
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1], // int32
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1], // uint32
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1], // int64
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1], // uint64
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 1], // float32
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 1], // float64
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 1], // complex64
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 1], // complex128
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0], // binary
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1], // generic
];

// Candidates for promotion, narrowest first.
static PROMOTION_ORDER: [DType; NDTYPES] = [
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

/// Return the rank of the safe cast from `from` to `to`; zero means the
/// cast is not safe.
#[inline]
pub fn safe_cast_rank(from: DType, to: DType) -> u8 {
    SAFE_CASTS[from.index()][to.index()]
}

/// Return the rank of the same-kind cast from `from` to `to`.
#[inline]
pub fn same_kind_cast_rank(from: DType, to: DType) -> u8 {
    SAME_KIND_CASTS[from.index()][to.index()]
}

/// Return whether values of `from` can be cast to `to` without loss.
///
/// ```
/// use ndarray_base::{is_safe_cast, DType};
///
/// assert!(is_safe_cast(DType::Float32, DType::Float64));
/// assert!(!is_safe_cast(DType::Float64, DType::Float32));
/// ```
pub fn is_safe_cast(from: DType, to: DType) -> bool {
    from == to || safe_cast_rank(from, to) > 0
}

/// Return whether `from` can be cast to `to` safely or within the same
/// kind (e.g. between integer widths and signedness).
pub fn is_same_kind_cast(from: DType, to: DType) -> bool {
    from == to || same_kind_cast_rank(from, to) > 0
}

/// Return the narrowest data type to which both `a` and `b` can be cast
/// safely, or `None` if there is none.
pub fn promote(a: DType, b: DType) -> Option<DType> {
    if a == b {
        return Some(a);
    }
    PROMOTION_ORDER
        .iter()
        .copied()
        .find(|&dt| is_safe_cast(a, dt) && is_safe_cast(b, dt))
}

/// Casting policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CastingMode {
    /// Only identical data types.
    #[cfg_attr(feature = "serde", serde(rename = "none"))]
    No,
    /// Identical data types up to byte order; same as `No` for host buffers.
    Equiv,
    Safe,
    SameKind,
    /// Any cast.
    Unsafe,
}

impl CastingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CastingMode::No => "none",
            CastingMode::Equiv => "equiv",
            CastingMode::Safe => "safe",
            CastingMode::SameKind => "same-kind",
            CastingMode::Unsafe => "unsafe",
        }
    }
}

impl fmt::Display for CastingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CastingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(CastingMode::No),
            "equiv" => Ok(CastingMode::Equiv),
            "safe" => Ok(CastingMode::Safe),
            "same-kind" => Ok(CastingMode::SameKind),
            "unsafe" => Ok(CastingMode::Unsafe),
            _ => Err(invalid_option("casting", s, "must be a recognized casting mode")),
        }
    }
}

/// Return whether a cast from `from` to `to` is allowed under `mode`.
pub fn is_allowed_cast(from: DType, to: DType, mode: CastingMode) -> bool {
    match mode {
        CastingMode::Unsafe => true,
        CastingMode::No | CastingMode::Equiv => from == to,
        CastingMode::Safe => is_safe_cast(from, to),
        CastingMode::SameKind => is_same_kind_cast(from, to),
    }
}
