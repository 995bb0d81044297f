// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::str::FromStr;

use num_integer::Integer;

use crate::error::{invalid_option, Error, Result};

/// Policy for out-of-range indices.
///
/// A view carries one `mode` applied to linear indexing and a list of
/// per-dimension `submode`s applied to subscripts, recycled when the list
/// is shorter than the number of dimensions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IndexMode {
    /// Out-of-range indices are an error.
    #[default]
    Throw,
    /// Indices wrap around, negative indices count from the end.
    Wrap,
    /// Indices are clamped to the valid range.
    Clamp,
}

impl IndexMode {
    pub fn as_str(self) -> &'static str {
        match self {
            IndexMode::Throw => "throw",
            IndexMode::Wrap => "wrap",
            IndexMode::Clamp => "clamp",
        }
    }

    /// Stable wire code.
    #[inline]
    pub fn code(self) -> i8 {
        match self {
            IndexMode::Throw => 1,
            IndexMode::Clamp => 2,
            IndexMode::Wrap => 3,
        }
    }

    pub fn from_code(code: i8) -> Option<IndexMode> {
        match code {
            1 => Some(IndexMode::Throw),
            2 => Some(IndexMode::Clamp),
            3 => Some(IndexMode::Wrap),
            _ => None,
        }
    }

    pub fn all() -> &'static [IndexMode] {
        &[IndexMode::Throw, IndexMode::Clamp, IndexMode::Wrap]
    }

    /// Resolve `index` against the inclusive maximum index `max`.
    ///
    /// ```
    /// use ndarray_base::IndexMode;
    ///
    /// assert_eq!(IndexMode::Wrap.resolve(-1, 9).unwrap(), 9);
    /// assert_eq!(IndexMode::Clamp.resolve(12, 9).unwrap(), 9);
    /// assert!(IndexMode::Throw.resolve(10, 9).is_err());
    /// ```
    pub fn resolve(self, index: isize, max: usize) -> Result<usize> {
        match self {
            IndexMode::Throw => {
                if index < 0 || index as usize > max {
                    Err(Error::IndexOutOfBounds { index, max })
                } else {
                    Ok(index as usize)
                }
            }
            IndexMode::Wrap => {
                let len = max as isize + 1;
                Ok(index.mod_floor(&len) as usize)
            }
            IndexMode::Clamp => {
                if index < 0 {
                    Ok(0)
                } else {
                    Ok((index as usize).min(max))
                }
            }
        }
    }
}

impl fmt::Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "throw" => Ok(IndexMode::Throw),
            "wrap" => Ok(IndexMode::Wrap),
            "clamp" => Ok(IndexMode::Clamp),
            _ => Err(invalid_option("mode", s, "must be a recognized index mode")),
        }
    }
}
