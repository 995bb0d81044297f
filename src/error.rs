// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// An error produced by layout, casting, view, traversal, codec or
/// factory operations.
///
/// Every variant carries enough context (dimension index, shapes, dtype
/// name or option value) to reconstruct the failed precondition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The broadcast target has fewer dimensions than the source.
    #[error(
        "cannot broadcast an array having {source_ndims} dimensions to a shape having {target_ndims}; \
         arrays can only be broadcast to shapes having the same or more dimensions"
    )]
    Dimension {
        source_ndims: usize,
        target_ndims: usize,
    },
    /// A source dimension is neither 1 nor equal to the target dimension.
    #[error(
        "input array and target shape are broadcast incompatible. \
         Array shape: {shape:?}. Desired shape: {target:?}. Dimension: {dim}"
    )]
    BroadcastIncompatible {
        shape: Vec<usize>,
        target: Vec<usize>,
        dim: usize,
    },
    /// A dtype name or code absent from the data type table, or a dtype
    /// the allocator does not support.
    #[error("unrecognized data type: `{0}`")]
    UnrecognizedDataType(String),
    /// A malformed or type-mismatched option value.
    #[error("invalid option. `{name}` option: {reason}. Option: `{value}`")]
    InvalidOption {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
    /// A binary metadata record failed its self-consistency checks.
    #[error("malformed metadata record: {0}")]
    MalformedRecord(String),
    /// A nested sequence does not match the expected shape.
    #[error("nested sequence does not match shape {shape:?} at dimension {dim}")]
    IncompatibleShape { shape: Vec<usize>, dim: usize },
    /// An index is out of bounds under the `throw` index mode.
    #[error("index {index} out of bounds for an axis with maximum index {max}")]
    IndexOutOfBounds { index: isize, max: usize },
    /// A value cannot be stored in a buffer of the given dtype.
    #[error("value {value} cannot be stored as `{dtype}`")]
    InvalidValue { value: String, dtype: &'static str },
}

/// Error code for an [`Error`], without its context.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    Dimension,
    BroadcastIncompatible,
    UnrecognizedDataType,
    InvalidOption,
    MalformedRecord,
    IncompatibleShape,
    IndexOutOfBounds,
    InvalidValue,
}

impl Error {
    /// Return the `ErrorKind` of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Dimension { .. } => ErrorKind::Dimension,
            Error::BroadcastIncompatible { .. } => ErrorKind::BroadcastIncompatible,
            Error::UnrecognizedDataType(_) => ErrorKind::UnrecognizedDataType,
            Error::InvalidOption { .. } => ErrorKind::InvalidOption,
            Error::MalformedRecord(_) => ErrorKind::MalformedRecord,
            Error::IncompatibleShape { .. } => ErrorKind::IncompatibleShape,
            Error::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            Error::InvalidValue { .. } => ErrorKind::InvalidValue,
        }
    }
}

pub(crate) fn invalid_option<V: std::fmt::Debug>(name: &'static str, value: V, reason: &'static str) -> Error {
    Error::InvalidOption {
        name,
        value: format!("{:?}", value),
        reason,
    }
}

pub(crate) fn malformed<S: Into<String>>(msg: S) -> Error {
    Error::MalformedRecord(msg.into())
}

/// Result type of this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let e = Error::Dimension { source_ndims: 3, target_ndims: 2 };
        assert_eq!(e.kind(), ErrorKind::Dimension);
        let e = invalid_option("shape", -1, "must be a nonnegative integer");
        assert_eq!(e.kind(), ErrorKind::InvalidOption);
        assert!(e.to_string().contains("`shape`"));
        assert_eq!(malformed("short").kind(), ErrorKind::MalformedRecord);
    }

    #[test]
    fn broadcast_message_names_dimension() {
        let e = Error::BroadcastIncompatible {
            shape: vec![2],
            target: vec![3, 4],
            dim: 1,
        };
        assert!(e.to_string().ends_with("Dimension: 1"));
    }
}
