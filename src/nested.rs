// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversion between strided layouts and nested sequences.

use crate::dimension::{numel, shape_to_strides};
use crate::error::{Error, Result};
use crate::order::Order;
use crate::scalar::Scalar;
use crate::view::{NdarrayLike, StridedView};

/// A nested sequence: one level of `Array` per axis, elements innermost.
#[derive(Clone, Debug, PartialEq)]
pub enum Nested<T> {
    Elem(T),
    Array(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    pub fn as_elem(&self) -> Option<&T> {
        match self {
            Nested::Elem(x) => Some(x),
            Nested::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Nested<T>]> {
        match self {
            Nested::Elem(_) => None,
            Nested::Array(v) => Some(v),
        }
    }

    /// Apply `f` to every element, keeping the structure.
    pub fn map<U, F>(self, f: &mut F) -> Nested<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            Nested::Elem(x) => Nested::Elem(f(x)),
            Nested::Array(v) => Nested::Array(v.into_iter().map(|n| n.map(f)).collect()),
        }
    }
}

/// Build a [`Nested`] value from bracketed literals.
///
/// Elements must be single token trees; wrap anything longer (negative
/// numbers, calls) in parentheses.
///
/// ```
/// use ndarray_base::{nested, Nested};
///
/// let n = nested!([[1, 2], [3, (-4)]]);
/// assert_eq!(n.as_array().unwrap()[1], Nested::Array(vec![Nested::Elem(3), Nested::Elem(-4)]));
/// ```
#[macro_export]
macro_rules! nested {
    ([$($x:tt),* $(,)?]) => {
        $crate::Nested::Array(vec![$($crate::nested!($x)),*])
    };
    ($x:expr) => {
        $crate::Nested::Elem($x)
    };
}

/// Visit every element of the layout once, calling `f` with the element's
/// row major logical position and its buffer index.
///
/// `order` selects which axis varies fastest during the walk: the last
/// one for row major, the first one for column major. The buffer index is
/// updated incrementally, so negative strides need no special casing.
fn walk<E, F>(shape: &[usize], strides: &[isize], offset: usize, order: Order, mut f: F) -> std::result::Result<(), E>
where
    F: FnMut(usize, isize) -> std::result::Result<(), E>,
{
    let len = numel(shape);
    if shape.is_empty() || len == 0 {
        return Ok(());
    }
    let ndim = shape.len();
    let pos_strides = shape_to_strides(shape, Order::RowMajor);
    let axes: Vec<usize> = match order {
        Order::RowMajor => (0..ndim).rev().collect(),
        Order::ColumnMajor => (0..ndim).collect(),
    };
    let mut index = vec![0; ndim];
    let mut idx = offset as isize;
    let mut pos = 0;
    for _ in 0..len {
        f(pos, idx)?;
        for &d in &axes {
            index[d] += 1;
            idx += strides[d];
            pos += pos_strides[d] as usize;
            if index[d] < shape[d] {
                break;
            }
            index[d] = 0;
            idx -= shape[d] as isize * strides[d];
            pos -= shape[d] * pos_strides[d] as usize;
        }
    }
    Ok(())
}

fn fold<T, I>(it: &mut I, shape: &[usize]) -> Vec<Nested<T>>
where
    I: Iterator<Item = T>,
{
    let n = shape[0];
    if shape.len() == 1 {
        it.take(n).map(Nested::Elem).collect()
    } else {
        (0..n).map(|_| Nested::Array(fold(it, &shape[1..]))).collect()
    }
}

fn try_to_nested<T, F>(
    shape: &[usize], strides: &[isize], offset: usize, order: Order, mut f: F,
) -> Result<Vec<Nested<T>>>
where
    F: FnMut(isize) -> Result<T>,
{
    // zero-dimensional and empty layouts give an empty sequence, not a scalar
    if shape.is_empty() || numel(shape) == 0 {
        return Ok(Vec::new());
    }
    let mut flat: Vec<Option<T>> = (0..numel(shape)).map(|_| None).collect();
    walk(shape, strides, offset, order, |pos, idx| {
        flat[pos] = Some(f(idx)?);
        Ok::<_, Error>(())
    })?;
    Ok(fold(&mut flat.into_iter().flatten(), shape))
}

/// Convert a strided layout over `buffer` to a nested sequence.
///
/// The nesting mirrors `shape`: element `[i][j]...` is
/// `buffer[offset + i * strides[0] + j * strides[1] + ...]`. A
/// zero-dimensional shape and any shape with a zero-length axis give an
/// empty sequence.
///
/// **Panics** if the layout addresses an index outside `buffer`.
///
/// ```
/// use ndarray_base::{nested, to_nested, Nested, Order};
///
/// let buf = [1, 2, 3, 4, 5, 6];
/// let out = to_nested(&buf, &[3, 2], &[-2, 1], 4, Order::RowMajor);
/// assert_eq!(Nested::Array(out), nested!([[5, 6], [3, 4], [1, 2]]));
/// ```
pub fn to_nested<T: Clone>(
    buffer: &[T], shape: &[usize], strides: &[isize], offset: usize, order: Order,
) -> Vec<Nested<T>> {
    let res = try_to_nested(shape, strides, offset, order, |idx| {
        usize::try_from(idx)
            .ok()
            .and_then(|i| buffer.get(i))
            .cloned()
            .ok_or(Error::IndexOutOfBounds {
                index: idx,
                max: buffer.len().wrapping_sub(1),
            })
    });
    match res {
        Ok(out) => out,
        Err(e) => panic!("ndarray: layout does not fit buffer: {}", e),
    }
}

fn flatten<'a, T>(nested: &'a [Nested<T>], shape: &[usize], dim: usize, out: &mut Vec<&'a T>) -> Result<()> {
    let mismatch = |dim| Error::IncompatibleShape {
        shape: shape.to_vec(),
        dim,
    };
    if nested.len() != shape[dim] {
        return Err(mismatch(dim));
    }
    let innermost = dim + 1 == shape.len();
    for item in nested {
        match item {
            Nested::Elem(x) if innermost => out.push(x),
            Nested::Array(v) if !innermost => flatten(v, shape, dim + 1, out)?,
            _ => return Err(mismatch(dim + 1)),
        }
    }
    Ok(())
}

/// Write a nested sequence into `buffer` through a strided layout; the
/// inverse of [`to_nested`].
///
/// A zero-dimensional or empty layout accepts only an empty sequence.
/// **Errors** with `IncompatibleShape` if `nested` does not match `shape`,
/// and with `IndexOutOfBounds` if the layout does not fit `buffer`; in
/// either case `buffer` is left unchanged.
pub fn from_nested<T: Clone>(
    nested: &[Nested<T>], buffer: &mut [T], shape: &[usize], strides: &[isize], offset: usize, order: Order,
) -> Result<()> {
    if shape.is_empty() || numel(shape) == 0 {
        if nested.is_empty() {
            return Ok(());
        }
        return Err(Error::IncompatibleShape {
            shape: shape.to_vec(),
            dim: 0,
        });
    }
    let mut flat = Vec::with_capacity(numel(shape));
    flatten(nested, shape, 0, &mut flat)?;

    let len = buffer.len();
    let mut targets = Vec::with_capacity(flat.len());
    walk(shape, strides, offset, order, |pos, idx| match usize::try_from(idx) {
        Ok(i) if i < len => {
            targets.push((i, pos));
            Ok(())
        }
        _ => Err(Error::IndexOutOfBounds {
            index: idx,
            max: len.wrapping_sub(1),
        }),
    })?;
    for (i, pos) in targets {
        buffer[i] = flat[pos].clone();
    }
    Ok(())
}

impl StridedView {
    /// Convert the view to a nested sequence of its elements.
    ///
    /// See [`to_nested`] for the conventions; **errors** with
    /// `IndexOutOfBounds` if the view's layout does not fit its buffer.
    ///
    /// ```
    /// use ndarray_base::{nested, Buffer, Nested, Order, Scalar, StridedView};
    ///
    /// let x = StridedView::from_buffer(Buffer::from(vec![1i16, 2, 3, 4]), vec![2, 2], Order::ColumnMajor);
    /// let out = x.to_nested().unwrap();
    /// assert_eq!(
    ///     Nested::Array(out),
    ///     nested!([[(Scalar::Int16(1)), (Scalar::Int16(3))], [(Scalar::Int16(2)), (Scalar::Int16(4))]])
    /// );
    /// ```
    pub fn to_nested(&self) -> Result<Vec<Nested<Scalar>>> {
        let data = self.data().read();
        try_to_nested(self.shape(), self.strides(), self.offset(), self.order(), |idx| {
            usize::try_from(idx)
                .ok()
                .and_then(|i| data.get(i))
                .ok_or(Error::IndexOutOfBounds {
                    index: idx,
                    max: data.len().wrapping_sub(1),
                })
        })
    }
}
