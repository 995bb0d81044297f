// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The binary metadata record.
//!
//! A record describes an array's layout so that it can be handed across a
//! boundary (for example to native code) without the array itself. All
//! multi-byte fields are in host byte order; the leading flag byte says
//! which one that was.
//!
//! | field | size |
//! |---|---|
//! | byte order flag (1 little, 0 big) | 1 |
//! | dtype code, `i16` | 2 |
//! | number of dimensions `N`, `i64` | 8 |
//! | shape, `i64` each | 8N |
//! | strides in bytes, `i64` each | 8N |
//! | offset in bytes, `i64` | 8 |
//! | order code, `i8` | 1 |
//! | index mode code, `i8` | 1 |
//! | number of submodes `M`, `i64` | 8 |
//! | submode codes, `i8` each | M |
use std::io::{self, Cursor, Write};

use byteorder::{BigEndian, ByteOrder, LittleEndian, NativeEndian, ReadBytesExt, WriteBytesExt};

use crate::dtype::DType;
use crate::error::{malformed, Result};
use crate::index_mode::IndexMode;
use crate::order::Order;
use crate::view::NdarrayLike;

/// Size of the record without shape, strides and submodes.
const FIXED_LEN: usize = 29;

/// A decoded metadata record.
///
/// Strides and offset are in bytes, as on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaData {
    pub dtype: DType,
    pub shape: Vec<usize>,
    pub strides: Vec<isize>,
    pub offset: usize,
    pub order: Order,
    pub mode: IndexMode,
    pub submode: Vec<IndexMode>,
}

impl MetaData {
    /// Describe `x`.
    ///
    /// Element strides and offset are scaled by the dtype's byte width,
    /// which is 0 for `generic`. A missing index mode becomes `throw` and
    /// a missing submode `[mode]`.
    pub fn from_view<V: NdarrayLike + ?Sized>(x: &V) -> MetaData {
        let nbytes = x.dtype().byte_size().unwrap_or(0);
        let mode = x.mode().unwrap_or(IndexMode::Throw);
        let submode = match x.submode() {
            Some(sm) if !sm.is_empty() => sm.to_vec(),
            _ => vec![mode],
        };
        let ndim = x.ndim();
        MetaData {
            dtype: x.dtype(),
            shape: x.shape().to_vec(),
            strides: x.strides()[..ndim].iter().map(|&s| s * nbytes as isize).collect(),
            offset: x.offset() * nbytes,
            order: x.order(),
            mode,
            submode,
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Length in bytes of the encoded record.
    pub fn encoded_len(&self) -> usize {
        FIXED_LEN + 16 * self.shape.len() + self.submode.len()
    }

    /// Encode the record.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out).expect("writing to a Vec cannot fail");
        out
    }

    /// Encode the record into `w`.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        w.write_i8(cfg!(target_endian = "little") as i8)?;
        w.write_i16::<NativeEndian>(self.dtype.code())?;
        w.write_i64::<NativeEndian>(self.shape.len() as i64)?;
        for &d in &self.shape {
            w.write_i64::<NativeEndian>(d as i64)?;
        }
        for &s in &self.strides {
            w.write_i64::<NativeEndian>(s as i64)?;
        }
        w.write_i64::<NativeEndian>(self.offset as i64)?;
        w.write_i8(self.order.code())?;
        w.write_i8(self.mode.code())?;
        w.write_i64::<NativeEndian>(self.submode.len() as i64)?;
        for m in &self.submode {
            w.write_i8(m.code())?;
        }
        Ok(())
    }
}

/// Serialize the metadata of `x` into a binary record.
///
/// If `x` provides its own record through
/// [`NdarrayLike::meta_data_record`], that record is returned unchanged.
///
/// ```
/// use ndarray_base::{deserialize_meta_data, serialize_meta_data, Buffer, Order, StridedView};
///
/// let x = StridedView::from_buffer(Buffer::from(vec![0f64; 6]), vec![3, 2], Order::RowMajor);
/// let bytes = serialize_meta_data(&x);
/// assert_eq!(bytes.len(), 29 + 16 * 2 + 1);
/// let meta = deserialize_meta_data(&bytes).unwrap();
/// assert_eq!(meta.strides, vec![16, 8]);
/// ```
pub fn serialize_meta_data<V: NdarrayLike + ?Sized>(x: &V) -> Vec<u8> {
    if let Some(record) = x.meta_data_record() {
        log::debug!("using the array's own metadata record ({} bytes)", record.len());
        return record;
    }
    let meta = MetaData::from_view(x);
    log::debug!("serializing metadata of a {:?} array with shape {:?}", meta.dtype, meta.shape);
    meta.to_bytes()
}

/// Decode a binary metadata record.
///
/// The byte order of the record is taken from its flag byte.
///
/// **Errors** with `MalformedRecord` if the record is shorter than its
/// fixed part, its flag, dtype, order or mode codes are unknown, a count
/// or extent is negative, or its declared length differs from the number
/// of bytes given.
pub fn deserialize_meta_data(bytes: &[u8]) -> Result<MetaData> {
    if bytes.len() < FIXED_LEN {
        return Err(malformed(format!(
            "record has {} bytes, at least {} are required",
            bytes.len(),
            FIXED_LEN
        )));
    }
    let meta = match bytes[0] {
        1 => decode::<LittleEndian>(bytes),
        0 => decode::<BigEndian>(bytes),
        flag => Err(malformed(format!("unknown byte order flag {}", flag))),
    }?;
    log::debug!("deserialized metadata of a {:?} array with shape {:?}", meta.dtype, meta.shape);
    Ok(meta)
}

fn decode<B: ByteOrder>(bytes: &[u8]) -> Result<MetaData> {
    // Reads below are bounds checked against the declared lengths first,
    // so any io error means the record lied about its size.
    let truncated = |_: io::Error| malformed("record is truncated");
    let mut rdr = Cursor::new(&bytes[1..]);

    let code = rdr.read_i16::<B>().map_err(truncated)?;
    let dtype = DType::from_code(code).ok_or_else(|| malformed(format!("unknown dtype code {}", code)))?;

    let ndim = rdr.read_i64::<B>().map_err(truncated)?;
    let ndim = usize::try_from(ndim).map_err(|_| malformed(format!("negative number of dimensions {}", ndim)))?;
    let prefix = ndim
        .checked_mul(16)
        .and_then(|n| n.checked_add(FIXED_LEN))
        .filter(|&n| n <= bytes.len())
        .ok_or_else(|| {
            malformed(format!(
                "record of {} bytes cannot hold {} dimensions",
                bytes.len(),
                ndim
            ))
        })?;

    let mut shape = Vec::with_capacity(ndim);
    for _ in 0..ndim {
        let d = rdr.read_i64::<B>().map_err(truncated)?;
        shape.push(usize::try_from(d).map_err(|_| malformed(format!("negative dimension {}", d)))?);
    }
    let mut strides = Vec::with_capacity(ndim);
    for _ in 0..ndim {
        let s = rdr.read_i64::<B>().map_err(truncated)?;
        strides.push(isize::try_from(s).map_err(|_| malformed(format!("stride {} out of range", s)))?);
    }
    let offset = rdr.read_i64::<B>().map_err(truncated)?;
    let offset = usize::try_from(offset).map_err(|_| malformed(format!("negative offset {}", offset)))?;

    let code = rdr.read_i8().map_err(truncated)?;
    let order = Order::from_code(code).ok_or_else(|| malformed(format!("unknown order code {}", code)))?;
    let code = rdr.read_i8().map_err(truncated)?;
    let mode = IndexMode::from_code(code).ok_or_else(|| malformed(format!("unknown index mode code {}", code)))?;

    let nsub = rdr.read_i64::<B>().map_err(truncated)?;
    let nsub = usize::try_from(nsub).map_err(|_| malformed(format!("negative number of submodes {}", nsub)))?;
    let total = prefix.checked_add(nsub);
    if total != Some(bytes.len()) {
        return Err(malformed(format!(
            "record declares {} dimensions and {} submodes but has {} bytes",
            ndim,
            nsub,
            bytes.len()
        )));
    }
    let mut submode = Vec::with_capacity(nsub);
    for _ in 0..nsub {
        let code = rdr.read_i8().map_err(truncated)?;
        submode.push(IndexMode::from_code(code).ok_or_else(|| malformed(format!("unknown submode code {}", code)))?);
    }

    Ok(MetaData {
        dtype,
        shape,
        strides,
        offset,
        order,
        mode,
        submode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn meta() -> MetaData {
        MetaData {
            dtype: DType::Int16,
            shape: vec![3, 2],
            strides: vec![-4, 2],
            offset: 8,
            order: Order::RowMajor,
            mode: IndexMode::Clamp,
            submode: vec![IndexMode::Wrap, IndexMode::Throw],
        }
    }

    #[test]
    fn layout_of_fields() {
        let bytes = meta().to_bytes();
        assert_eq!(bytes.len(), 29 + 32 + 2);
        assert_eq!(bytes[0], cfg!(target_endian = "little") as u8);
        assert_eq!(NativeEndian::read_i16(&bytes[1..3]), 4);
        assert_eq!(NativeEndian::read_i64(&bytes[3..11]), 2);
        assert_eq!(NativeEndian::read_i64(&bytes[27..35]), -4);
        assert_eq!(NativeEndian::read_i64(&bytes[43..51]), 8);
        assert_eq!(bytes[51], 1);
        assert_eq!(bytes[52], 2);
        assert_eq!(NativeEndian::read_i64(&bytes[53..61]), 2);
        assert_eq!(&bytes[61..], &[3, 1]);
    }

    #[test]
    fn foreign_byte_order() {
        let m = meta();
        let mut bytes = vec![0u8];
        bytes.write_i16::<BigEndian>(m.dtype.code()).unwrap();
        bytes.write_i64::<BigEndian>(2).unwrap();
        for v in [3i64, 2, -4, 2, 8] {
            bytes.write_i64::<BigEndian>(v).unwrap();
        }
        bytes.extend_from_slice(&[1, 2]);
        bytes.write_i64::<BigEndian>(2).unwrap();
        bytes.extend_from_slice(&[3, 1]);
        assert_eq!(deserialize_meta_data(&bytes).unwrap(), m);
    }

    #[test]
    fn rejects_bad_records() {
        let good = meta().to_bytes();
        let kind = |b: &[u8]| deserialize_meta_data(b).unwrap_err().kind();

        assert_eq!(kind(&good[..28]), ErrorKind::MalformedRecord);
        assert_eq!(kind(&good[..good.len() - 1]), ErrorKind::MalformedRecord);

        let mut longer = good.clone();
        longer.push(1);
        assert_eq!(kind(&longer), ErrorKind::MalformedRecord);

        let mut flag = good.clone();
        flag[0] = 7;
        assert_eq!(kind(&flag), ErrorKind::MalformedRecord);

        let mut dtype = good.clone();
        NativeEndian::write_i16(&mut dtype[1..3], 99);
        assert_eq!(kind(&dtype), ErrorKind::MalformedRecord);

        let mut ndim = good.clone();
        NativeEndian::write_i64(&mut ndim[3..11], -1);
        assert_eq!(kind(&ndim), ErrorKind::MalformedRecord);

        let mut huge = good.clone();
        NativeEndian::write_i64(&mut huge[3..11], i64::MAX);
        assert_eq!(kind(&huge), ErrorKind::MalformedRecord);

        let mut nsub = good;
        NativeEndian::write_i64(&mut nsub[53..61], -2);
        assert_eq!(kind(&nsub), ErrorKind::MalformedRecord);
    }

    #[test]
    fn generic_has_zero_byte_strides() {
        let x = crate::view::StridedView::from_buffer(
            crate::buffer::Buffer::from(vec![crate::scalar::Scalar::Null; 4]),
            vec![2, 2],
            Order::ColumnMajor,
        );
        let m = MetaData::from_view(&x);
        assert_eq!(m.strides, vec![0, 0]);
        assert_eq!(m.offset, 0);
        assert_eq!(m.order, Order::ColumnMajor);
        assert_eq!(m.submode, vec![IndexMode::Throw]);
    }
}
