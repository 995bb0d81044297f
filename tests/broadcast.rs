use ndarray_base::{
    broadcast_array, broadcast_shapes, prepend_singleton_dimensions, zeros, Buffer, DType, Error, ErrorKind,
    NdarrayLike, Nested, Order, StridedView,
};
use quickcheck::quickcheck;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn arange(shape: &[usize]) -> StridedView {
    let n = shape.iter().product::<usize>();
    let data: Vec<f64> = (0..n).map(|x| x as f64).collect();
    StridedView::from_buffer(Buffer::from(data), shape.to_vec(), Order::RowMajor)
}

#[test]
fn broadcast_1() {
    init_logger();
    let c = arange(&[2, 1]);
    assert!(broadcast_array(&c, &[1]).is_err());
    assert!(broadcast_array(&c, &[]).is_err());
    assert!(broadcast_array(&c, &[2, 1]).is_ok());
    assert!(broadcast_array(&c, &[2, 2]).is_ok());
    assert!(broadcast_array(&c, &[32, 2, 1]).is_ok());
    assert!(broadcast_array(&c, &[32, 1, 2]).is_err());

    /* 0-d can be broadcast to anything */
    let z = zeros(DType::Float32, &[], Order::RowMajor).unwrap();
    assert!(broadcast_array(&z, &[]).is_ok());
    assert!(broadcast_array(&z, &[1]).is_ok());
    assert!(broadcast_array(&z, &[3]).is_ok());
    assert!(broadcast_array(&z, &[7, 2, 9]).is_ok());
}

#[test]
fn broadcast_errors() {
    init_logger();
    let x = arange(&[2, 3]);
    let err = broadcast_array(&x, &[3]).unwrap_err();
    assert_eq!(err, Error::Dimension { source_ndims: 2, target_ndims: 1 });

    let err = broadcast_array(&x, &[5, 4, 3]).unwrap_err();
    assert_eq!(
        err,
        Error::BroadcastIncompatible {
            shape: vec![2, 3],
            target: vec![5, 4, 3],
            dim: 1,
        }
    );
    assert!(err.to_string().contains("Dimension: 1"));
}

#[test]
fn broadcast_shares_buffer() {
    init_logger();
    let x = arange(&[3, 1]);
    let y = broadcast_array(&x, &[2, 3, 4]).unwrap();
    assert!(y.shares_buffer(&x));
    assert!(y.is_read_only());
    assert!(y.is_broadcast());
    assert_eq!(y.strides(), &[0, 1, 0]);
    assert_eq!(y.offset(), x.offset());
    for k in 0..4 {
        assert_eq!(y.get(&[1, 2, k]).unwrap(), x.get(&[2, 0]).unwrap());
    }
}

#[test]
fn broadcast_negative_strides() {
    let buf = Buffer::from(vec![1i32, 2, 3]).into_shared();
    let x = StridedView::new(
        DType::Int32,
        buf,
        vec![3],
        vec![-1],
        2,
        Order::RowMajor,
        Default::default(),
    );
    let y = broadcast_array(&x, &[2, 3]).unwrap();
    assert_eq!(y.strides(), &[0, -1]);
    assert_eq!(y.offset(), 2);
    let row = x.to_nested().unwrap();
    assert_eq!(y.to_nested().unwrap(), vec![Nested::Array(row.clone()), Nested::Array(row)]);
}

#[test]
fn prepend_then_broadcast() {
    let x = arange(&[4]);
    let y = prepend_singleton_dimensions(&x, 2);
    assert_eq!(y.shape(), &[1, 1, 4]);
    assert_eq!(y.strides(), &[1, 1, 1]);
    assert!(!y.is_read_only());
    let z = broadcast_array(&y, &[3, 2, 4]).unwrap();
    assert_eq!(z.strides(), &[0, 0, 1]);
}

#[test]
fn co_broadcast_matches_broadcast_array() {
    let a = arange(&[4, 1, 3]);
    let b = arange(&[5, 1]);
    let shape = broadcast_shapes(&[a.shape(), b.shape()]).unwrap();
    assert_eq!(shape, vec![4, 5, 3]);
    assert!(broadcast_array(&a, &shape).is_ok());
    assert!(broadcast_array(&b, &shape).is_ok());
    let err = broadcast_shapes(&[&[2, 3], &[3, 2]]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BroadcastIncompatible);
}

quickcheck! {
    // A successful broadcast has exactly the target shape and keeps the
    // stride of every source axis longer than one.
    fn broadcast_keeps_strides(src: Vec<u8>, extra: Vec<u8>, grow: Vec<bool>) -> bool {
        let src: Vec<usize> = src.iter().take(4).map(|&d| (d % 4) as usize).collect();
        let x = arange(&src);
        let mut target: Vec<usize> = extra.iter().take(2).map(|&d| (d % 3) as usize).collect();
        for (i, &d) in src.iter().enumerate() {
            let g = grow.get(i).copied().unwrap_or(false);
            target.push(if d == 1 && g { 3 } else { d });
        }
        let k = target.len() - src.len();
        match broadcast_array(&x, &target) {
            Ok(y) => {
                y.shape() == &target[..]
                    && src.iter().enumerate().all(|(i, &d)| d == 1 || y.strides()[k + i] == x.strides()[i])
                    && y.strides()[..k].iter().all(|&s| s == 0)
            }
            Err(_) => false,
        }
    }

    fn broadcast_to_fewer_dims_fails(src: Vec<u8>) -> bool {
        let src: Vec<usize> = src.iter().take(4).map(|&d| (d % 4) as usize + 1).collect();
        if src.is_empty() {
            return true;
        }
        let x = arange(&src);
        let target = &src[1..];
        broadcast_array(&x, target).err().map(|e| e.kind()) == Some(ErrorKind::Dimension)
    }

    fn broadcast_mismatch_fails(d: u8, e: u8) -> bool {
        let d = (d % 5) as usize + 2;
        let e = (e % 5) as usize + 2;
        if d == e {
            return true;
        }
        let x = arange(&[d]);
        broadcast_array(&x, &[2, e]).err().map(|err| err.kind()) == Some(ErrorKind::BroadcastIncompatible)
    }
}
