use crate::error::{Error, Result};

/// Calculate the common shape that all `shapes` can be broadcast to.
///
/// Shapes are aligned at their trailing axes; along each axis the lengths
/// must agree or be 1 (a length-0 axis broadcasts against 1). Return an
/// error naming the first incompatible axis of the output otherwise.
///
/// ```
/// use ndarray_base::broadcast_shapes;
///
/// let out = broadcast_shapes(&[&[8, 1, 6, 1], &[7, 1, 5]]).unwrap();
/// assert_eq!(out, vec![8, 7, 6, 5]);
/// ```
pub fn broadcast_shapes(shapes: &[&[usize]]) -> Result<Vec<usize>> {
    let ndim = shapes.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut out = vec![1; ndim];
    for shape in shapes {
        let k = ndim - shape.len();
        for (i, &d) in shape.iter().enumerate() {
            let o = &mut out[k + i];
            if *o == d || d == 1 {
                continue;
            }
            if *o == 1 {
                *o = d;
            } else {
                return Err(Error::BroadcastIncompatible {
                    shape: shape.to_vec(),
                    target: out.clone(),
                    dim: k + i,
                });
            }
        }
    }
    Ok(out)
}
