use {
    anyhow::Result,
    ndarray::{Array3, ArrayView3, ShapeBuilder},
};

/// Builds an `(x, y, z)` array stored with the first index varying fastest.
pub fn arr3_from_fn<F: FnMut((usize, usize, usize)) -> f64>(
    x: usize,
    y: usize,
    z: usize,
    f: F,
) -> Array3<f64> {
    Array3::from_shape_fn((x, y, z).f(), f)
}

/// Views a flat, first-index-fastest buffer as an `(x, y, z)` array.
pub fn view3d<T>(xs: &[T], x: usize, y: usize, z: usize) -> Result<ArrayView3<T>> {
    Ok(ArrayView3::from_shape((x, y, z).strides((1, x, x * y)), xs)?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn first_index_fastest() {
        let a = arr3_from_fn(3, 2, 2, |(i, j, k)| (i + 10 * j + 100 * k) as f64);

        assert_eq!(
            a.as_slice_memory_order().unwrap(),
            &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0, 100.0, 101.0, 102.0, 110.0, 111.0, 112.0]
        );
    }

    #[test]
    fn view_round_trips_memory_order() {
        let a = arr3_from_fn(4, 2, 3, |(i, j, k)| (i * j + k) as f64);
        let v = view3d(a.as_slice_memory_order().unwrap(), 4, 2, 3).unwrap();

        assert_eq!(v, a.view());
    }

    #[test]
    fn view_rejects_short_buffer() {
        assert!(view3d(&[0.0; 5], 3, 2, 1).is_err());
    }
}
