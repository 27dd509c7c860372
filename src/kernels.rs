//! The fused kernel `a = b * c + d / e - 3.14` over each storage strategy.
//!
//! All inputs must have equal lengths; a mismatch panics on the first
//! out-of-bounds index, like any other shape error in this crate.

use std::ops::{Add, Div, Mul, Sub};

use ndarray::{Array1, Zip};

#[allow(clippy::approx_constant)]
pub const OFFSET: f64 = 3.14;

/// Reference scalar kernel.
#[inline(always)]
pub fn fused(b: f64, c: f64, d: f64, e: f64) -> f64 {
    b * c + d / e - OFFSET
}

/// Indexed loop over plain slices. Used for both the boxed heap buffer and
/// the `Vec` variants.
pub fn fused_slices(a: &mut [f64], b: &[f64], c: &[f64], d: &[f64], e: &[f64]) {
    let n = a.len();
    assert!(
        b.len() == n && c.len() == n && d.len() == n && e.len() == n,
        "fused_slices: operand lengths differ from output length {}",
        n
    );
    for i in 0..n {
        a[i] = b[i] * c[i] + d[i] / e[i] - OFFSET;
    }
}

/// ndarray expression form. Each operator allocates a new array.
pub fn fused_ndarray(
    b: &Array1<f64>,
    c: &Array1<f64>,
    d: &Array1<f64>,
    e: &Array1<f64>,
) -> Array1<f64> {
    b * c + d / e - OFFSET
}

/// ndarray `Zip`, writing in place without temporaries.
pub fn fused_zip(
    a: &mut Array1<f64>,
    b: &Array1<f64>,
    c: &Array1<f64>,
    d: &Array1<f64>,
    e: &Array1<f64>,
) {
    Zip::from(a)
        .and(b)
        .and(c)
        .and(d)
        .and(e)
        .for_each(|a, &b, &c, &d, &e| *a = fused(b, c, d, e));
}

/// Fixed-size arrays; the length is part of the type.
pub fn fused_fixed<const N: usize>(
    a: &mut [f64; N],
    b: &[f64; N],
    c: &[f64; N],
    d: &[f64; N],
    e: &[f64; N],
) {
    for i in 0..N {
        a[i] = fused(b[i], c[i], d[i], e[i]);
    }
}

/// A numeric sequence with element-wise operators that allocate a fresh
/// result for every operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Series(pub Vec<f64>);

impl Series {
    pub fn filled(len: usize, value: f64) -> Self {
        Series(vec![value; len])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

macro_rules! series_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for &Series {
            type Output = Series;

            fn $method(self, rhs: &Series) -> Series {
                assert_eq!(self.0.len(), rhs.0.len(), "Series length mismatch");
                let mut result = vec![0.0; self.0.len()];
                for i in 0..result.len() {
                    result[i] = self.0[i] $op rhs.0[i];
                }
                Series(result)
            }
        }
    };
}

series_op!(Add, add, +);
series_op!(Sub, sub, -);
series_op!(Mul, mul, *);
series_op!(Div, div, /);

/// Operator form: `b * c + d / e - offset`, with `offset` a sequence of 3.14.
pub fn fused_series(b: &Series, c: &Series, d: &Series, e: &Series, offset: &Series) -> Series {
    &(&(b * c) + &(d / e)) - offset
}
