//! Explicit-intrinsic version of the fused kernel.
//!
//! On x86_64 with AVX and FMA available at run time, four lanes are processed
//! per step with `b * c + (d / e)` as a single fused multiply-add. The tail,
//! and every other target, goes through the scalar loop.

use crate::kernels::fused_slices;

/// Name of the path `fused` takes on this machine.
pub fn backend() -> &'static str {
    if has_avx_fma() {
        "avx+fma"
    } else {
        "scalar"
    }
}

pub fn fused(a: &mut [f64], b: &[f64], c: &[f64], d: &[f64], e: &[f64]) {
    let n = a.len();
    assert!(
        b.len() == n && c.len() == n && d.len() == n && e.len() == n,
        "simd::fused: operand lengths differ from output length {}",
        n
    );

    #[cfg(target_arch = "x86_64")]
    {
        if has_avx_fma() {
            // SAFETY: the features were detected above and all slices have length n.
            unsafe { x86::fused_avx_fma(a, b, c, d, e) };
            return;
        }
    }

    fused_slices(a, b, c, d, e);
}

#[cfg(target_arch = "x86_64")]
fn has_avx_fma() -> bool {
    is_x86_feature_detected!("avx") && is_x86_feature_detected!("fma")
}

#[cfg(not(target_arch = "x86_64"))]
fn has_avx_fma() -> bool {
    false
}

#[cfg(target_arch = "x86_64")]
mod x86 {
    use std::arch::x86_64::*;

    use crate::kernels::{fused_slices, OFFSET};

    const LANES: usize = 4;

    /// # Safety
    /// The CPU must support AVX and FMA, and every slice must have the
    /// length of `a`.
    #[target_feature(enable = "avx,fma")]
    pub(super) unsafe fn fused_avx_fma(a: &mut [f64], b: &[f64], c: &[f64], d: &[f64], e: &[f64]) {
        let n = a.len();
        let body = n - n % LANES;
        let offset = _mm256_set1_pd(OFFSET);

        let mut i = 0;
        while i < body {
            let vb = _mm256_loadu_pd(b.as_ptr().add(i));
            let vc = _mm256_loadu_pd(c.as_ptr().add(i));
            let vd = _mm256_loadu_pd(d.as_ptr().add(i));
            let ve = _mm256_loadu_pd(e.as_ptr().add(i));

            let quotient = _mm256_div_pd(vd, ve);
            let result = _mm256_sub_pd(_mm256_fmadd_pd(vb, vc, quotient), offset);

            _mm256_storeu_pd(a.as_mut_ptr().add(i), result);
            i += LANES;
        }

        fused_slices(&mut a[body..], &b[body..], &c[body..], &d[body..], &e[body..]);
    }
}
