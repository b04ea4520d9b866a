use crate::{RcError, RcResult};

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute and relative tolerance pair for float comparisons.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// `true` when `a` and `b` agree within `tol.abs` or within `tol.rel` of the
/// larger magnitude.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> RcResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RcError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> RcResult<Real> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(RcError::InvalidArg { what })
    }
}

/// Straight-line interpolation through `(x0, y0)` and `(x1, y1)`.
///
/// Returns `y0` when the two abscissae are closer than `1e-6`, so coincident
/// samples never divide by zero.
pub fn lerp(x: Real, x0: Real, x1: Real, y0: Real, y1: Real) -> Real {
    if (x1 - x0).abs() < 1e-6 {
        return y0;
    }
    y0 + (x - x0) / (x1 - x0) * (y1 - y0)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn lerp_stays_within_endpoints(
            x0 in -1.0e6_f64..1.0e6,
            span in 1.0_f64..1.0e6,
            t in 0.0_f64..=1.0,
            y0 in -1.0e3_f64..1.0e3,
            y1 in -1.0e3_f64..1.0e3,
        ) {
            let x1 = x0 + span;
            let y = lerp(x0 + t * span, x0, x1, y0, y1);
            let tol = 1e-9 * (1.0 + y0.abs().max(y1.abs()));
            prop_assert!(y >= y0.min(y1) - tol && y <= y0.max(y1) + tol);
        }
    }
}
