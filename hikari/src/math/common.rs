/// Tolerance used for float comparisons and for nudging secondary ray origins off surfaces.
pub const EPSILON: f64 = 1e-5;

/// Checks if `a` and `b` are within [`EPSILON`] of each other.
#[inline]
pub fn float_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}
