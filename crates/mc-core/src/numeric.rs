/// Floating point type used for condition values.
pub type Real = f64;

/// How close two generated condition values must be to count as the same
/// point on a path. `abs` covers values near zero (e.g. a chemical potential
/// of 0), `rel` covers large ones (e.g. temperatures in kelvin).
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

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}
