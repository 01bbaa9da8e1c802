//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Sign of a value, with zero mapping to zero.
///
/// Unlike `Float::signum` this returns `0` for `+0` and `-0`, so that
/// `sign(x) * limit` never turns a zero demand into motion.
pub fn sign<T>(value: T) -> T
where
    T: Float,
{
    if value > T::zero() {
        T::one()
    } else if value < T::zero() {
        -T::one()
    } else {
        T::zero()
    }
}

/// Limit the magnitude of a value to `limit`, preserving its sign.
pub fn limit_magnitude<T>(value: T, limit: T) -> T
where
    T: Float,
{
    sign(value) * value.abs().min(limit.abs())
}

/// Clamp a value into `[min, max]`.
pub fn clamp<T>(value: T, min: T, max: T) -> T
where
    T: Float,
{
    value.max(min).min(max)
}

/// Wrap an angle into the range `(-pi, pi]`.
pub fn wrap_pi<T>(value: T) -> T
where
    T: Float,
{
    let pi = T::from(std::f64::consts::PI).unwrap_or_else(T::zero);
    let tau = pi + pi;

    let mut a = rem_euclid(value + pi, tau) - pi;
    if a <= -pi {
        a = a + tau;
    }
    a
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float,
{
    let r = lhs % rhs;
    if r < T::zero() {
        r + rhs.abs()
    } else {
        r
    }
}
