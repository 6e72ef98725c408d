use num_traits::Float;

/// Linear interpolation from `a` towards `b` by `t`.
#[inline]
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Exponential moving average step: `weight` of `observed`, the rest of `prior`.
#[inline]
pub fn ema<T: Float>(observed: T, prior: T, weight: T) -> T {
    weight * observed + (T::one() - weight) * prior
}
