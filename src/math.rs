use noisy_float::prelude::*;
use num_traits::Float;

/// Propagates the standard deviation of `denominator` into the ratio `numerator / denominator`.
///
/// First-order propagation: the relative error of the ratio equals the relative error of the
/// denominator.
pub fn ratio_std<T>(numerator: T, denominator: T, denominator_std: T) -> T
where
    T: Float,
{
    if denominator <= T::zero() {
        return T::zero();
    }
    (numerator / denominator) * (denominator_std / denominator)
}

/// Returns the highest finite value, if any.
pub fn peak<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .map(r64)
        .max()
        .map(|v| v.raw())
}

/// The largest power of two not above `x`, for positive `x`.
pub fn pow2_floor<T>(x: T) -> T
where
    T: Float,
{
    T::from(2.0).map_or(x, |two| two.powf(x.log2().floor()))
}

/// The smallest power of two not below `x`, for positive `x`.
pub fn pow2_ceil<T>(x: T) -> T
where
    T: Float,
{
    T::from(2.0).map_or(x, |two| two.powf(x.log2().ceil()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ratio_std_keeps_relative_error() {
        // 100 flops over 50 ± 5 cycles: 2 ± 0.2 flops/cycle
        assert!((ratio_std(100f64, 50f64, 5f64) - 0.2).abs() < 1e-12);
        assert_eq!(ratio_std(100f32, 0f32, 5f32), 0f32);
    }

    #[test]
    fn peak_ignores_non_finite_values() {
        assert_eq!(peak(vec![1.0, std::f64::NAN, 3.5, std::f64::INFINITY]), Some(3.5));
        assert_eq!(peak(Vec::new()), None);
    }

    #[test]
    fn powers_of_two_bracket_values() {
        assert_eq!(pow2_floor(0.3f64), 0.25);
        assert_eq!(pow2_ceil(0.3f64), 0.5);
        assert_eq!(pow2_ceil(32f64), 32.0);
        assert_eq!(pow2_floor(33f64), 32.0);
    }
}
