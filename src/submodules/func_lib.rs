use super::type_lib::NumericData;

/// `erf((x + t) / w) - erf((x - t) / w)`: the light-cone window of a free-streaming Gaussian.
pub fn erf_window(x: NumericData, t: NumericData, w: NumericData) -> NumericData {
    libm::erf((x + t) / w) - libm::erf((x - t) / w)
}

/// `exp(-(t + x)^2 / w^2) - exp(-(t - x)^2 / w^2)`
pub fn gaussian_difference(x: NumericData, t: NumericData, w: NumericData) -> NumericData {
    let w2 = w * w;
    (-(t + x) * (t + x) / w2).exp() - (-(t - x) * (t - x) / w2).exp()
}

/// Smallest and largest finite value, or `None` when there is none.
pub fn finite_bounds<'a>(values: impl IntoIterator<Item = &'a NumericData>) -> Option<(NumericData, NumericData)> {
    values
        .into_iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
