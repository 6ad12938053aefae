//! Pure numeric kernels behind each formula family.
//!
//! Every kernel returns 0 for an empty input or a zero weight sum instead of
//! failing; callers check completeness before evaluating.

/// Floor applied to geometric-mean bases so zero or negative scores cannot collapse the product
pub const GEOMETRIC_EPSILON: f64 = 1e-9;

fn weight_sum(weights: &[f64]) -> f64 {
    weights.iter().sum()
}

/// Weighted geometric mean: `prod(max(v, eps) ^ (w / sum(w)))`
pub fn geometric_mean(values: &[f64], weights: &[f64]) -> f64 {
    let total = weight_sum(weights);
    if values.is_empty() || total == 0.0 {
        return 0.0;
    }
    values
        .iter()
        .zip(weights)
        .map(|(&v, &w)| v.max(GEOMETRIC_EPSILON).powf(w / total))
        .product()
}

/// Weighted geometric mean raised again to `1/n`
pub fn normalized_geometric_mean(values: &[f64], weights: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    geometric_mean(values, weights).powf(1.0 / n as f64)
}

/// Classic Thieler & Hammar-Klose CVI: `sqrt(prod(v) / n)`, unweighted.
///
/// Not bounded by the input scale: six 5s give `sqrt(15625 / 6)`.
pub fn traditional_cvi(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let product: f64 = values.iter().product();
    (product / values.len() as f64).sqrt()
}

/// `sum(v * w) / sum(w)`
pub fn arithmetic_mean(values: &[f64], weights: &[f64]) -> f64 {
    let total = weight_sum(weights);
    if values.is_empty() || total == 0.0 {
        return 0.0;
    }
    values.iter().zip(weights).map(|(v, w)| v * w).sum::<f64>() / total
}

/// Unweighted mean
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// `sum(v)`
pub fn additive(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Root mean square: `sqrt(sum(v^2 * w) / sum(w))`
pub fn nonlinear_power(values: &[f64], weights: &[f64]) -> f64 {
    let total = weight_sum(weights);
    if values.is_empty() || total == 0.0 {
        return 0.0;
    }
    let squares: f64 = values.iter().zip(weights).map(|(v, w)| v * v * w).sum();
    (squares / total).sqrt()
}

/// `sum(v * w)`, weights taken as given
pub fn weighted_sum(values: &[f64], weights: &[f64]) -> f64 {
    values.iter().zip(weights).map(|(v, w)| v * w).sum()
}

/// Map a 1–5 ordinal score onto 0–1
pub fn remap_to_unit(score: f64) -> f64 {
    (score - 1.0) / 4.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometric_mean_equal_weights() {
        let values = [2.0, 3.0, 4.0, 5.0];
        let weights = [0.25; 4];
        let expected = (2.0_f64 * 3.0 * 4.0 * 5.0).powf(0.25);
        let gm = geometric_mean(&values, &weights);
        assert!((gm - expected).abs() < 1e-12, "got {gm}, expected {expected}");
    }

    #[test]
    fn test_geometric_mean_weights_need_not_sum_to_one() {
        let a = geometric_mean(&[2.0, 8.0], &[1.0, 1.0]);
        let b = geometric_mean(&[2.0, 8.0], &[0.5, 0.5]);
        assert!((a - 4.0).abs() < 1e-12);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_geometric_mean_zero_is_floored() {
        let gm = geometric_mean(&[0.0, 4.0], &[0.5, 0.5]);
        assert!(gm > 0.0 && gm.is_finite());
        let negative = geometric_mean(&[-3.0, 4.0], &[0.5, 0.5]);
        assert!(negative.is_finite() && negative > 0.0);
    }

    #[test]
    fn test_guards_return_zero() {
        assert_eq!(geometric_mean(&[], &[]), 0.0);
        assert_eq!(geometric_mean(&[3.0], &[0.0]), 0.0);
        assert_eq!(arithmetic_mean(&[3.0, 4.0], &[0.0, 0.0]), 0.0);
        assert_eq!(nonlinear_power(&[], &[]), 0.0);
        assert_eq!(normalized_geometric_mean(&[], &[]), 0.0);
        assert_eq!(traditional_cvi(&[]), 0.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_traditional_cvi_bounds() {
        assert!((traditional_cvi(&[1.0; 6]) - (1.0_f64 / 6.0).sqrt()).abs() < 1e-12);
        let worked = traditional_cvi(&[3.0, 2.0, 4.0, 4.0, 3.0, 2.0]);
        assert!((worked - 96.0_f64.sqrt()).abs() < 1e-12, "got {worked}");
    }

    #[test]
    fn test_arithmetic_mean_single_value() {
        for w in [0.1, 1.0, 7.5] {
            assert!((arithmetic_mean(&[3.7], &[w]) - 3.7).abs() < 1e-12);
        }
    }

    #[test]
    fn test_nonlinear_power_constant_input() {
        let v = nonlinear_power(&[3.0, 3.0, 3.0], &[0.2, 0.3, 0.5]);
        assert!((v - 3.0).abs() < 1e-12);
        let rms = nonlinear_power(&[1.0, 5.0], &[1.0, 1.0]);
        assert!((rms - 13.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_geometric_mean_flattens() {
        let values = [4.0, 4.0];
        let weights = [0.5, 0.5];
        let plain = geometric_mean(&values, &weights);
        let flat = normalized_geometric_mean(&values, &weights);
        assert!((plain - 4.0).abs() < 1e-12);
        assert!((flat - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_additive_and_weighted_sum() {
        assert_eq!(additive(&[1.0, 2.0, 3.0]), 6.0);
        assert!((weighted_sum(&[2.0, 4.0], &[0.25, 0.75]) - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_remap_to_unit() {
        assert_eq!(remap_to_unit(1.0), 0.0);
        assert_eq!(remap_to_unit(3.0), 0.5);
        assert_eq!(remap_to_unit(5.0), 1.0);
    }
}
