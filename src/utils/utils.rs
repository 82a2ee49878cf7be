//! Helper functions over plain `f64` arrays.
//!
//! `pnorm` and `threshold` modify the caller's buffer in place and hand the same buffer
//! back, so they can be chained.

use tracing::debug;
use crate::math_error::{MathError, MathResult};

/// Checks if all elements in the array are finite
pub fn is_valid(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// Squared Euclidean distance. Both arrays must have the same length.
pub fn distance2(a: &[f64], b: &[f64]) -> MathResult<f64> {
    if a.len() != b.len() {
        return Err(MathError::DimensionMismatch { expected: a.len(), found: b.len() });
    }
    Ok(a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum())
}

/// Euclidean distance. Both arrays must have the same length.
pub fn distance(a: &[f64], b: &[f64]) -> MathResult<f64> {
    Ok(distance2(a, b)?.sqrt())
}

/// Minkowski normalization: divides every element by `(sum |x|^power)^(1/power)`.
/// With `power = 2` this is ordinary Euclidean normalization. An all-zero array is left
/// as it is.
pub fn pnorm(array: &mut [f64], power: f64) -> &mut [f64] {
    let magnitude: f64 = array.iter().map(|x| x.abs().powf(power)).sum();
    if magnitude == 0.0 {
        debug!(len = array.len(), "pnorm of zero array, left unchanged");
        return array;
    }
    let magnitude = magnitude.powf(1.0 / power);
    for x in array.iter_mut() {
        *x /= magnitude;
    }
    array
}

/// Replaces with zero every element whose absolute value is below `min_value`. Elements
/// exactly at the threshold are kept.
pub fn threshold(array: &mut [f64], min_value: f64) -> &mut [f64] {
    for x in array.iter_mut() {
        if x.abs() < min_value {
            *x = 0.0;
        }
    }
    array
}

/// Plain sum. Results may differ in the last bits depending on the element order.
pub fn sum(array: &[f64]) -> f64 {
    array.iter().sum()
}

/// New array with every element negated.
pub fn flip(array: &[f64]) -> Vec<f64> {
    array.iter().map(|x| -x).collect()
}
