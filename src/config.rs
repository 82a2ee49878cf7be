//! Tolerance and strictness settings.
//!
//! The free functions in this crate keep their lenient behavior: malformed rows become zero
//! rows, a cross product of non 3-vectors is zero. `MathConfig` bundles the same entry
//! points with an explicit tolerance and an optional strict mode where these inputs are
//! reported as errors.

use nalgebra::{DMatrix, DVector};
use crate::geometry::{cross_product3, try_cross_product3};
use crate::linalg::{matrix_equals_eps, parse_matrix, parse_matrix_strict, vector_equals_eps, DEFAULT_EPSILON};
use crate::math_error::MathResult;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MathConfig {
    /// Entries closer than this are considered equal.
    pub epsilon: f64,
    /// Report degenerate input as errors instead of substituting a fallback value.
    pub strict: bool,
}

impl Default for MathConfig {
    fn default() -> Self {
        MathConfig { epsilon: DEFAULT_EPSILON, strict: false }
    }
}

impl MathConfig {
    /// Default tolerance with strict mode on.
    pub fn strict() -> Self {
        MathConfig { strict: true, ..Default::default() }
    }

    pub fn with_epsilon(epsilon: f64) -> Self {
        MathConfig { epsilon, ..Default::default() }
    }

    pub fn matrix_equals(&self, a: &DMatrix<f64>, b: &DMatrix<f64>) -> bool {
        matrix_equals_eps(a, b, self.epsilon)
    }

    pub fn vector_equals(&self, a: &DVector<f64>, b: &DVector<f64>) -> bool {
        vector_equals_eps(a, b, self.epsilon)
    }

    /// Parses a MATLAB-style matrix literal. Never fails unless strict.
    pub fn parse_matrix(&self, text: &str) -> MathResult<DMatrix<f64>> {
        if self.strict {
            parse_matrix_strict(text)
        } else {
            Ok(parse_matrix(text))
        }
    }

    /// Cross product. Never fails unless strict.
    pub fn cross_product3(&self, a: &DVector<f64>, b: &DVector<f64>) -> MathResult<DVector<f64>> {
        if self.strict {
            try_cross_product3(a, b)
        } else {
            Ok(cross_product3(a, b))
        }
    }
}
