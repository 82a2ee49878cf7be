//! Eigen-decomposition packaged as one augmented matrix.
//!
//! The decomposition itself is behind the `EigenDecomposition` trait, so another linear
//! algebra backend can be plugged in. `NalgebraEigen` is the default implementation.

use nalgebra::{Complex, DMatrix, DVector, SymmetricEigen};
use tracing::debug;
use crate::linalg::matrix_equals_eps;
use crate::math_error::{MathError, MathResult};
use crate::utils::is_valid;

/// Eigenvalues (possibly complex) and real eigenvectors of a square matrix, one vector per
/// column. A complex conjugate pair occupies two adjacent columns in real block form: the
/// first holds the real part and the second the imaginary part of the eigenvector that
/// belongs to the first eigenvalue of the pair.
#[derive(Debug, Clone)]
pub struct Eigen {
    pub values: Vec<Complex<f64>>,
    pub vectors: DMatrix<f64>,
}

pub trait EigenDecomposition {
    fn decompose(&self, m: &DMatrix<f64>) -> MathResult<Eigen>;
}

/// Decomposition using nalgebra.
///
/// Symmetric matrices go through `SymmetricEigen` and come back sorted by ascending
/// eigenvalue. For other matrices the eigenvalues are taken from the real Schur form, and
/// each eigenvector is the right singular vector of `A - λI` with the smallest singular
/// value. Repeated eigenvalues take the next smallest singular vectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NalgebraEigen;

const SYMMETRY_TOLERANCE: f64 = 1e-12;
const REPEAT_TOLERANCE: f64 = 1e-9;
const MAX_ITERATIONS: usize = 1000;

impl EigenDecomposition for NalgebraEigen {
    fn decompose(&self, m: &DMatrix<f64>) -> MathResult<Eigen> {
        if !m.is_square() {
            return Err(MathError::NotSquare { rows: m.nrows(), cols: m.ncols() });
        }
        if m.nrows() == 0 {
            return Ok(Eigen { values: Vec::new(), vectors: DMatrix::zeros(0, 0) });
        }
        if !is_valid(m.as_slice()) {
            return Err(MathError::DecompositionFailed("matrix contains NaN or infinite entries".to_string()));
        }
        if matrix_equals_eps(m, &m.transpose(), SYMMETRY_TOLERANCE) {
            symmetric(m)
        } else {
            general(m)
        }
    }
}

fn symmetric(m: &DMatrix<f64>) -> MathResult<Eigen> {
    let n = m.nrows();
    let eigen = SymmetricEigen::try_new(m.clone(), f64::EPSILON, MAX_ITERATIONS)
        .ok_or_else(|| MathError::DecompositionFailed("symmetric eigen did not converge".to_string()))?;
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));

    Ok(Eigen {
        values: order.iter().map(|&k| Complex::new(eigen.eigenvalues[k], 0.0)).collect(),
        vectors: DMatrix::from_fn(n, n, |i, j| eigen.eigenvectors[(i, order[j])]),
    })
}

fn general(m: &DMatrix<f64>) -> MathResult<Eigen> {
    let n = m.nrows();
    let values: Vec<Complex<f64>> = m.complex_eigenvalues().iter().copied().collect();
    let mut vectors = DMatrix::zeros(n, n);

    let mut k = 0;
    while k < n {
        let lambda = values[k];
        let tolerance = REPEAT_TOLERANCE * lambda.norm().max(1.0);
        let repeats = (0..k).filter(|&p| (values[p] - lambda).norm() <= tolerance).count();

        if lambda.im == 0.0 {
            vectors.set_column(k, &real_eigenvector(m, lambda.re, repeats)?);
            k += 1;
            continue;
        }

        let w = complex_eigenvector(m, lambda, repeats)?;
        vectors.set_column(k, &w.map(|c| c.re));
        if k + 1 < n && (values[k + 1] - lambda.conj()).norm() <= tolerance {
            vectors.set_column(k + 1, &w.map(|c| c.im));
            k += 2;
        } else {
            debug!(index = k, "complex eigenvalue without adjacent conjugate, keeping real part only");
            k += 1;
        }
    }
    Ok(Eigen { values, vectors })
}

fn real_eigenvector(m: &DMatrix<f64>, lambda: f64, repeats: usize) -> MathResult<DVector<f64>> {
    let n = m.nrows();
    let shifted = m - DMatrix::<f64>::identity(n, n) * lambda;
    let svd = shifted.try_svd(false, true, f64::EPSILON, MAX_ITERATIONS)
        .ok_or_else(|| MathError::DecompositionFailed("SVD did not converge".to_string()))?;
    let v_t = svd.v_t.ok_or_else(|| MathError::DecompositionFailed("SVD returned no V".to_string()))?;
    let index = nth_smallest(svd.singular_values.as_slice(), repeats);
    Ok(v_t.row(index).transpose())
}

fn complex_eigenvector(m: &DMatrix<f64>, lambda: Complex<f64>, repeats: usize) -> MathResult<DVector<Complex<f64>>> {
    let n = m.nrows();
    let shifted = DMatrix::from_fn(n, n, |i, j| {
        let entry = Complex::new(m[(i, j)], 0.0);
        if i == j { entry - lambda } else { entry }
    });
    let svd = shifted.try_svd(false, true, f64::EPSILON, MAX_ITERATIONS)
        .ok_or_else(|| MathError::DecompositionFailed("SVD did not converge".to_string()))?;
    let v_t = svd.v_t.ok_or_else(|| MathError::DecompositionFailed("SVD returned no V".to_string()))?;
    let index = nth_smallest(svd.singular_values.as_slice(), repeats);
    // Rows of V^H are conjugated right singular vectors.
    Ok(DVector::from_fn(n, |j, _| v_t[(index, j)].conj()))
}

fn nth_smallest(values: &[f64], nth: usize) -> usize {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    order[nth.min(order.len() - 1)]
}

/// Eigen-decomposition using `NalgebraEigen`, see `eig_with`.
pub fn eig(m: &DMatrix<f64>) -> MathResult<DMatrix<f64>> {
    eig_with(m, &NalgebraEigen)
}

/// Returns the eigenvectors as columns, followed by one more column holding the magnitude
/// of the corresponding eigenvalue.
///
/// ```
/// use nalgebra::DMatrix;
/// use rs_urdf_math::eigen::eig;
/// let m = DMatrix::from_row_slice(2, 2, &[3.0, 0.0, 0.0, -2.0]);
/// let augmented = eig(&m).unwrap();
/// assert_eq!(augmented.shape(), (2, 3));
/// assert!((augmented[(0, 2)] - 2.0).abs() < 1e-12);
/// assert!((augmented[(1, 2)] - 3.0).abs() < 1e-12);
/// ```
pub fn eig_with<E: EigenDecomposition + ?Sized>(m: &DMatrix<f64>, capability: &E) -> MathResult<DMatrix<f64>> {
    let eigen = capability.decompose(m)?;
    let (rows, cols) = eigen.vectors.shape();
    let mut augmented = DMatrix::zeros(rows, cols + 1);
    augmented.view_mut((0, 0), (rows, cols)).copy_from(&eigen.vectors);
    for (i, value) in eigen.values.iter().take(rows).enumerate() {
        augmented[(i, cols)] = value.norm();
    }
    Ok(augmented)
}
