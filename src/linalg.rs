//! Dense matrix and vector helpers: MATLAB-style text conversion, concatenation,
//! row-reduction support and approximate equality.
//!
//! Matrices are `nalgebra::DMatrix<f64>`, stored column-major by nalgebra. All indexing in
//! this module is `(row, column)`.

use nalgebra::{DMatrix, DVector};
use tracing::debug;
use crate::math_error::{MathError, MathResult};

/// Default tolerance for `matrix_equals` and `vector_equals`.
pub const DEFAULT_EPSILON: f64 = 1e-15;

/// Parses a MATLAB-style matrix literal such as `"[1 0 0; 0 1 0; 0 0 1]"`. Rows are
/// separated by `;`, columns by whitespace. The column count is taken from the first row.
///
/// Parsing is lenient: a row with a different number of columns is left as a zero row,
/// and a token that is not a number becomes `0`. Use `parse_matrix_strict` to get an error
/// instead. A literal with no entries, such as `"[]"`, gives an empty 0x0 matrix.
///
/// ```
/// use nalgebra::DMatrix;
/// use rs_urdf_math::linalg::parse_matrix;
/// let m = parse_matrix("[1 2; 3 4]");
/// assert_eq!(m, DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]));
/// ```
pub fn parse_matrix(text: &str) -> DMatrix<f64> {
    // Lenient parsing has no failure path.
    parse_rows(text, false).unwrap_or_else(|_| DMatrix::zeros(0, 0))
}

/// Same as `parse_matrix` but fails on a row of the wrong length or on a token that is
/// not a number.
pub fn parse_matrix_strict(text: &str) -> MathResult<DMatrix<f64>> {
    parse_rows(text, true)
}

fn parse_rows(text: &str, strict: bool) -> MathResult<DMatrix<f64>> {
    let trimmed = text.trim_matches(|c: char| c == '[' || c == ']' || c.is_whitespace());
    if trimmed.is_empty() {
        return Ok(DMatrix::zeros(0, 0));
    }
    let rows: Vec<&str> = trimmed.split(';').collect();
    let columns = rows[0].split_whitespace().count();
    let mut m = DMatrix::zeros(rows.len(), columns);

    for (i, row) in rows.iter().enumerate() {
        let tokens: Vec<&str> = row.split_whitespace().collect();
        if tokens.len() != columns {
            if strict {
                return Err(MathError::MalformedRow { row: i, expected: columns, found: tokens.len() });
            }
            debug!(row = i, expected = columns, found = tokens.len(), "skipping malformed matrix row");
            continue;
        }
        for (j, token) in tokens.iter().enumerate() {
            m[(i, j)] = match token.parse::<f64>() {
                Ok(value) => value,
                Err(_) if strict => {
                    return Err(MathError::UnparseableToken {
                        row: i,
                        column: j,
                        token: token.to_string(),
                    });
                }
                Err(_) => {
                    debug!(row = i, column = j, token = *token, "unparseable matrix entry replaced by 0");
                    0.0
                }
            };
        }
    }
    Ok(m)
}

/// Writes the matrix as text: entries separated by a space, every row terminated by a
/// newline. No brackets or semicolons are written.
pub fn matrix_to_string(m: &DMatrix<f64>) -> String {
    let mut s = String::new();
    for i in 0..m.nrows() {
        let row: Vec<String> = (0..m.ncols()).map(|j| m[(i, j)].to_string()).collect();
        s.push_str(&row.join(" "));
        s.push('\n');
    }
    s
}

/// Concatenates any number of vectors, in the order given.
pub fn vector_cat_all(parts: &[&DVector<f64>]) -> DVector<f64> {
    let len: usize = parts.iter().map(|v| v.len()).sum();
    DVector::from_iterator(len, parts.iter().flat_map(|v| v.iter().copied()))
}

pub fn vector_cat(a: &DVector<f64>, b: &DVector<f64>) -> DVector<f64> {
    vector_cat_all(&[a, b])
}

pub fn vector_cat4(a: &DVector<f64>, b: &DVector<f64>, c: &DVector<f64>, d: &DVector<f64>) -> DVector<f64> {
    vector_cat_all(&[a, b, c, d])
}

/// Index of the first element exactly equal to `1.0`, searching the whole vector.
pub fn find_leading_one(v: &DVector<f64>) -> Option<usize> {
    find_leading_one_in(v, 0, v.len())
}

/// Index of the first element exactly equal to `1.0` at or after `lower`.
pub fn find_leading_one_from(v: &DVector<f64>, lower: usize) -> Option<usize> {
    find_leading_one_in(v, lower, v.len())
}

/// Searches indices in `[lower, upper)` for an element exactly equal to `1.0`.
///
/// If `upper < lower`, the bounds are taken as reversed and the range `[upper, lower)`
/// is searched backwards, starting from `lower - 1`. This lets the caller choose the
/// direction: in a reduced row echelon matrix, the bottom-most one is often wanted.
///
/// The comparison is exact: `0.9999999999` is not a one. Bounds past the end of the
/// vector are cut to its length.
///
/// ```
/// use nalgebra::DVector;
/// use rs_urdf_math::linalg::find_leading_one_in;
/// let v = DVector::from_vec(vec![0.0, 1.0, 1.0, 0.0]);
/// assert_eq!(find_leading_one_in(&v, 0, 4), Some(1));
/// assert_eq!(find_leading_one_in(&v, 4, 0), Some(2));
/// ```
pub fn find_leading_one_in(v: &DVector<f64>, lower: usize, upper: usize) -> Option<usize> {
    let len = v.len();
    if upper < lower {
        (upper.min(len)..lower.min(len)).rev().find(|&i| v[i] == 1.0)
    } else {
        (lower.min(len)..upper.min(len)).find(|&i| v[i] == 1.0)
    }
}

/// Index of the first row with every entry exactly `0.0`.
pub fn first_empty_row(m: &DMatrix<f64>) -> Option<usize> {
    (0..m.nrows()).find(|&i| m.row(i).iter().all(|&x| x == 0.0))
}

/// Writes `v` into the first all-zero row of `m`. Nothing happens if the length does not
/// match the column count or if there is no empty row.
pub fn add_vector_to_matrix<'a>(m: &'a mut DMatrix<f64>, v: &DVector<f64>) -> &'a mut DMatrix<f64> {
    if m.ncols() != v.len() {
        debug!(columns = m.ncols(), len = v.len(), "vector does not fit matrix row");
        return m;
    }
    if let Some(row) = first_empty_row(m) {
        for (j, &x) in v.iter().enumerate() {
            m[(row, j)] = x;
        }
    }
    m
}

/// Element-wise comparison with `DEFAULT_EPSILON`. Matrices of different shape are never
/// equal.
pub fn matrix_equals(a: &DMatrix<f64>, b: &DMatrix<f64>) -> bool {
    matrix_equals_eps(a, b, DEFAULT_EPSILON)
}

/// True if both matrices have the same shape and every pair of entries differs by less
/// than `epsilon`.
pub fn matrix_equals_eps(a: &DMatrix<f64>, b: &DMatrix<f64>, epsilon: f64) -> bool {
    a.shape() == b.shape() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < epsilon)
}

pub fn vector_equals(a: &DVector<f64>, b: &DVector<f64>) -> bool {
    vector_equals_eps(a, b, DEFAULT_EPSILON)
}

pub fn vector_equals_eps(a: &DVector<f64>, b: &DVector<f64>, epsilon: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identity() {
        let m = parse_matrix("[1 0 0; 0 1 0; 0 0 1]");
        assert_eq!(m, DMatrix::<f64>::identity(3, 3));
    }

    #[test]
    fn test_parse_extra_whitespace() {
        let m = parse_matrix("  [ 1   2 ;  3\t4 ] ");
        assert_eq!(m, DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]));
    }

    #[test]
    fn test_parse_surrounding_newlines_and_tabs() {
        let expected = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(parse_matrix("[1 2; 3 4]\n"), expected);
        assert_eq!(parse_matrix("\t[1 2; 3 4]"), expected);
        assert_eq!(parse_matrix("\r\n[1 2;\n3 4]\r\n"), expected);
        assert_eq!(parse_matrix_strict("[1 2; 3 4]\n").unwrap(), expected);
    }

    #[test]
    fn test_parse_empty_literal() {
        assert_eq!(parse_matrix("[]").shape(), (0, 0));
        assert_eq!(parse_matrix(" \n").shape(), (0, 0));
        assert_eq!(parse_matrix_strict("[ ]").unwrap().shape(), (0, 0));
    }

    #[test]
    fn test_parse_short_row_left_zero() {
        let m = parse_matrix("[1 2 3; 4 5; 7 8 9]");
        assert_eq!(m.shape(), (3, 3));
        assert_eq!(m.row(1).iter().copied().collect::<Vec<_>>(), vec![0.0, 0.0, 0.0]);
        assert_eq!(m[(2, 2)], 9.0);
    }

    #[test]
    fn test_parse_bad_token_is_zero() {
        let m = parse_matrix("[1 x; 3 4]");
        assert_eq!(m[(0, 1)], 0.0);
        assert_eq!(m[(1, 0)], 3.0);
    }

    #[test]
    fn test_parse_strict() {
        assert!(matches!(parse_matrix_strict("[1 2; 3]"),
            Err(MathError::MalformedRow { row: 1, expected: 2, found: 1 })));
        assert!(matches!(parse_matrix_strict("[1 2; 3 y]"),
            Err(MathError::UnparseableToken { row: 1, column: 1, .. })));
        assert!(parse_matrix_strict("[1.5 -2e3]").is_ok());
    }

    #[test]
    fn test_matrix_to_string() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 0.5, -3.0, 4.0]);
        assert_eq!(matrix_to_string(&m), "1 0.5\n-3 4\n");

        // The trailing ';' yields one extra zero row
        let parsed = parse_matrix(&matrix_to_string(&m).replace('\n', ";"));
        let mut expected = DMatrix::zeros(3, 2);
        expected.view_mut((0, 0), (2, 2)).copy_from(&m);
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_vector_cat() {
        let a = DVector::from_vec(vec![1.0, 2.0]);
        let b = DVector::from_vec(vec![3.0]);
        let c = DVector::from_vec(vec![]);
        let d = DVector::from_vec(vec![4.0, 5.0]);
        assert_eq!(vector_cat(&a, &b).as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(vector_cat4(&d, &c, &b, &a).as_slice(), &[4.0, 5.0, 3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_find_leading_one() {
        let v = DVector::from_vec(vec![0.0, 0.0, 1.0, 0.0]);
        assert_eq!(find_leading_one_in(&v, 0, 4), Some(2));
        assert_eq!(find_leading_one_in(&v, 4, 0), Some(2));
        assert_eq!(find_leading_one_from(&v, 3), None);
        assert_eq!(find_leading_one(&v), Some(2));
    }

    #[test]
    fn test_find_leading_one_direction() {
        let v = DVector::from_vec(vec![1.0, 0.0, 1.0, 0.0, 1.0]);
        assert_eq!(find_leading_one_in(&v, 1, 5), Some(2));
        assert_eq!(find_leading_one_in(&v, 5, 1), Some(4));
        assert_eq!(find_leading_one_in(&v, 4, 1), Some(2));
    }

    #[test]
    fn test_find_leading_one_bounds_cut_to_length() {
        let v = DVector::from_vec(vec![0.0, 1.0, 0.0, 1.0]);
        assert_eq!(find_leading_one_in(&v, 2, 99), Some(3));
        assert_eq!(find_leading_one_in(&v, 99, 0), Some(3));
        assert_eq!(find_leading_one_in(&v, 99, 2), Some(3));
        assert_eq!(find_leading_one_in(&v, 50, 99), None);
        assert_eq!(find_leading_one_from(&v, 10), None);
    }

    #[test]
    fn test_find_leading_one_is_exact() {
        let v = DVector::from_vec(vec![0.999_999_999_9, 1.0 + 1e-12]);
        assert_eq!(find_leading_one(&v), None);
    }

    #[test]
    fn test_add_vector_to_first_empty_row() {
        let mut m = DMatrix::from_row_slice(3, 2, &[1.0, 2.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(first_empty_row(&m), Some(1));
        add_vector_to_matrix(&mut m, &DVector::from_vec(vec![5.0, 6.0]));
        assert_eq!(m.row(1).iter().copied().collect::<Vec<_>>(), vec![5.0, 6.0]);
        assert_eq!(first_empty_row(&m), Some(2));
    }

    #[test]
    fn test_add_vector_ignored_when_not_fitting() {
        let mut m = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
        let before = m.clone();
        add_vector_to_matrix(&mut m, &DVector::from_vec(vec![5.0, 6.0]));
        assert_eq!(m, before);
        add_vector_to_matrix(&mut m, &DVector::from_vec(vec![5.0]));
        assert_eq!(m, before);
    }

    #[test]
    fn test_equality() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let mut b = a.clone();
        assert!(matrix_equals(&a, &a));
        b[(1, 1)] += 1e-9;
        assert!(!matrix_equals(&a, &b));
        assert!(matrix_equals_eps(&a, &b, 1e-6));
        assert!(!matrix_equals(&a, &DMatrix::zeros(2, 3)));

        let v = DVector::from_vec(vec![1.0, 2.0]);
        assert!(vector_equals(&v, &v));
        assert!(!vector_equals(&v, &DVector::from_vec(vec![1.0, 2.0, 0.0])));
    }
}
