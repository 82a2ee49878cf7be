//! Reading the flat transform array supplied by the host CAD application.
//!
//! The array has 13 entries:
//!
//! | index  | content                                      |
//! |--------|----------------------------------------------|
//! | 0..9   | 3x3 rotation, column-major: `r[i][j] = a[i + 3j]` |
//! | 9..12  | translation x, y, z                          |
//! | 12     | homogeneous scale                            |

use nalgebra::{Matrix3, Matrix4};
use crate::math_error::{MathError, MathResult};
use crate::transform::{rpy_from_rotation, Rpy, Xyz};

/// Number of entries in the host transform array.
pub const EXTERNAL_TRANSFORM_LEN: usize = 13;

/// Read-only view of a host CAD transform. This crate never produces one, it only reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExternalTransform {
    data: [f64; EXTERNAL_TRANSFORM_LEN],
}

impl ExternalTransform {
    pub fn new(data: [f64; EXTERNAL_TRANSFORM_LEN]) -> Self {
        ExternalTransform { data }
    }

    /// Takes the first 13 entries of `data`. Longer arrays are accepted, the remaining
    /// entries are ignored.
    pub fn from_slice(data: &[f64]) -> MathResult<Self> {
        let head = data.get(..EXTERNAL_TRANSFORM_LEN)
            .ok_or(MathError::InvalidLength { expected: EXTERNAL_TRANSFORM_LEN, found: data.len() })?;
        let mut array = [0.0; EXTERNAL_TRANSFORM_LEN];
        array.copy_from_slice(head);
        Ok(ExternalTransform { data: array })
    }

    pub fn as_array(&self) -> &[f64; EXTERNAL_TRANSFORM_LEN] {
        &self.data
    }

    /// The 3x3 rotation block.
    pub fn rotation(&self) -> Matrix3<f64> {
        Matrix3::from_fn(|i, j| self.data[i + 3 * j])
    }

    pub fn xyz(&self) -> Xyz {
        [self.data[9], self.data[10], self.data[11]]
    }

    pub fn scale(&self) -> f64 {
        self.data[12]
    }

    pub fn rpy(&self) -> Rpy {
        rpy_from_rotation(&self.rotation())
    }

    /// 4x4 homogeneous matrix: rotation block, translation column and the scale as the
    /// bottom-right entry. The rest of the bottom row is zero.
    pub fn to_matrix(&self) -> Matrix4<f64> {
        let mut m = Matrix4::zeros();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.rotation());
        let [x, y, z] = self.xyz();
        m[(0, 3)] = x;
        m[(1, 3)] = y;
        m[(2, 3)] = z;
        m[(3, 3)] = self.scale();
        m
    }
}

impl From<[f64; EXTERNAL_TRANSFORM_LEN]> for ExternalTransform {
    fn from(data: [f64; EXTERNAL_TRANSFORM_LEN]) -> Self {
        ExternalTransform::new(data)
    }
}
