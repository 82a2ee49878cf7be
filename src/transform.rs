//! Homogeneous transforms and roll-pitch-yaw angles, as used by URDF joint origins.
//!
//! A transform is a 4x4 matrix with the rotation in the upper-left 3x3 block, the
//! translation in the top three entries of the last column and `[0, 0, 0, 1]` as the
//! bottom row. Points are column vectors multiplied from the right.
//!
//! Rotations are built as `Rz(yaw) * Ry(pitch) * Rx(roll)`: roll about X is applied first,
//! then pitch about Y, then yaw about Z. This is the URDF `rpy` convention, and it is the
//! same as `nalgebra::UnitQuaternion::from_euler_angles`. On the well-conditioned domain
//! (pitch strictly inside ±90°), `rpy_from_rotation` is the exact inverse of
//! `rotation_from_rpy`.

use nalgebra::{Isometry3, Matrix3, Matrix4, Rotation3, Translation3, Unit, UnitQuaternion, Vector3};
use tracing::trace;

/// Roll, pitch and yaw in radians
pub type Rpy = [f64; 3];

/// Translation offset
pub type Xyz = [f64; 3];

/// Elementary homogeneous rotation about X.
pub fn rotation_x(angle: f64) -> Matrix4<f64> {
    let (s, c) = angle.sin_cos();
    let mut m = Matrix4::identity();
    m[(1, 1)] = c;
    m[(1, 2)] = -s;
    m[(2, 1)] = s;
    m[(2, 2)] = c;
    m
}

/// Elementary homogeneous rotation about Y.
pub fn rotation_y(angle: f64) -> Matrix4<f64> {
    let (s, c) = angle.sin_cos();
    let mut m = Matrix4::identity();
    m[(0, 0)] = c;
    m[(0, 2)] = s;
    m[(2, 0)] = -s;
    m[(2, 2)] = c;
    m
}

/// Elementary homogeneous rotation about Z.
pub fn rotation_z(angle: f64) -> Matrix4<f64> {
    let (s, c) = angle.sin_cos();
    let mut m = Matrix4::identity();
    m[(0, 0)] = c;
    m[(0, 1)] = -s;
    m[(1, 0)] = s;
    m[(1, 1)] = c;
    m
}

/// Homogeneous rotation `Rz(yaw) * Ry(pitch) * Rx(roll)` with zero translation.
pub fn rotation_from_rpy(rpy: &Rpy) -> Matrix4<f64> {
    let [roll, pitch, yaw] = *rpy;
    rotation_z(yaw) * rotation_y(pitch) * rotation_x(roll)
}

/// Homogeneous translation with identity rotation.
pub fn translation_from_xyz(xyz: &Xyz) -> Matrix4<f64> {
    let mut m = Matrix4::identity();
    m[(0, 3)] = xyz[0];
    m[(1, 3)] = xyz[1];
    m[(2, 3)] = xyz[2];
    m
}

/// Full transform `T(xyz) * R(rpy)`. The rotation is applied to the point first and the
/// translation afterwards, so transforms can be chained from the root of a kinematic tree
/// towards the leaves as `parent * child`.
///
/// ```
/// use std::f64::consts::FRAC_PI_2;
/// use nalgebra::Vector4;
/// use rs_urdf_math::transform::transformation;
///
/// let t = transformation(&[1.0, 0.0, 0.0], &[0.0, 0.0, FRAC_PI_2]);
/// let p = t * Vector4::new(1.0, 0.0, 0.0, 1.0);
/// assert!((p.x - 1.0).abs() < 1e-12 && (p.y - 1.0).abs() < 1e-12);
/// ```
pub fn transformation(xyz: &Xyz, rpy: &Rpy) -> Matrix4<f64> {
    translation_from_xyz(xyz) * rotation_from_rpy(rpy)
}

/// Transform that rotates by `angle` around `axis`, then translates. The axis does not
/// need to be normalized. A zero axis gives the pure translation.
pub fn transformation_axis_angle(translation: &Xyz, axis: &Vector3<f64>, angle: f64) -> Matrix4<f64> {
    let rotation = match Unit::try_new(*axis, f64::EPSILON) {
        Some(axis) => Rotation3::from_axis_angle(&axis, angle),
        None => Rotation3::identity(),
    };
    translation_from_xyz(translation) * rotation.to_homogeneous()
}

/// Extracts roll, pitch and yaw from an orthonormal rotation matrix.
///
/// The entries feeding `asin` / `acos` are clamped into `[-1, 1]`, so floating point drift
/// in a nearly orthonormal matrix never produces NaN. When `|m[2][0]| >= 1` the pitch is
/// ±90° (gimbal lock); roll and yaw are then not separable, yaw is reported as zero and
/// the roll is recovered from `m[0][2]`.
///
/// For a matrix that is not orthonormal the returned angles have no meaning, but they
/// are still finite.
pub fn rpy_from_rotation(m: &Matrix3<f64>) -> Rpy {
    let m20 = m[(2, 0)];
    let x = m20.clamp(-1.0, 1.0);
    let y = m[(0, 2)].clamp(-1.0, 1.0);

    if m20.abs() >= 1.0 {
        trace!(m20, "gimbal lock, yaw fixed at 0");
        let pitch = -x.asin();
        let roll = y.acos();
        [roll, pitch, 0.0]
    } else {
        let pitch = -m20.asin();
        let roll = m[(2, 1)].atan2(m[(2, 2)]);
        let yaw = m[(1, 0)].atan2(m[(0, 0)]);
        [roll, pitch, yaw]
    }
}

/// Roll, pitch and yaw of the rotation block of a homogeneous transform.
pub fn rpy_from_transform(m: &Matrix4<f64>) -> Rpy {
    rpy_from_rotation(&rotation_block(m))
}

/// Translation column of a homogeneous transform.
pub fn xyz_from_transform(m: &Matrix4<f64>) -> Xyz {
    [m[(0, 3)], m[(1, 3)], m[(2, 3)]]
}

/// Upper-left 3x3 block.
pub fn rotation_block(m: &Matrix4<f64>) -> Matrix3<f64> {
    m.fixed_view::<3, 3>(0, 0).into_owned()
}

/// Converts a homogeneous transform into an isometry. The rotation block is assumed to be
/// orthonormal and is not checked.
pub fn isometry_from_transform(m: &Matrix4<f64>) -> Isometry3<f64> {
    let rotation = Rotation3::from_matrix_unchecked(rotation_block(m));
    let [x, y, z] = xyz_from_transform(m);
    Isometry3::from_parts(
        Translation3::new(x, y, z),
        UnitQuaternion::from_rotation_matrix(&rotation),
    )
}

/// Isometry equivalent of `transformation(xyz, rpy)`.
pub fn pose_from_xyz_rpy(xyz: &Xyz, rpy: &Rpy) -> Isometry3<f64> {
    Isometry3::from_parts(
        Translation3::new(xyz[0], xyz[1], xyz[2]),
        UnitQuaternion::from_euler_angles(rpy[0], rpy[1], rpy[2]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};
    use nalgebra::Vector4;

    fn assert_rpy_eq(actual: &Rpy, expected: &Rpy, tolerance: f64) {
        for i in 0..3 {
            assert!((actual[i] - expected[i]).abs() < tolerance,
                    "rpy mismatch at {}: {:?} vs {:?}", i, actual, expected);
        }
    }

    #[test]
    fn test_zero_rpy_is_identity() {
        assert_eq!(rotation_from_rpy(&[0.0, 0.0, 0.0]), Matrix4::identity());
    }

    #[test]
    fn test_yaw_rotates_x_to_y() {
        let r = rotation_from_rpy(&[0.0, 0.0, FRAC_PI_2]);
        let p = r * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p - Vector4::new(0.0, 1.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_roll_applied_before_yaw() {
        // Roll 90° moves Y onto Z; the later yaw leaves Z alone.
        let r = rotation_from_rpy(&[FRAC_PI_2, 0.0, FRAC_PI_2]);
        let p = r * Vector4::new(0.0, 1.0, 0.0, 0.0);
        assert!((p - Vector4::new(0.0, 0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_rpy_round_trip() {
        let rpy = [0.3, -0.7, 2.1];
        let m = rotation_from_rpy(&rpy);
        assert_rpy_eq(&rpy_from_transform(&m), &rpy, 1e-12);
    }

    #[test]
    fn test_gimbal_lock() {
        let m = rotation_from_rpy(&[0.3, FRAC_PI_2, 0.0]);
        let rpy = rpy_from_transform(&m);
        assert_eq!(rpy[2], 0.0);
        assert!((rpy[1] - FRAC_PI_2).abs() < 1e-12);
        assert!((rpy[0] - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_negative_gimbal_lock() {
        let m = rotation_from_rpy(&[0.0, -FRAC_PI_2, 0.0]);
        let rpy = rpy_from_transform(&m);
        assert!((rpy[1] + FRAC_PI_2).abs() < 1e-12);
        assert_eq!(rpy[2], 0.0);
        assert!(rpy.iter().all(|a| a.is_finite()));
    }

    #[test]
    fn test_overshoot_is_clamped() {
        let mut m = Matrix3::identity();
        m[(2, 0)] = -1.0 - 1e-12;
        m[(0, 2)] = 1.0 + 1e-12;
        let rpy = rpy_from_rotation(&m);
        assert!(rpy.iter().all(|a| a.is_finite()), "{:?}", rpy);
        assert_eq!(rpy, [0.0, FRAC_PI_2, 0.0]);
    }

    #[test]
    fn test_translation_then_rotation_order() {
        let t = transformation(&[1.0, 2.0, 3.0], &[0.0, 0.0, PI]);
        assert_eq!(xyz_from_transform(&t), [1.0, 2.0, 3.0]);
        let origin = t * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((origin - Vector4::new(1.0, 2.0, 3.0, 1.0)).norm() < 1e-12);
        let p = t * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p - Vector4::new(0.0, 2.0, 3.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_axis_angle_matches_rpy() {
        let about_z = transformation_axis_angle(&[0.5, 0.0, 0.0], &Vector3::new(0.0, 0.0, 2.0), 0.4);
        let expected = transformation(&[0.5, 0.0, 0.0], &[0.0, 0.0, 0.4]);
        assert!((about_z - expected).norm() < 1e-12);
    }

    #[test]
    fn test_axis_angle_zero_axis() {
        let t = transformation_axis_angle(&[1.0, 1.0, 1.0], &Vector3::zeros(), 1.0);
        assert_eq!(t, translation_from_xyz(&[1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_isometry_agrees_with_matrix() {
        let xyz = [0.1, -0.2, 0.3];
        let rpy = [0.4, 0.5, -0.6];
        let matrix = transformation(&xyz, &rpy);
        let pose = pose_from_xyz_rpy(&xyz, &rpy);
        assert!((pose.to_homogeneous() - matrix).norm() < 1e-12);

        let back = isometry_from_transform(&matrix);
        assert!((back.to_homogeneous() - matrix).norm() < 1e-12);
        let (roll, pitch, yaw) = back.rotation.euler_angles();
        assert_rpy_eq(&[roll, pitch, yaw], &rpy, 1e-12);
    }
}
