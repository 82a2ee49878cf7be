//! Vector geometry used when placing joint axes: cross products, projecting a direction
//! onto a plane, and closest points on a line.

use nalgebra::{DVector, Vector3};
use tracing::debug;
use crate::math_error::{MathError, MathResult};

/// Cross product of two 3-vectors. If either vector does not have exactly three elements,
/// a zero vector with the length of `a` is returned instead. `try_cross_product3` reports
/// this case as an error.
pub fn cross_product3(a: &DVector<f64>, b: &DVector<f64>) -> DVector<f64> {
    match try_cross_product3(a, b) {
        Ok(cross) => cross,
        Err(_) => {
            debug!(a = a.len(), b = b.len(), "cross product of non 3-vectors, returning zero");
            DVector::zeros(a.len())
        }
    }
}

/// Cross product of two 3-vectors, failing if either has some other length.
pub fn try_cross_product3(a: &DVector<f64>, b: &DVector<f64>) -> MathResult<DVector<f64>> {
    for v in [a, b] {
        if v.len() != 3 {
            return Err(MathError::DimensionMismatch { expected: 3, found: v.len() });
        }
    }
    let cross = Vector3::new(a[0], a[1], a[2]).cross(&Vector3::new(b[0], b[1], b[2]));
    Ok(DVector::from_column_slice(cross.as_slice()))
}

/// Projects the direction `line` onto the plane with the given `normal`, computed as
/// `normal x (line x normal)`. The result is scaled by `|normal|^2`, so it is the exact
/// projection only for a unit normal.
pub fn project_line_to_plane(normal: &DVector<f64>, line: &DVector<f64>) -> DVector<f64> {
    cross_product3(normal, &cross_product3(line, normal))
}

/// Point on the line `point_on_line + k * line` that is closest to `point`.
///
/// All three arrays must have the same length, and the direction must not be zero.
///
/// ```
/// use rs_urdf_math::geometry::closest_point_on_line_to_point;
/// let p = closest_point_on_line_to_point(&[3.0, 4.0, 0.0], &[1.0, 0.0, 0.0], &[0.0, 0.0, 0.0]).unwrap();
/// assert_eq!(p, vec![3.0, 0.0, 0.0]);
/// ```
pub fn closest_point_on_line_to_point(point: &[f64], line: &[f64], point_on_line: &[f64]) -> MathResult<Vec<f64>> {
    for other in [line, point_on_line] {
        if other.len() != point.len() {
            return Err(MathError::DimensionMismatch { expected: point.len(), found: other.len() });
        }
    }

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for i in 0..point.len() {
        denominator += line[i] * line[i];
        numerator += line[i] * (point[i] - point_on_line[i]);
    }
    if denominator == 0.0 {
        return Err(MathError::ZeroDirection);
    }

    let k = numerator / denominator;
    Ok(point_on_line.iter().zip(line).map(|(p, l)| p + k * l).collect())
}

/// Axis aligned box, given by its minimal and maximal corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        BoundingBox { min, max }
    }

    /// Box from separate per-axis limits.
    pub fn from_limits(x_min: f64, x_max: f64, y_min: f64, y_max: f64, z_min: f64, z_max: f64) -> Self {
        BoundingBox { min: [x_min, y_min, z_min], max: [x_max, y_max, z_max] }
    }

    /// True if the point is inside the box and not on its boundary.
    pub fn strictly_contains(&self, p: &[f64; 3]) -> bool {
        (0..3).all(|i| p[i] > self.min[i] && p[i] < self.max[i])
    }
}

/// Picks a point on the line that is close to the box.
///
/// If `point_on_line` is strictly inside the box, it is returned as it is. Otherwise the
/// line points closest to the box's max corner and to its min corner are computed, and
/// the one nearer to `point_on_line` wins. This is an approximation: only the two corners
/// are tried, it is not an intersection of the line with the box.
///
/// A zero direction makes the line a single point, so `point_on_line` is returned.
pub fn closest_point_on_line_within_box(bounds: &BoundingBox, line: &[f64; 3], point_on_line: &[f64; 3]) -> [f64; 3] {
    if bounds.strictly_contains(point_on_line) {
        return *point_on_line;
    }

    let direction = Vector3::from(*line);
    let denominator = direction.dot(&direction);
    if denominator == 0.0 {
        debug!(?point_on_line, "zero line direction, keeping the given point");
        return *point_on_line;
    }

    let origin = Vector3::from(*point_on_line);
    let project = |corner: &[f64; 3]| {
        let k = direction.dot(&(Vector3::from(*corner) - origin)) / denominator;
        origin + direction * k
    };
    let to_max = project(&bounds.max);
    let to_min = project(&bounds.min);

    if (to_max - origin).norm_squared() < (to_min - origin).norm_squared() {
        to_max.into()
    } else {
        to_min.into()
    }
}
