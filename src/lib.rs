//! Homogeneous transforms, roll-pitch-yaw angles and small geometric helpers for building
//! URDF joint origins from the poses a CAD assembly reports.
//!
//! # Features
//!
//! - Conversion between 4x4 homogeneous transforms and URDF `xyz` / `rpy` pairs. Angles are
//!   extracted with clamping and explicit gimbal lock handling, so they are never NaN.
//! - Reading the 13 element transform array of the host CAD application.
//! - Cross products, projecting a joint axis onto a plane, closest points on a line.
//! - MATLAB-style matrix text, approximate equality, row-reduction support and
//!   eigen-decomposition of dense `nalgebra` matrices.
//! - Generic min / max / clamp and a few helpers over plain `f64` arrays.
//!
//! Most helpers are lenient: degenerate input gets a documented fallback value rather than
//! an error. `config::MathConfig` offers a strict mode where such input is reported as
//! `math_error::MathError` instead.
//!
//! All functions are pure or only modify the buffer passed to them. Nothing is cached and
//! no locking is done.
//!
//! ## Example
//!
//! ```
//! use rs_urdf_math::transform::{transformation, rpy_from_transform, xyz_from_transform};
//!
//! let origin = transformation(&[0.1, 0.0, 0.3], &[0.0, 0.5, 1.0]);
//! let rpy = rpy_from_transform(&origin);
//! assert!((rpy[1] - 0.5).abs() < 1e-12);
//! assert_eq!(xyz_from_transform(&origin), [0.1, 0.0, 0.3]);
//! ```

pub mod math_error;

#[path = "utils/utils.rs"]
pub mod utils;

#[path = "utils/compare.rs"]
pub mod compare;

pub mod linalg;

pub mod eigen;

pub mod transform;

pub mod geometry;

pub mod cad_transform;

pub mod config;

#[cfg(feature = "allow_filesystem")]
pub mod config_from_file;

#[cfg(test)]
mod tests;
