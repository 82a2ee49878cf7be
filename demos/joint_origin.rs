use rs_urdf_math::cad_transform::ExternalTransform;
use rs_urdf_math::linalg::{matrix_to_string, parse_matrix};
use rs_urdf_math::transform::{rpy_from_transform, xyz_from_transform};
use rs_urdf_math::utils::threshold;

/// Prints the URDF `<origin>` of a child link, given parent and child poses as the host
/// CAD application reports them (13 element arrays).
fn main() -> anyhow::Result<()> {
    let parent = ExternalTransform::from_slice(&[
        1.0, 0.0, 0.0,
        0.0, 1.0, 0.0,
        0.0, 0.0, 1.0,
        0.0, 0.0, 0.4,
        1.0,
    ])?;
    // Rotated 90° about Z, offset along X
    let child = ExternalTransform::from_slice(&[
        0.0, 1.0, 0.0,
        -1.0, 0.0, 0.0,
        0.0, 0.0, 1.0,
        0.25, 0.0, 0.4,
        1.0,
    ])?;

    let parent_inverse = parent.to_matrix().try_inverse()
        .ok_or_else(|| anyhow::anyhow!("parent transform is singular"))?;
    let relative = parent_inverse * child.to_matrix();

    let mut xyz = xyz_from_transform(&relative);
    let mut rpy = rpy_from_transform(&relative);
    threshold(&mut xyz, 1e-12);
    threshold(&mut rpy, 1e-12);

    println!("<origin xyz=\"{} {} {}\" rpy=\"{} {} {}\"/>", xyz[0], xyz[1], xyz[2], rpy[0], rpy[1], rpy[2]);

    let inertia = parse_matrix("[0.01 0 0; 0 0.02 0; 0 0 0.015]");
    print!("Inertia read back:\n{}", matrix_to_string(&inertia));
    Ok(())
}
