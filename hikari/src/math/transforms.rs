//! Builders for the common affine [`Transform`]s.
//!
//! Each builder writes the inverse out analytically where it has a closed form
//! so building a scene doesn't go through generic inversion.

use super::{matrix::Matrix4, transform::Transform, tuple::Tuple};

/// Creates a new `Transform` that is a translation by (`x`, `y`, `z`).
pub fn translation(x: f64, y: f64, z: f64) -> Transform {
    let m = Matrix4::new([
        [1.0, 0.0, 0.0, x],
        [0.0, 1.0, 0.0, y],
        [0.0, 0.0, 1.0, z],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    let m_inv = Matrix4::new([
        [1.0, 0.0, 0.0, -x],
        [0.0, 1.0, 0.0, -y],
        [0.0, 0.0, 1.0, -z],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    Transform::new_full(m, m_inv)
}

/// Creates a new `Transform` that is a scaling by `x`, `y` and `z`.
///
/// Panics if any of the factors is zero.
pub fn scaling(x: f64, y: f64, z: f64) -> Transform {
    assert!(
        x != 0.0 && y != 0.0 && z != 0.0,
        "Can't invert, singular matrix"
    );
    let m = Matrix4::new([
        [x, 0.0, 0.0, 0.0],
        [0.0, y, 0.0, 0.0],
        [0.0, 0.0, z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    let m_inv = Matrix4::new([
        [1.0 / x, 0.0, 0.0, 0.0],
        [0.0, 1.0 / y, 0.0, 0.0],
        [0.0, 0.0, 1.0 / z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    Transform::new_full(m, m_inv)
}

/// Creates a new `Transform` that is a rotation of `theta` radians around the x-axis.
pub fn rotation_x(theta: f64) -> Transform {
    let cos_theta = theta.cos();
    let sin_theta = theta.sin();
    let m = Matrix4::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, cos_theta, -sin_theta, 0.0],
        [0.0, sin_theta, cos_theta, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    Transform::new_full(m, m.transposed())
}

/// Creates a new `Transform` that is a rotation of `theta` radians around the y-axis.
pub fn rotation_y(theta: f64) -> Transform {
    let cos_theta = theta.cos();
    let sin_theta = theta.sin();
    let m = Matrix4::new([
        [cos_theta, 0.0, sin_theta, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-sin_theta, 0.0, cos_theta, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    Transform::new_full(m, m.transposed())
}

/// Creates a new `Transform` that is a rotation of `theta` radians around the z-axis.
pub fn rotation_z(theta: f64) -> Transform {
    let cos_theta = theta.cos();
    let sin_theta = theta.sin();
    let m = Matrix4::new([
        [cos_theta, -sin_theta, 0.0, 0.0],
        [sin_theta, cos_theta, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    Transform::new_full(m, m.transposed())
}

/// Creates a new `Transform` that shears each axis in proportion to the other two.
///
/// `xy` moves x in proportion to y, `xz` moves x in proportion to z and so on.
/// Panics if the resulting matrix is singular.
pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Transform {
    Transform::new_m(Matrix4::new([
        [1.0, xy, xz, 0.0],
        [yx, 1.0, yz, 0.0],
        [zx, zy, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]))
}

/// Creates a world-to-camera `Transform` with the eye at `from` looking at `to` with `up` as the rough up vector.
pub fn view_transform(from: Tuple, to: Tuple, up: Tuple) -> Transform {
    let forward = (to - from).as_vector().normalized();
    let left = forward.cross(up.as_vector().normalized());
    let true_up = left.cross(forward);
    let orientation = Matrix4::new([
        [left.x, left.y, left.z, 0.0],
        [true_up.x, true_up.y, true_up.z, 0.0],
        [-forward.x, -forward.y, -forward.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    // Orientation is orthonormal so its inverse is the transpose
    &Transform::new_full(orientation, orientation.transposed())
        * &translation(-from.x, -from.y, -from.z)
}
