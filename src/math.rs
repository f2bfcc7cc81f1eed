//! Math utility functions.

use euclid::default::{Transform3D, Vector3D};
use num_traits::Float;

use crate::color::{Component, Components};

/// A 3x3 color matrix stored in the upper-left corner of a 4x4 transform.
pub type Transform = Transform3D<Component>;

type Vector = Vector3D<Component>;

/// Build a [`Transform`] from a 3x3 matrix given in row-major order, so that
/// multiplying a column vector by it gives `(m11*x + m12*y + m13*z, ...)`.
#[allow(clippy::too_many_arguments)]
pub const fn transform_3x3(
    m11: Component,
    m12: Component,
    m13: Component,
    m21: Component,
    m22: Component,
    m23: Component,
    m31: Component,
    m32: Component,
    m33: Component,
) -> Transform {
    // euclid multiplies row vectors, so the matrix is stored transposed.
    Transform::new(
        m11, m21, m31, 0.0, //
        m12, m22, m32, 0.0, //
        m13, m23, m33, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Multiply the given matrix in `transform` with the 3 components.
pub fn transform(transform: &Transform, from: Components) -> Components {
    let Vector { x, y, z, .. } = transform.transform_vector3d(Vector::new(from.0, from.1, from.2));
    Components(x, y, z)
}

/// Returns true if the value is close enough to zero to be treated as zero.
pub fn almost_zero(value: Component) -> bool {
    value.abs() < Component::EPSILON
}

/// Linear interpolation from `a` to `b` by `t`.
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Cubic ease-in-out curve over `t` in [0..1].
pub fn ease_in_out_cubic<T: Float>(t: T) -> T {
    let two = T::one() + T::one();
    let half = T::one() / two;
    if t < half {
        let four = two + two;
        four * t * t * t
    } else {
        let u = -two * t + two;
        T::one() - u * u * u / two
    }
}
