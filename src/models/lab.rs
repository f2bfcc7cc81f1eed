//! Model a color in the CIE-L*a*b* color space.

use crate::{
    color::{ColorSpace, Component, Components, HasSpace},
    models::xyz::{WhitePoint, Xyz, D65},
};

/// The breakpoint of the piecewise CIE lightness function.
pub(crate) const DELTA: Component = 6.0 / 29.0;

/// `f(t)` from the CIE-Lab definition.
pub(crate) fn lab_f(t: Component) -> Component {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

/// The inverse of [`lab_f`].
fn lab_f_inverse(t: Component) -> Component {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

chromorph_macros::gen_model! {
    /// The model for a color specified in the CIE-Lab color space.
    pub struct Lab {
        /// The lightness component, 0 to 100.
        pub lightness: Component,
        /// The green-red axis.
        pub a: Component,
        /// The blue-yellow axis.
        pub b: Component,
    }
}

impl HasSpace for Lab {
    const SPACE: ColorSpace = ColorSpace::CieLab;
}

impl Lab {
    /// Convert back to CIE-XYZ.
    pub fn to_xyz(&self) -> Xyz {
        let fy = (self.lightness + 16.0) / 116.0;
        let fx = fy + self.a / 500.0;
        let fz = fy - self.b / 200.0;

        Components(fx, fy, fz)
            .map(lab_f_inverse)
            .zip(&D65::WHITE_POINT, |v, w| v * w)
            .into()
    }

    /// The squared euclidean distance to another color in Lab.
    pub fn distance_squared(&self, other: &Lab) -> Component {
        (self.to_components() - other.to_components()).length_squared()
    }
}

impl From<Xyz> for Lab {
    fn from(value: Xyz) -> Self {
        let Components(fx, fy, fz) = value.relative_to_white().map(lab_f);

        Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    #[test]
    fn white_point_is_full_lightness() {
        let lab = Lab::from(Xyz::from(D65::WHITE_POINT));
        assert_component_eq!(lab.lightness, 100.0);
        assert_component_eq!(lab.a, 0.0);
        assert_component_eq!(lab.b, 0.0);
    }

    #[test]
    fn xyz_round_trip() {
        for xyz in [
            Xyz::new(0.318634, 0.239006, 0.041637),
            Xyz::new(0.001, 0.002, 0.0015),
            Xyz::new(0.5, 0.5, 0.5),
        ] {
            let back = Lab::from(xyz).to_xyz();
            assert_component_eq!(back.x, xyz.x);
            assert_component_eq!(back.y, xyz.y);
            assert_component_eq!(back.z, xyz.z);
        }
    }

    #[test]
    fn distance() {
        let a = Lab::new(50.0, 0.0, 0.0);
        let b = Lab::new(53.0, 4.0, 0.0);
        assert_component_eq!(a.distance_squared(&b), 25.0);
    }
}
