//! Model a color in the CIE-L*u*v* color space.

use crate::{
    color::{ColorSpace, Component, Components, HasSpace},
    math::almost_zero,
    models::{
        lab::DELTA,
        xyz::{WhitePoint, Xyz, D65},
    },
};

/// `(29/3)^3`, the slope of the linear lightness segment.
const KAPPA: Component = (29.0 / 3.0) * (29.0 / 3.0) * (29.0 / 3.0);

/// The `u'` and `v'` chromaticity of an XYZ triple, or `None` when the
/// denominator vanishes.
fn chromaticity(xyz: Components) -> Option<(Component, Component)> {
    let Components(x, y, z) = xyz;
    let denominator = x + 15.0 * y + 3.0 * z;
    if almost_zero(denominator) {
        None
    } else {
        Some((4.0 * x / denominator, 9.0 * y / denominator))
    }
}

fn white_chromaticity() -> (Component, Component) {
    let Components(x, y, z) = D65::WHITE_POINT;
    let denominator = x + 15.0 * y + 3.0 * z;
    (4.0 * x / denominator, 9.0 * y / denominator)
}

chromorph_macros::gen_model! {
    /// The model for a color specified in the CIE-Luv color space.
    pub struct Luv {
        /// The lightness component, 0 to 100.
        pub lightness: Component,
        /// The u chroma axis.
        pub u: Component,
        /// The v chroma axis.
        pub v: Component,
    }
}

impl HasSpace for Luv {
    const SPACE: ColorSpace = ColorSpace::CieLuv;
}

impl Luv {
    /// Convert back to CIE-XYZ.
    pub fn to_xyz(&self) -> Xyz {
        if almost_zero(self.lightness) {
            return Xyz::new(0.0, 0.0, 0.0);
        }

        let (un, vn) = white_chromaticity();
        let u_prime = self.u / (13.0 * self.lightness) + un;
        let v_prime = self.v / (13.0 * self.lightness) + vn;

        let y = if self.lightness > KAPPA * DELTA * DELTA * DELTA {
            let f = (self.lightness + 16.0) / 116.0;
            f * f * f
        } else {
            self.lightness / KAPPA
        } * D65::WHITE_POINT.1;

        if almost_zero(v_prime) {
            return Xyz::new(0.0, y, 0.0);
        }

        let x = y * 9.0 * u_prime / (4.0 * v_prime);
        let z = y * (12.0 - 3.0 * u_prime - 20.0 * v_prime) / (4.0 * v_prime);
        Xyz::new(x, y, z)
    }
}

impl From<Xyz> for Luv {
    fn from(value: Xyz) -> Self {
        let yr = value.y / D65::WHITE_POINT.1;
        let lightness = if yr > DELTA * DELTA * DELTA {
            116.0 * yr.cbrt() - 16.0
        } else {
            KAPPA * yr
        };

        let Some((u_prime, v_prime)) = chromaticity(value.to_components()) else {
            return Luv::new(lightness, 0.0, 0.0);
        };

        let (un, vn) = white_chromaticity();
        Luv::new(
            lightness,
            13.0 * lightness * (u_prime - un),
            13.0 * lightness * (v_prime - vn),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    #[test]
    fn black_has_no_chroma() {
        let luv = Luv::from(Xyz::new(0.0, 0.0, 0.0));
        assert_eq!(luv, Luv::new(0.0, 0.0, 0.0));
        assert!(!luv.u.is_nan());
    }

    #[test]
    fn white_is_achromatic() {
        let luv = Luv::from(Xyz::from(D65::WHITE_POINT));
        assert_component_eq!(luv.lightness, 100.0);
        assert_component_eq!(luv.u, 0.0);
        assert_component_eq!(luv.v, 0.0);
    }

    #[test]
    fn xyz_round_trip() {
        for xyz in [
            Xyz::new(0.318634, 0.239006, 0.041637),
            Xyz::new(0.004, 0.005, 0.006),
            Xyz::new(0.1805, 0.0722, 0.9505),
        ] {
            let back = Luv::from(xyz).to_xyz();
            assert_component_eq!(back.x, xyz.x);
            assert_component_eq!(back.y, xyz.y);
            assert_component_eq!(back.z, xyz.z);
        }
    }
}
