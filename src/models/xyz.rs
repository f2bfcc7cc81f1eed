//! Model a color in the CIE-XYZ color space.

use crate::color::{ColorSpace, Component, Components, HasSpace};

/// A reference white used to normalize CIE-XYZ values.
pub trait WhitePoint {
    /// The XYZ coordinates of the reference white.
    const WHITE_POINT: Components;
}

/// The D65 standard illuminant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct D65;

impl WhitePoint for D65 {
    const WHITE_POINT: Components = Components(0.95047, 1.0, 1.08883);
}

chromorph_macros::gen_model! {
    /// A color in the CIE-XYZ color space, relative to a D65 white point.
    pub struct Xyz {
        /// The X component of the color.
        pub x: Component,
        /// The Y (luminance) component of the color.
        pub y: Component,
        /// The Z component of the color.
        pub z: Component,
    }
}

impl HasSpace for Xyz {
    const SPACE: ColorSpace = ColorSpace::CieXyz;
}

impl Xyz {
    /// Return the components divided by the D65 white point.
    pub fn relative_to_white(&self) -> Components {
        self.to_components().zip(&D65::WHITE_POINT, |v, w| v / w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Model;

    #[test]
    fn to_color() {
        let color = Xyz::new(0.1, 0.2, 0.3).to_color();
        assert_eq!(color.space, ColorSpace::CieXyz);
        assert_eq!(color.components, Components(0.1, 0.2, 0.3));
    }

    #[test]
    fn white_is_one_relative_to_itself() {
        let white = Xyz::from(D65::WHITE_POINT).relative_to_white();
        assert_eq!(white, Components(1.0, 1.0, 1.0));
    }
}
