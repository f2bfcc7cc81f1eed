//! Model a color in the Oklab color space.

use crate::{
    color::{ColorSpace, Component, HasSpace},
    math::{transform, transform_3x3, Transform},
    models::rgb::SrgbLinear,
};

chromorph_macros::gen_model! {
    /// The model for a color specified in the Oklab color space.
    pub struct Oklab {
        /// The perceived lightness, 0 to 1.
        pub lightness: Component,
        /// The green-red axis.
        pub a: Component,
        /// The blue-yellow axis.
        pub b: Component,
    }
}

impl HasSpace for Oklab {
    const SPACE: ColorSpace = ColorSpace::Oklab;
}

impl From<SrgbLinear> for Oklab {
    fn from(value: SrgbLinear) -> Self {
        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const RGB_TO_LMS: Transform = transform_3x3(
            0.4122214708, 0.5363325363, 0.0514459929,
            0.2119034982, 0.6806995451, 0.1073969566,
            0.0883024619, 0.2817188376, 0.6299787005,
        );

        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const LMS_TO_OKLAB: Transform = transform_3x3(
            0.2104542553,  0.7936177850, -0.0040720468,
            1.9779984951, -2.4285922050,  0.4505937099,
            0.0259040371,  0.7827717662, -0.8086757660,
        );

        let lms = transform(&RGB_TO_LMS, value.to_components()).map(|v| v.cbrt());
        transform(&LMS_TO_OKLAB, lms).into()
    }
}

impl Oklab {
    /// Convert back to linear light sRGB.
    pub fn to_linear_light(&self) -> SrgbLinear {
        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const OKLAB_TO_LMS: Transform = transform_3x3(
            1.0,  0.3963377774,  0.2158037573,
            1.0, -0.1055613458, -0.0638541728,
            1.0, -0.0894841775, -1.2914855480,
        );

        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const LMS_TO_RGB: Transform = transform_3x3(
             4.0767416621, -3.3077115913,  0.2309699292,
            -1.2684380046,  2.6097574011, -0.3413193965,
            -0.0041960863, -0.7034186147,  1.7076147010,
        );

        let lms = transform(&OKLAB_TO_LMS, self.to_components()).map(|v| v * v * v);
        transform(&LMS_TO_RGB, lms).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_component_eq, models::Srgb};

    #[test]
    fn white_is_unit_lightness() {
        let oklab = Oklab::from(Srgb::WHITE.to_linear_light());
        assert_component_eq!(oklab.lightness, 1.0);
        assert_component_eq!(oklab.a, 0.0);
        assert_component_eq!(oklab.b, 0.0);
    }

    #[test]
    fn known_value() {
        // chocolate
        let oklab = Oklab::from(Srgb::new(0.823529, 0.411765, 0.117647).to_linear_light());
        approx::assert_abs_diff_eq!(oklab.lightness, 0.634398, epsilon = 1.0e-3);
        approx::assert_abs_diff_eq!(oklab.a, 0.099074, epsilon = 1.0e-3);
        approx::assert_abs_diff_eq!(oklab.b, 0.119193, epsilon = 1.0e-3);
    }

    #[test]
    fn linear_round_trip() {
        let linear = Srgb::new(0.2, 0.7, 0.4).to_linear_light();
        let back = Oklab::from(linear).to_linear_light();
        assert_component_eq!(back.red, linear.red);
        assert_component_eq!(back.green, linear.green);
        assert_component_eq!(back.blue, linear.blue);
    }
}
