//! Model a color in the sRGB color space.

use crate::{
    color::{ColorSpace, Component, Components, HasSpace},
    math::{transform, transform_3x3, Transform},
    models::xyz::Xyz,
};

pub mod encoding {
    //! Tags that specify whether RGB components are gamma encoded.

    /// This trait is used to identity tags that specify gamma encoding.
    pub trait Encoding {}

    /// Components are gamma encoded with the sRGB transfer function.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct GammaEncoded;
    impl Encoding for GammaEncoded {}

    /// Components are proportional to light intensity.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct LinearLight;
    impl Encoding for LinearLight {}
}

use encoding::{GammaEncoded, LinearLight};

/// Decode a single gamma encoded sRGB channel to linear light.
pub fn srgb_to_linear(value: Component) -> Component {
    let abs = value.abs();

    if abs <= 0.04045 {
        value / 12.92
    } else {
        value.signum() * ((abs + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode a single linear light channel with the sRGB transfer function.
pub fn linear_to_srgb(value: Component) -> Component {
    let abs = value.abs();

    if abs <= 0.0031308 {
        12.92 * value
    } else {
        value.signum() * (1.055 * abs.powf(1.0 / 2.4) - 0.055)
    }
}

chromorph_macros::gen_model! {
    /// A color specified in the sRGB color space.
    pub struct Rgb<E: encoding::Encoding> {
        /// The red component of the color.
        pub red: Component,
        /// The green component of the color.
        pub green: Component,
        /// The blue component of the color.
        pub blue: Component,
    }
}

/// Model for a color in the sRGB color space with gamma encoding.
pub type Srgb = Rgb<GammaEncoded>;

/// Model for a color in the sRGB color space with no gamma encoding.
pub type SrgbLinear = Rgb<LinearLight>;

impl HasSpace for Srgb {
    const SPACE: ColorSpace = ColorSpace::Rgb;
}

impl Srgb {
    /// Pure white.
    pub const WHITE: Srgb = Srgb::splat(1.0);

    /// Pure black.
    pub const BLACK: Srgb = Srgb::splat(0.0);

    /// A gray with all channels set to `value`.
    pub const fn splat(value: Component) -> Self {
        Self {
            red: value,
            green: value,
            blue: value,
            _e: std::marker::PhantomData,
        }
    }

    /// Convert this model from gamma encoded to linear light.
    pub fn to_linear_light(&self) -> SrgbLinear {
        self.to_components().map(srgb_to_linear).into()
    }

    /// Return the color with each channel clamped to [0..1].
    pub fn clip(&self) -> Self {
        self.to_components().map(|v| v.clamp(0.0, 1.0)).into()
    }
}

impl SrgbLinear {
    /// Convert this model from linear light to gamma encoded.
    pub fn to_gamma_encoded(&self) -> Srgb {
        self.to_components().map(linear_to_srgb).into()
    }

    /// Convert to CIE-XYZ with a D65 white point.
    pub fn to_xyz(&self) -> Xyz {
        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const TO_XYZ: Transform = transform_3x3(
            0.4124564, 0.3575761, 0.1804375,
            0.2126729, 0.7151522, 0.0721750,
            0.0193339, 0.1191920, 0.9503041,
        );

        transform(&TO_XYZ, self.to_components()).into()
    }
}

impl From<Xyz> for SrgbLinear {
    fn from(value: Xyz) -> Self {
        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const FROM_XYZ: Transform = transform_3x3(
             3.2404542, -1.5371385, -0.4985314,
            -0.9692660,  1.8760108,  0.0415560,
             0.0556434, -0.2040259,  1.0572252,
        );

        transform(&FROM_XYZ, value.to_components()).into()
    }
}

impl From<[Component; 3]> for Srgb {
    fn from(value: [Component; 3]) -> Self {
        Components::from(value).into()
    }
}
