//! A [`Color`] holds the three components of a color in any of the five
//! supported color spaces.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::Error;

#[cfg(not(feature = "f64"))]
/// A 32-bit floating point value that all components are stored as.
pub type Component = f32;

#[cfg(feature = "f64")]
/// A 64-bit floating point value that all components are stored as.
pub type Component = f64;

/// Represent the three components that describe any color.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Components(pub Component, pub Component, pub Component);

impl Components {
    /// Return new components with each component mapped with the given
    /// function.
    pub fn map(&self, f: impl Fn(Component) -> Component) -> Self {
        Self(f(self.0), f(self.1), f(self.2))
    }

    /// Combine two sets of components pairwise.
    pub fn zip(&self, other: &Self, f: impl Fn(Component, Component) -> Component) -> Self {
        Self(f(self.0, other.0), f(self.1, other.1), f(self.2, other.2))
    }

    /// The squared euclidean length of the components seen as a vector.
    pub fn length_squared(&self) -> Component {
        self.0 * self.0 + self.1 * self.1 + self.2 * self.2
    }

    /// The components as an array.
    pub fn to_array(&self) -> [Component; 3] {
        [self.0, self.1, self.2]
    }
}

impl From<[Component; 3]> for Components {
    fn from(value: [Component; 3]) -> Self {
        Self(value[0], value[1], value[2])
    }
}

impl Add for Components {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.zip(&rhs, |a, b| a + b)
    }
}

impl Sub for Components {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.zip(&rhs, |a, b| a - b)
    }
}

impl Mul<Component> for Components {
    type Output = Self;

    fn mul(self, rhs: Component) -> Self::Output {
        self.map(|v| v * rhs)
    }
}

/// The color spaces a point cloud can be laid out in.
///
/// The ordinal of each variant is stable: it is persisted in settings and used
/// as an index into per-space tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum ColorSpace {
    /// Gamma encoded sRGB.
    Rgb = 0,
    /// CIE L*a*b* with a D65 white point.
    CieLab = 1,
    /// CIE XYZ with a D65 white point.
    CieXyz = 2,
    /// Oklab.
    Oklab = 3,
    /// CIE L*u*v* with a D65 white point.
    CieLuv = 4,
}

impl ColorSpace {
    /// All color spaces in ordinal order.
    pub const ALL: [ColorSpace; 5] = [
        ColorSpace::Rgb,
        ColorSpace::CieLab,
        ColorSpace::CieXyz,
        ColorSpace::Oklab,
        ColorSpace::CieLuv,
    ];

    /// The ordinal of this color space, usable as an array index.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for ColorSpace {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ColorSpace::ALL
            .get(value as usize)
            .copied()
            .ok_or(Error::UnknownColorSpace(value))
    }
}

impl From<ColorSpace> for u8 {
    fn from(value: ColorSpace) -> Self {
        value as u8
    }
}

/// Implemented by models that are the native form of a [`ColorSpace`].
pub trait HasSpace {
    /// The color space the model represents.
    const SPACE: ColorSpace;
}

/// Struct that can hold a color of any color space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// The three components that make up the color.
    pub components: Components,
    /// The color space in which the components are set.
    pub space: ColorSpace,
}

impl Color {
    /// Create a new [`Color`] from its components in the given space.
    /// ```rust
    /// use chromorph::{Color, ColorSpace};
    /// let orange = Color::new(ColorSpace::Rgb, 1.0, 0.5, 0.0);
    /// ```
    pub fn new(space: ColorSpace, c0: Component, c1: Component, c2: Component) -> Self {
        Self {
            components: Components(c0, c1, c2),
            space,
        }
    }

    /// Return a copy of the color with each component clamped to [0..1].
    /// NOTE: Only meaningful for [`ColorSpace::Rgb`].
    pub fn clip(&self) -> Self {
        Self {
            components: self.components.map(|v| v.clamp(0.0, 1.0)),
            space: self.space,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_color_with_correct_components() {
        let c = Color::new(ColorSpace::CieLab, 50.0, 10.0, -20.0);
        assert_eq!(c.components, Components(50.0, 10.0, -20.0));
        assert_eq!(c.space, ColorSpace::CieLab);
    }

    #[test]
    fn ordinals_are_stable() {
        assert_eq!(u8::from(ColorSpace::Rgb), 0);
        assert_eq!(u8::from(ColorSpace::CieLab), 1);
        assert_eq!(u8::from(ColorSpace::CieXyz), 2);
        assert_eq!(u8::from(ColorSpace::Oklab), 3);
        assert_eq!(u8::from(ColorSpace::CieLuv), 4);

        for space in ColorSpace::ALL {
            assert_eq!(ColorSpace::try_from(space as u8).unwrap(), space);
        }
    }

    #[test]
    fn unknown_ordinal_is_rejected() {
        assert!(matches!(
            ColorSpace::try_from(5),
            Err(Error::UnknownColorSpace(5))
        ));
    }

    #[test]
    fn space_serializes_as_ordinal() {
        let json = serde_json::to_string(&ColorSpace::Oklab).unwrap();
        assert_eq!(json, "3");
        let space: ColorSpace = serde_json::from_str("4").unwrap();
        assert_eq!(space, ColorSpace::CieLuv);
        assert!(serde_json::from_str::<ColorSpace>("9").is_err());
    }

    #[test]
    fn components_arithmetic() {
        let a = Components(1.0, 2.0, 3.0);
        let b = Components(0.5, 0.5, 0.5);
        assert_eq!(a - b, Components(0.5, 1.5, 2.5));
        assert_eq!(a + b, Components(1.5, 2.5, 3.5));
        assert_eq!(b * 2.0, Components(1.0, 1.0, 1.0));
        assert_eq!(Components(2.0, 3.0, 6.0).length_squared(), 49.0);
    }
}
