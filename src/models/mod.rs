//! Models are structs that represent a color in a specified color space. They
//! represent a type safe way to convert between the supported color spaces.

use crate::color::Color;

mod base;
mod lab;
mod luv;
mod oklab;
mod rgb;
mod xyz;

pub use base::{Base, FromBase, ToBase};
pub use lab::Lab;
pub use luv::Luv;
pub use oklab::Oklab;
pub use rgb::{encoding, linear_to_srgb, srgb_to_linear, Rgb, Srgb, SrgbLinear};
pub use xyz::{WhitePoint, Xyz, D65};

/// A trait implemented for color models that can be converted to a generic
/// [`Color`].
pub trait Model {
    /// Convert a model to a generic [`Color`].
    fn to_color(&self) -> Color;
}
