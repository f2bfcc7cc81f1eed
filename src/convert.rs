//! Each color space is modeled with its own type. Conversions are only
//! implemented on relevant models and meet at linear light sRGB.
//!
//! Conversions never fail: degenerate inputs produce defined values (zero
//! chroma for a vanishing CIE-Luv denominator) instead of NaN.
//!
//! ```rust
//! use chromorph::models::{Lab, Srgb};
//! let lab = Lab::from(
//!     Srgb::new(1.0, 0.5, 0.0)
//!         .to_linear_light()      // decode the sRGB gamma.
//!         .to_xyz(),              // convert to xyz-d65.
//! );
//! ```
//!
//! For laying out a point cloud, [`Layout`] maps a color to a 3D position in
//! each space, scaled so that all five layouts occupy a comparable extent.

use euclid::default::Point3D;

use crate::{
    color::{Color, ColorSpace, Component, Components},
    models::{Base, FromBase, Lab, Luv, Model, Oklab, Srgb, ToBase, Xyz},
};

/// A position in a display layout.
pub type Position = Point3D<Component>;

impl Color {
    /// Convert this color from its current color space to the specified color
    /// space.
    pub fn to_space(&self, space: ColorSpace) -> Self {
        use ColorSpace as S;

        if self.space == space {
            return *self;
        }

        macro_rules! to_base {
            ($m:ident) => {{
                $m::from(self.components).to_base()
            }};
        }

        let base: Base = match self.space {
            S::Rgb => to_base!(Srgb),
            S::CieLab => to_base!(Lab),
            S::CieXyz => to_base!(Xyz),
            S::Oklab => to_base!(Oklab),
            S::CieLuv => to_base!(Luv),
        };

        from_base(&base, space)
    }
}

fn from_base(base: &Base, space: ColorSpace) -> Color {
    match space {
        ColorSpace::Rgb => Srgb::from_base(base).to_color(),
        ColorSpace::CieLab => Lab::from_base(base).to_color(),
        ColorSpace::CieXyz => Xyz::from_base(base).to_color(),
        ColorSpace::Oklab => Oklab::from_base(base).to_color(),
        ColorSpace::CieLuv => Luv::from_base(base).to_color(),
    }
}

/// Convert a gamma encoded sRGB color to CIE-Lab.
pub fn rgb_to_lab(rgb: &Srgb) -> Lab {
    Lab::from_base(&rgb.to_linear_light())
}

/// Express an sRGB color in the given color space.
pub fn to_space(rgb: &Srgb, space: ColorSpace) -> Color {
    from_base(&rgb.to_linear_light(), space)
}

/// Map an sRGB color to its position in the default [`Layout`].
pub fn convert(rgb: &Srgb, space: ColorSpace) -> Position {
    Layout::default().position(rgb, space)
}

/// Places colors in 3D so every color space fits a cube of side `size`
/// centered at the origin. The vertical (y) axis carries blue for RGB and
/// lightness or luminance for the other spaces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Edge length of the layout volume.
    pub size: Component,
}

impl Default for Layout {
    fn default() -> Self {
        Self { size: 1.0 }
    }
}

impl Layout {
    /// Lab a/b span roughly +-128.
    const LAB_CHROMA: Component = 128.0;
    /// Luv u/v span roughly +-180 inside the sRGB gamut.
    const LUV_CHROMA: Component = 180.0;
    /// Oklab a/b span roughly +-0.4 inside the sRGB gamut.
    const OKLAB_CHROMA: Component = 0.4;

    /// Create a layout with the given edge length.
    pub fn new(size: Component) -> Self {
        Self { size }
    }

    /// The position of `rgb` in the layout of `space`.
    pub fn position(&self, rgb: &Srgb, space: ColorSpace) -> Position {
        let size = self.size;
        let half = size * 0.5;

        let chroma_layout = |lightness: Component, c1: Component, c2: Component, divisor| {
            Position::new(
                c1 / divisor * half,
                (lightness - 0.5) * size,
                c2 / divisor * half,
            )
        };

        match space {
            ColorSpace::Rgb => Position::new(
                (rgb.red - 0.5) * size,
                (rgb.blue - 0.5) * size,
                (rgb.green - 0.5) * size,
            ),
            ColorSpace::CieLab => {
                let lab = rgb_to_lab(rgb);
                chroma_layout(lab.lightness / 100.0, lab.a, lab.b, Self::LAB_CHROMA)
            }
            ColorSpace::CieXyz => {
                let Components(x, y, z) = rgb.to_linear_light().to_xyz().relative_to_white();
                Position::new((x - 0.5) * size, (y - 0.5) * size, (z - 0.5) * size)
            }
            ColorSpace::Oklab => {
                let oklab = Oklab::from_base(&rgb.to_linear_light());
                chroma_layout(oklab.lightness, oklab.a, oklab.b, Self::OKLAB_CHROMA)
            }
            ColorSpace::CieLuv => {
                let luv = Luv::from_base(&rgb.to_linear_light());
                chroma_layout(luv.lightness / 100.0, luv.u, luv.v, Self::LUV_CHROMA)
            }
        }
    }
}
