//! Functions for converting color models to a base color space common to all
//! models. Used for color conversion.

// Oklab is defined directly on linear light sRGB and everything else is one
// matrix away from it, so linear sRGB makes the cheapest hub.

use crate::models::{Lab, Luv, Oklab, Srgb, SrgbLinear, Xyz};

/// The model used as the base color for color conversions.
pub type Base = SrgbLinear;

/// Used to convert any model to the base color space.
pub trait ToBase {
    /// Convert the model to the base color space.
    fn to_base(&self) -> Base;
}

/// Used to convert from the base color space to any model.
pub trait FromBase {
    /// Convert a base color to this model.
    fn from_base(base: &Base) -> Self;
}

impl ToBase for Srgb {
    fn to_base(&self) -> Base {
        self.to_linear_light()
    }
}

impl FromBase for Srgb {
    fn from_base(base: &Base) -> Self {
        base.to_gamma_encoded()
    }
}

impl ToBase for Xyz {
    fn to_base(&self) -> Base {
        SrgbLinear::from(*self)
    }
}

impl FromBase for Xyz {
    fn from_base(base: &Base) -> Self {
        base.to_xyz()
    }
}

impl ToBase for Lab {
    fn to_base(&self) -> Base {
        self.to_xyz().to_base()
    }
}

impl FromBase for Lab {
    fn from_base(base: &Base) -> Self {
        Lab::from(base.to_xyz())
    }
}

impl ToBase for Luv {
    fn to_base(&self) -> Base {
        self.to_xyz().to_base()
    }
}

impl FromBase for Luv {
    fn from_base(base: &Base) -> Self {
        Luv::from(base.to_xyz())
    }
}

impl ToBase for Oklab {
    fn to_base(&self) -> Base {
        self.to_linear_light()
    }
}

impl FromBase for Oklab {
    fn from_base(base: &Base) -> Self {
        Oklab::from(*base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    fn round_trip<M: ToBase + FromBase>(base: Base) {
        let back = M::from_base(&base).to_base();
        assert_component_eq!(back.red, base.red);
        assert_component_eq!(back.green, base.green);
        assert_component_eq!(back.blue, base.blue);
    }

    #[test]
    fn every_model_round_trips_through_base() {
        let base = Srgb::new(0.1, 0.6, 0.9).to_linear_light();
        round_trip::<Srgb>(base);
        round_trip::<Xyz>(base);
        round_trip::<Lab>(base);
        round_trip::<Luv>(base);
        round_trip::<Oklab>(base);
    }
}
