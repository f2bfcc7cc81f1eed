//! Pigments, palettes and the Kubelka-Munk mixing model.
//!
//! Mixing is a single-constant Kubelka-Munk approximation applied to each
//! linear RGB channel independently. It is not spectral: a channel's
//! reflectance is turned into an absorption/scattering ratio (K/S), ratios
//! are summed by weight and the sum is turned back into a reflectance.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    color::{Component, Components},
    models::{Srgb, SrgbLinear},
    Error,
};

/// Reflectances are kept inside this range before computing K/S so the ratio
/// stays finite.
const MIN_REFLECTANCE: Component = 0.001;
const MAX_REFLECTANCE: Component = 0.999;

/// A physical colorant, described by the sRGB color of its masstone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[Component; 3]", into = "[Component; 3]")]
pub struct Pigment(Srgb);

impl Pigment {
    /// Create a pigment from gamma encoded sRGB channels in [0..1].
    pub fn new(red: Component, green: Component, blue: Component) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    /// The sRGB color of the pigment.
    pub fn color(&self) -> Srgb {
        self.0
    }

    /// The per-channel K/S ratio of the pigment.
    pub fn ks(&self) -> Components {
        self.0.to_linear_light().to_components().map(reflectance_to_ks)
    }
}

impl From<Srgb> for Pigment {
    fn from(value: Srgb) -> Self {
        Self(value)
    }
}

impl From<[Component; 3]> for Pigment {
    fn from(value: [Component; 3]) -> Self {
        Self(value.into())
    }
}

impl From<Pigment> for [Component; 3] {
    fn from(value: Pigment) -> Self {
        value.0.to_components().to_array()
    }
}

/// Turn a linear reflectance into a K/S ratio.
pub fn reflectance_to_ks(reflectance: Component) -> Component {
    let r = reflectance.clamp(MIN_REFLECTANCE, MAX_REFLECTANCE);
    (1.0 - r) * (1.0 - r) / (2.0 * r)
}

/// Turn a K/S ratio back into a linear reflectance.
pub fn ks_to_reflectance(ks: Component) -> Component {
    1.0 + ks - (ks * ks + 2.0 * ks).sqrt()
}

/// Mix pigments from `palette` using the given per-pigment weights.
///
/// Weights are matched to pigments by position; pigments without a weight or
/// with a weight that is not positive do not take part. Weights are not
/// normalized. When nothing takes part the summed K/S is zero, which maps to
/// a reflectance of one: neutral white.
pub fn mix(palette: &Palette, weights: &[Component]) -> Srgb {
    let ks = palette
        .iter()
        .zip(weights)
        .filter(|(_, &weight)| weight > 0.0)
        .fold(Components::default(), |sum, (pigment, &weight)| {
            sum + pigment.ks() * weight
        });

    SrgbLinear::from(ks.map(ks_to_reflectance))
        .to_gamma_encoded()
        .clip()
}

/// Named palettes shipped with the library.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    /// Titanium white, ivory black, cadmium yellow, cadmium red, ultramarine
    /// and phthalo green.
    Studio,
    /// White and black with the process inks cyan, magenta, yellow and an
    /// orange.
    Process,
}

impl Preset {
    /// All presets.
    pub const ALL: [Preset; 2] = [Preset::Studio, Preset::Process];

    /// The pigments of this preset.
    pub fn palette(self) -> Palette {
        let pigments = match self {
            Preset::Studio => vec![
                Pigment::new(1.0, 1.0, 1.0),
                Pigment::new(0.08, 0.08, 0.08),
                Pigment::new(1.0, 0.92, 0.0),
                Pigment::new(0.89, 0.0, 0.13),
                Pigment::new(0.1, 0.1, 0.7),
                Pigment::new(0.0, 0.47, 0.44),
            ],
            Preset::Process => vec![
                Pigment::new(1.0, 1.0, 1.0),
                Pigment::new(0.1, 0.1, 0.1),
                Pigment::new(0.0, 0.68, 0.94),
                Pigment::new(0.93, 0.0, 0.55),
                Pigment::new(1.0, 0.95, 0.0),
                Pigment::new(0.97, 0.58, 0.11),
            ],
        };
        Palette::new(pigments)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Studio => write!(f, "studio"),
            Preset::Process => write!(f, "process"),
        }
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownPreset(s.to_string()))
    }
}

/// An ordered set of pigments. Gamut samples refer to pigments by their
/// position in the palette.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<Pigment>);

impl Palette {
    /// Create a palette from pigments in order.
    pub fn new(pigments: Vec<Pigment>) -> Self {
        Self(pigments)
    }

    /// The number of pigments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the palette has no pigments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The pigment at `index`.
    pub fn get(&self, index: usize) -> Option<&Pigment> {
        self.0.get(index)
    }

    /// Iterate over the pigments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pigment> {
        self.0.iter()
    }
}

impl From<Preset> for Palette {
    fn from(value: Preset) -> Self {
        value.palette()
    }
}
