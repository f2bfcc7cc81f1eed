//! chromorph converts colors between sRGB, CIE-XYZ, CIE-Lab, CIE-Luv and
//! Oklab, works out which colors a palette of pigments can mix and lays
//! colors out in 3D so a point cloud can morph from one color space to
//! another.
//!
//! ```rust
//! use chromorph::{GamutLibrary, Preset, Srgb};
//!
//! let mut library = GamutLibrary::new(Preset::Studio.palette());
//! library.rebuild(Preset::Studio, 8)?;
//!
//! let orange = Srgb::new(1.0, 0.5, 0.0);
//! let projection = library.project(&orange)?;
//! assert!(projection.distance.is_finite());
//! # Ok::<(), chromorph::Error>(())
//! ```

#![deny(missing_docs)]

mod color;
mod convert;
mod error;
mod gamut;
mod lattice;
pub mod math;
pub mod models;
mod pigment;
mod settings;
mod test;
mod transition;

pub use color::{Color, ColorSpace, Component, Components, HasSpace};
pub use convert::{convert, rgb_to_lab, to_space, Layout, Position};
pub use error::{Error, Result};
pub use gamut::{
    Gamut, GamutLibrary, GamutSample, GamutTable, OccupancyGrid, Part, Projection, Recipe, State,
    Triggers,
};
pub use lattice::{weights_for, Lattice, WeightedInfluence, MAX_INFLUENCES};
pub use models::{Lab, Luv, Oklab, Srgb, SrgbLinear, Xyz};
pub use pigment::{ks_to_reflectance, mix, reflectance_to_ks, Palette, Pigment, Preset};
pub use settings::{PaletteSource, Settings};
pub use transition::{Phase, TransitionState};
