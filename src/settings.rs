//! Persisted configuration: the palette and the numeric parameters of the
//! gamut, lattice and transitions.
//!
//! ```rust
//! use chromorph::Settings;
//! let settings = Settings::from_json_str(r#"{ "palette": "process", "step_count": 12 }"#)?;
//! assert_eq!(settings.step_count, 12);
//! assert_eq!(settings.lattice_size, 3);
//! # Ok::<(), chromorph::Error>(())
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    color::ColorSpace,
    convert::Layout,
    gamut::{GamutLibrary, OccupancyGrid},
    lattice::Lattice,
    pigment::{Palette, Preset},
    transition::TransitionState,
    Component, Error, Result,
};

/// Where the palette comes from: a named preset or an explicit list of
/// pigments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaletteSource {
    /// One of the shipped presets, written as its lowercase name.
    Preset(Preset),
    /// Pigments written as `[r, g, b]` triples.
    Custom(Palette),
}

impl Default for PaletteSource {
    fn default() -> Self {
        Self::Preset(Preset::default())
    }
}

impl PaletteSource {
    /// Resolve the pigments.
    pub fn to_palette(&self) -> Palette {
        match self {
            PaletteSource::Preset(preset) => preset.palette(),
            PaletteSource::Custom(palette) => palette.clone(),
        }
    }
}

/// All configurable parameters. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// The mixing palette.
    pub palette: PaletteSource,
    /// Mixing steps between two pure pigments.
    pub step_count: usize,
    /// Control points per axis of the deformation lattice.
    pub lattice_size: usize,
    /// Half-width of the boxes splatted into the occupancy grid.
    pub occupancy_tolerance: Component,
    /// Occupancy grid cells per axis.
    pub occupancy_resolution: usize,
    /// Bound on the colors projected in one batch.
    pub max_input_colors: usize,
    /// The layout shown at rest, stored as its ordinal.
    pub space: ColorSpace,
    /// Length of a layout transition in seconds.
    pub transition_seconds: Component,
    /// Edge length of the layout volume.
    pub layout_size: Component,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            palette: PaletteSource::default(),
            step_count: GamutLibrary::DEFAULT_STEPS,
            lattice_size: Lattice::DEFAULT_SIZE,
            occupancy_tolerance: GamutLibrary::DEFAULT_TOLERANCE,
            occupancy_resolution: OccupancyGrid::DEFAULT_RESOLUTION,
            max_input_colors: GamutLibrary::DEFAULT_MAX_INPUT_COLORS,
            space: ColorSpace::Rgb,
            transition_seconds: TransitionState::DEFAULT_DURATION.as_secs_f64() as Component,
            layout_size: Layout::default().size,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        tracing::debug!(?settings, "loaded settings");
        Ok(settings)
    }

    /// Serialize to pretty printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every parameter that would make a later build fail.
    pub fn validate(&self) -> Result<()> {
        if self.step_count < 2 {
            return Err(Error::InvalidStepCount(self.step_count));
        }
        if self.lattice_size < 2 {
            return Err(Error::InvalidLatticeSize(self.lattice_size));
        }
        if self.occupancy_resolution == 0 {
            return Err(Error::InvalidResolution(self.occupancy_resolution));
        }
        if !self.occupancy_tolerance.is_finite() || self.occupancy_tolerance < 0.0 {
            return Err(Error::InvalidTolerance(self.occupancy_tolerance as f64));
        }
        if !self.transition_seconds.is_finite() || self.transition_seconds < 0.0 {
            return Err(Error::InvalidDuration(self.transition_seconds as f64));
        }
        Ok(())
    }

    /// The resolved palette.
    pub fn palette(&self) -> Palette {
        self.palette.to_palette()
    }

    /// The display layout.
    pub fn layout(&self) -> Layout {
        Layout::new(self.layout_size)
    }

    /// A stale gamut library configured from these settings.
    pub fn gamut_library(&self) -> GamutLibrary {
        GamutLibrary::from_settings(self)
    }

    /// The deformation lattice for these settings.
    pub fn lattice(&self) -> Result<Lattice> {
        Lattice::new(self.lattice_size, self.layout())
    }

    /// An idle transition resting on the configured space.
    pub fn transition(&self) -> TransitionState {
        let seconds = self.transition_seconds.max(0.0) as f64;
        TransitionState::new(self.space, Duration::from_secs_f64(seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pigment::Pigment;

    #[test]
    fn empty_object_gives_defaults() {
        let settings = Settings::from_json_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.step_count, 20);
        assert_eq!(settings.lattice_size, 3);
        assert_eq!(settings.occupancy_resolution, 32);
        assert_eq!(settings.max_input_colors, 64);
        assert_eq!(settings.palette(), Preset::Studio.palette());
    }

    #[test]
    fn space_is_read_as_an_ordinal() {
        let settings = Settings::from_json_str(r#"{ "space": 3 }"#).unwrap();
        assert_eq!(settings.space, ColorSpace::Oklab);
        assert!(matches!(
            Settings::from_json_str(r#"{ "space": 7 }"#),
            Err(Error::Settings(_))
        ));
    }

    #[test]
    fn palette_can_be_a_preset_or_pigments() {
        let preset = Settings::from_json_str(r#"{ "palette": "process" }"#).unwrap();
        assert_eq!(preset.palette, PaletteSource::Preset(Preset::Process));

        let custom =
            Settings::from_json_str(r#"{ "palette": [[1.0, 1.0, 1.0], [0.0, 0.0, 0.5]] }"#)
                .unwrap();
        assert_eq!(
            custom.palette(),
            Palette::new(vec![
                Pigment::new(1.0, 1.0, 1.0),
                Pigment::new(0.0, 0.0, 0.5)
            ])
        );

        assert!(Settings::from_json_str(r#"{ "palette": "neon" }"#).is_err());
    }

    #[test]
    fn invalid_parameters_are_rejected_on_load() {
        assert!(matches!(
            Settings::from_json_str(r#"{ "step_count": 1 }"#),
            Err(Error::InvalidStepCount(1))
        ));
        assert!(matches!(
            Settings::from_json_str(r#"{ "lattice_size": 1 }"#),
            Err(Error::InvalidLatticeSize(1))
        ));
        assert!(matches!(
            Settings::from_json_str(r#"{ "occupancy_resolution": 0 }"#),
            Err(Error::InvalidResolution(0))
        ));
        assert!(matches!(
            Settings::from_json_str(r#"{ "occupancy_tolerance": -0.5 }"#),
            Err(Error::InvalidTolerance(_))
        ));
        assert!(matches!(
            Settings::from_json_str(r#"{ "transition_seconds": -1.0 }"#),
            Err(Error::InvalidDuration(_))
        ));
        assert!(matches!(
            Settings::from_json_str(r#"{ "steps": 4 }"#),
            Err(Error::Settings(_))
        ));
    }

    #[test]
    fn json_round_trip() {
        let settings = Settings {
            palette: PaletteSource::Preset(Preset::Process),
            step_count: 8,
            space: ColorSpace::CieLuv,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert!(json.contains("\"palette\": \"process\""));
        assert!(json.contains("\"space\": 4"));
        assert_eq!(Settings::from_json_str(&json).unwrap(), settings);
    }

    #[test]
    fn builds_configured_parts() {
        let settings = Settings::from_json_str(
            r#"{ "lattice_size": 4, "space": 1, "transition_seconds": 0.5, "occupancy_tolerance": 0.1 }"#,
        )
        .unwrap();

        let library = settings.gamut_library();
        assert_eq!(library.tolerance(), 0.1);
        assert_eq!(library.steps(), 20);

        assert_eq!(settings.lattice().unwrap().len(), 64);

        let transition = settings.transition();
        assert_eq!(transition.to(), ColorSpace::CieLab);
        assert_eq!(transition.duration(), Duration::from_millis(500));
    }
}
