//! The set of colors a palette can mix, and queries against it.
//!
//! A [`Gamut`] is an immutable snapshot of a [`GamutTable`] and the
//! [`OccupancyGrid`] splatted from it. [`GamutLibrary`] owns the parameters a
//! gamut is built from, tracks which of them changed since the last build and
//! swaps in a whole new snapshot on [`GamutLibrary::rebuild`]. Snapshots are
//! handed out as [`Arc`]s, so a reader holding one is never affected by a
//! later rebuild.

use std::{sync::Arc, time::Instant};

use bitflags::bitflags;

use crate::{
    color::Component,
    convert::rgb_to_lab,
    models::Srgb,
    pigment::{Palette, Preset},
    settings::Settings,
    Error, Result,
};

mod grid;
mod table;

pub use grid::OccupancyGrid;
pub use table::{GamutSample, GamutTable, Part, Recipe};

/// The nearest achievable color to a query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// The closest color the palette can mix. When the gamut is empty this
    /// echoes the query.
    pub achieved: Srgb,
    /// Euclidean distance in CIE-Lab between the query and `achieved`.
    /// Infinite when the gamut is empty.
    pub distance: Component,
    /// How to mix `achieved`, if anything matched.
    pub recipe: Option<Recipe>,
}

impl Projection {
    fn no_match(query: &Srgb) -> Self {
        Self {
            achieved: *query,
            distance: Component::INFINITY,
            recipe: None,
        }
    }

    /// Returns false for the empty gamut sentinel.
    pub fn is_match(&self) -> bool {
        self.distance.is_finite()
    }
}

/// An immutable table of achievable colors with its occupancy grid.
#[derive(Debug)]
pub struct Gamut {
    palette: Palette,
    table: GamutTable,
    grid: OccupancyGrid,
}

impl Gamut {
    /// Build the table for `palette` at `steps` mixing ratios and splat it
    /// into a grid of `resolution³` cells with boxes of half-width
    /// `tolerance`.
    pub fn build(
        palette: Palette,
        steps: usize,
        resolution: usize,
        tolerance: Component,
    ) -> Result<Self> {
        let start = Instant::now();

        let table = GamutTable::build(&palette, steps)?;
        let grid = OccupancyGrid::build(&table, resolution, tolerance)?;

        tracing::info!(
            pigments = palette.len(),
            steps,
            samples = table.len(),
            occupied = grid.occupied(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "built gamut"
        );

        Ok(Self {
            palette,
            table,
            grid,
        })
    }

    /// The palette the gamut was mixed from.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The sampled mixtures.
    pub fn table(&self) -> &GamutTable {
        &self.table
    }

    /// The occupancy grid.
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Find the achievable color closest to `rgb` in CIE-Lab.
    pub fn project(&self, rgb: &Srgb) -> Projection {
        match self.table.nearest(&rgb_to_lab(rgb)) {
            Some((sample, distance_squared)) => Projection {
                achieved: sample.achieved,
                distance: distance_squared.sqrt(),
                recipe: Some(sample.recipe),
            },
            None => Projection::no_match(rgb),
        }
    }

    /// Project at most `limit` colors, in order.
    pub fn project_all(&self, colors: &[Srgb], limit: usize) -> Vec<Projection> {
        if colors.len() > limit {
            tracing::warn!(
                given = colors.len(),
                limit,
                "too many input colors, dropping the excess"
            );
        }
        colors
            .iter()
            .take(limit)
            .map(|rgb| self.project(rgb))
            .collect()
    }

    /// Whether some sample lies within `tolerance` of `rgb` on every channel.
    ///
    /// With the tolerance the grid was built for this is a single cell
    /// lookup, which may accept colors up to one cell further away. Any other
    /// tolerance is answered exactly by scanning the table.
    pub fn is_achievable(&self, rgb: &Srgb, tolerance: Component) -> Result<bool> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(Error::InvalidTolerance(tolerance as f64));
        }

        if tolerance == self.grid.tolerance() {
            return Ok(self.grid.contains(rgb));
        }

        tracing::trace!(tolerance, "scanning the table for achievability");
        let query = rgb.to_components();
        Ok(self.table.samples().iter().any(|sample| {
            let d = sample.achieved.to_components() - query;
            d.0.abs() <= tolerance && d.1.abs() <= tolerance && d.2.abs() <= tolerance
        }))
    }
}

bitflags! {
    /// Parameters that changed since the gamut was last built.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct Triggers : u8 {
        /// The palette was replaced.
        const PALETTE = 1 << 0;
        /// The number of mixing steps changed.
        const STEPS = 1 << 1;
        /// The occupancy tolerance changed.
        const TOLERANCE = 1 << 2;
        /// The occupancy grid resolution changed.
        const RESOLUTION = 1 << 3;
    }
}

/// Whether a [`GamutLibrary`] can answer queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Parameters changed since the last build, or nothing was built yet.
    Stale,
    /// The current snapshot matches the parameters.
    Built,
}

/// Owns the parameters of a gamut and its current snapshot.
#[derive(Debug)]
pub struct GamutLibrary {
    palette: Palette,
    steps: usize,
    resolution: usize,
    tolerance: Component,
    max_input_colors: usize,
    pending: Triggers,
    current: Option<Arc<Gamut>>,
}

impl Default for GamutLibrary {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl GamutLibrary {
    /// Default number of mixing steps between two pure pigments.
    pub const DEFAULT_STEPS: usize = 20;
    /// Default half-width of the boxes splatted into the occupancy grid.
    pub const DEFAULT_TOLERANCE: Component = 0.02;
    /// Default bound on the colors projected in one batch.
    pub const DEFAULT_MAX_INPUT_COLORS: usize = 64;

    /// Create a stale library with default parameters for `palette`.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            steps: Self::DEFAULT_STEPS,
            resolution: OccupancyGrid::DEFAULT_RESOLUTION,
            tolerance: Self::DEFAULT_TOLERANCE,
            max_input_colors: Self::DEFAULT_MAX_INPUT_COLORS,
            pending: Triggers::all(),
            current: None,
        }
    }

    /// Create a stale library from the gamut parameters in `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            palette: settings.palette.to_palette(),
            steps: settings.step_count,
            resolution: settings.occupancy_resolution,
            tolerance: settings.occupancy_tolerance,
            max_input_colors: settings.max_input_colors,
            pending: Triggers::all(),
            current: None,
        }
    }

    fn mark(&mut self, trigger: Triggers) {
        tracing::debug!(?trigger, "gamut is stale");
        self.pending |= trigger;
    }

    /// Replace the palette.
    pub fn set_palette(&mut self, palette: impl Into<Palette>) {
        let palette = palette.into();
        if palette != self.palette {
            self.palette = palette;
            self.mark(Triggers::PALETTE);
        }
    }

    /// Replace the palette with a preset.
    pub fn set_preset(&mut self, preset: Preset) {
        self.set_palette(preset.palette());
    }

    /// Change the number of mixing steps.
    pub fn set_steps(&mut self, steps: usize) {
        if steps != self.steps {
            self.steps = steps;
            self.mark(Triggers::STEPS);
        }
    }

    /// Change the occupancy tolerance.
    pub fn set_tolerance(&mut self, tolerance: Component) {
        if tolerance != self.tolerance {
            self.tolerance = tolerance;
            self.mark(Triggers::TOLERANCE);
        }
    }

    /// Change the occupancy grid resolution.
    pub fn set_resolution(&mut self, resolution: usize) {
        if resolution != self.resolution {
            self.resolution = resolution;
            self.mark(Triggers::RESOLUTION);
        }
    }

    /// Change the bound on batch projections. This does not require a
    /// rebuild.
    pub fn set_max_input_colors(&mut self, max_input_colors: usize) {
        self.max_input_colors = max_input_colors;
    }

    /// The current palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The current number of mixing steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The current occupancy tolerance.
    pub fn tolerance(&self) -> Component {
        self.tolerance
    }

    /// Parameters that changed since the last successful build.
    pub fn pending(&self) -> Triggers {
        self.pending
    }

    /// Whether queries can be answered.
    pub fn state(&self) -> State {
        if self.pending.is_empty() && self.current.is_some() {
            State::Built
        } else {
            State::Stale
        }
    }

    /// Replace the palette and step count, then build.
    pub fn rebuild(&mut self, palette: impl Into<Palette>, steps: usize) -> Result<()> {
        self.set_palette(palette);
        self.set_steps(steps);
        self.refresh()
    }

    /// Build a new snapshot from the current parameters and publish it.
    ///
    /// On error the library stays stale and the previous snapshot is kept
    /// for readers that already hold it.
    pub fn refresh(&mut self) -> Result<()> {
        let gamut = Gamut::build(
            self.palette.clone(),
            self.steps,
            self.resolution,
            self.tolerance,
        )?;
        self.current = Some(Arc::new(gamut));
        self.pending = Triggers::empty();
        Ok(())
    }

    /// A shared handle to the current snapshot.
    pub fn snapshot(&self) -> Result<Arc<Gamut>> {
        match (self.state(), &self.current) {
            (State::Built, Some(gamut)) => Ok(Arc::clone(gamut)),
            _ => Err(Error::Stale),
        }
    }

    fn built(&self) -> Result<&Gamut> {
        match (self.state(), &self.current) {
            (State::Built, Some(gamut)) => Ok(gamut),
            _ => Err(Error::Stale),
        }
    }

    /// Find the achievable color closest to `rgb`.
    pub fn project(&self, rgb: &Srgb) -> Result<Projection> {
        Ok(self.built()?.project(rgb))
    }

    /// Project a batch of colors. Colors beyond the configured maximum are
    /// dropped.
    pub fn project_all(&self, colors: &[Srgb]) -> Result<Vec<Projection>> {
        Ok(self.built()?.project_all(colors, self.max_input_colors))
    }

    /// Whether `rgb` is within `tolerance` of something the palette can mix.
    pub fn is_achievable(&self, rgb: &Srgb, tolerance: Component) -> Result<bool> {
        self.built()?.is_achievable(rgb, tolerance)
    }
}
