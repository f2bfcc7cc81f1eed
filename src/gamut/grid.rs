//! A coarse boolean grid over the sRGB cube answering "is this color near
//! something the palette can mix?" without touching the table.

use crate::{color::Component, gamut::table::GamutTable, models::Srgb, Error, Result};

/// Boolean occupancy over `resolution³` cells of the sRGB cube.
///
/// Every sample marks all cells overlapped by the axis aligned box of
/// half-width `tolerance` around it, so [`OccupancyGrid::contains`] never
/// misses a color that lies within `tolerance` of a sample on every channel.
/// It may report colors further away as achievable.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    resolution: usize,
    tolerance: Component,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Cells per axis when nothing else is configured.
    pub const DEFAULT_RESOLUTION: usize = 32;

    /// Splat every sample in `table` into a new grid.
    pub fn build(table: &GamutTable, resolution: usize, tolerance: Component) -> Result<Self> {
        if resolution == 0 {
            return Err(Error::InvalidResolution(resolution));
        }
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(Error::InvalidTolerance(tolerance as f64));
        }

        let mut grid = Self {
            resolution,
            tolerance,
            cells: vec![false; resolution * resolution * resolution],
        };

        for sample in table.samples() {
            grid.splat(&sample.achieved);
        }

        Ok(grid)
    }

    fn splat(&mut self, rgb: &Srgb) {
        let t = self.tolerance;
        let (r0, r1) = (self.quantize(rgb.red - t), self.quantize(rgb.red + t));
        let (g0, g1) = (self.quantize(rgb.green - t), self.quantize(rgb.green + t));
        let (b0, b1) = (self.quantize(rgb.blue - t), self.quantize(rgb.blue + t));

        for b in b0..=b1 {
            for g in g0..=g1 {
                for r in r0..=r1 {
                    let index = self.index(r, g, b);
                    self.cells[index] = true;
                }
            }
        }
    }

    fn quantize(&self, value: Component) -> usize {
        let last = self.resolution - 1;
        let cell = (value * self.resolution as Component).floor();
        if cell <= 0.0 {
            0
        } else {
            (cell as usize).min(last)
        }
    }

    fn index(&self, r: usize, g: usize, b: usize) -> usize {
        r + g * self.resolution + b * self.resolution * self.resolution
    }

    /// The cell coordinates holding `rgb`. Out of range channels land in the
    /// border cells.
    pub fn cell(&self, rgb: &Srgb) -> [usize; 3] {
        [
            self.quantize(rgb.red),
            self.quantize(rgb.green),
            self.quantize(rgb.blue),
        ]
    }

    /// Whether the cell holding `rgb` is occupied.
    pub fn contains(&self, rgb: &Srgb) -> bool {
        let [r, g, b] = self.cell(rgb);
        self.cells[self.index(r, g, b)]
    }

    /// Cells per axis.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// The half-width of the box splatted around each sample.
    pub fn tolerance(&self) -> Component {
        self.tolerance
    }

    /// The number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pigment::{Palette, Pigment, Preset};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn every_sample_is_contained() {
        let table = GamutTable::build(&Preset::Studio.palette(), 10).unwrap();
        let grid = OccupancyGrid::build(&table, 32, 0.02).unwrap();
        for sample in table.samples() {
            assert!(grid.contains(&sample.achieved));
        }
    }

    #[test]
    fn colors_near_a_sample_are_contained() {
        let table = GamutTable::build(&Preset::Process.palette(), 8).unwrap();
        let tolerance = 0.03;
        let grid = OccupancyGrid::build(&table, 24, tolerance).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let sample = &table.samples()[rng.gen_range(0..table.len())];
            let jitter = |v: Component, rng: &mut StdRng| {
                (v + rng.gen_range(-tolerance..=tolerance)).clamp(0.0, 1.0)
            };
            let near = Srgb::new(
                jitter(sample.achieved.red, &mut rng),
                jitter(sample.achieved.green, &mut rng),
                jitter(sample.achieved.blue, &mut rng),
            );
            assert!(grid.contains(&near), "{near:?} near {:?}", sample.achieved);
        }
    }

    #[test]
    fn a_single_gray_occupies_few_cells() {
        let palette = Palette::new(vec![Pigment::new(0.55, 0.55, 0.55)]);
        let table = GamutTable::build(&palette, 4).unwrap();
        let grid = OccupancyGrid::build(&table, 10, 0.0).unwrap();
        assert_eq!(grid.occupied(), 1);
        assert_eq!(grid.cell(&Srgb::splat(0.55)), [5, 5, 5]);
        assert!(grid.contains(&Srgb::splat(0.52)));
        assert!(!grid.contains(&Srgb::splat(0.9)));
    }

    #[test]
    fn the_upper_edge_lands_in_the_last_cell() {
        let table = GamutTable::default();
        let grid = OccupancyGrid::build(&table, 8, 0.0).unwrap();
        assert_eq!(grid.cell(&Srgb::WHITE), [7, 7, 7]);
        assert_eq!(grid.cell(&Srgb::new(-0.5, 1.5, 0.0)), [0, 7, 0]);
        assert_eq!(grid.occupied(), 0);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let table = GamutTable::default();
        assert!(matches!(
            OccupancyGrid::build(&table, 0, 0.01),
            Err(Error::InvalidResolution(0))
        ));
        assert!(matches!(
            OccupancyGrid::build(&table, 4, -0.1),
            Err(Error::InvalidTolerance(_))
        ));
        assert!(matches!(
            OccupancyGrid::build(&table, 4, Component::NAN),
            Err(Error::InvalidTolerance(_))
        ));
    }
}
