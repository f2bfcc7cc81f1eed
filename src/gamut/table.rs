//! The table of achievable colors: every mixture of one, two or three
//! pigments at fixed ratios.

use crate::{
    color::Component,
    convert::rgb_to_lab,
    models::{Lab, Srgb},
    pigment::{mix, Palette},
    Error, Result,
};

/// One pigment's share of a mixture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Part {
    /// Position of the pigment in the palette.
    pub pigment: usize,
    /// The mixing weight of the pigment.
    pub weight: Component,
}

/// The pigments and weights that produce a gamut sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Recipe {
    parts: [Part; 3],
    len: usize,
}

impl Recipe {
    fn new(parts: &[Part]) -> Self {
        debug_assert!(!parts.is_empty() && parts.len() <= 3);
        let mut recipe = Self {
            parts: [Part::default(); 3],
            len: parts.len(),
        };
        recipe.parts[..parts.len()].copy_from_slice(parts);
        recipe
    }

    /// The parts of the mixture, in palette order.
    pub fn parts(&self) -> &[Part] {
        &self.parts[..self.len]
    }
}

/// A single evaluated mixture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GamutSample {
    /// The color the mixture produces.
    pub achieved: Srgb,
    /// The achieved color in CIE-Lab, used for distance queries.
    pub perceptual: Lab,
    /// How the mixture was made.
    pub recipe: Recipe,
}

/// All mixtures of a palette at a given step count.
#[derive(Clone, Debug, Default)]
pub struct GamutTable {
    samples: Vec<GamutSample>,
    steps: usize,
}

impl GamutTable {
    /// The number of samples a palette of `pigments` produces at `steps`.
    pub fn expected_len(pigments: usize, steps: usize) -> usize {
        if steps < 2 {
            return pigments;
        }
        let n = pigments;
        let pairs = n * n.saturating_sub(1) / 2;
        let triples = n * n.saturating_sub(1) * n.saturating_sub(2) / 6;
        let triple_interior = (steps - 1) * (steps - 2) / 2;
        n + pairs * (steps - 1) + triples * triple_interior
    }

    /// Evaluate every pure pigment, every pair at `steps - 1` interior ratios
    /// and every triple over the interior of the discretized 2-simplex.
    pub fn build(palette: &Palette, steps: usize) -> Result<Self> {
        if steps < 2 {
            return Err(Error::InvalidStepCount(steps));
        }

        let n = palette.len();
        let s = steps as Component;
        let mut weights = vec![0.0; n];
        let mut samples = Vec::with_capacity(Self::expected_len(n, steps));

        let mut evaluate = |parts: &[Part]| {
            for part in parts {
                weights[part.pigment] = part.weight;
            }
            let achieved = mix(palette, &weights);
            for part in parts {
                weights[part.pigment] = 0.0;
            }
            samples.push(GamutSample {
                achieved,
                perceptual: rgb_to_lab(&achieved),
                recipe: Recipe::new(parts),
            });
        };

        let part = |pigment, weight| Part { pigment, weight };

        for i in 0..n {
            evaluate(&[part(i, 1.0)]);
        }

        for i in 0..n {
            for j in (i + 1)..n {
                for step in 1..steps {
                    let wj = step as Component / s;
                    evaluate(&[part(i, 1.0 - wj), part(j, wj)]);
                }
            }
        }

        for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    for si in 1..(steps - 1) {
                        for sj in 1..(steps - si) {
                            let wi = si as Component / s;
                            let wj = sj as Component / s;
                            let wk = 1.0 - wi - wj;
                            if wk > 0.0 {
                                evaluate(&[part(i, wi), part(j, wj), part(k, wk)]);
                            }
                        }
                    }
                }
            }
        }

        Ok(Self { samples, steps })
    }

    /// The step count the table was built with.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All samples in enumeration order.
    pub fn samples(&self) -> &[GamutSample] {
        &self.samples
    }

    /// Find the sample closest to `lab` by euclidean distance in CIE-Lab and
    /// return it with the squared distance. The first sample wins ties.
    pub fn nearest(&self, lab: &Lab) -> Option<(&GamutSample, Component)> {
        self.samples
            .iter()
            .map(|sample| (sample, sample.perceptual.distance_squared(lab)))
            .fold(None, |best, candidate| match best {
                Some((_, best_distance)) if best_distance <= candidate.1 => best,
                _ => Some(candidate),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pigment::{Pigment, Preset};

    #[test]
    fn table_size_matches_enumeration() {
        let table = GamutTable::build(&Preset::Studio.palette(), 20).unwrap();
        assert_eq!(table.len(), 6 + 15 * 19 + 20 * 171);
        assert_eq!(table.len(), GamutTable::expected_len(6, 20));
        assert_eq!(table.steps(), 20);
    }

    #[test]
    fn small_palettes_and_step_counts() {
        for steps in 2..6 {
            for n in 0..5 {
                let palette = Palette::new(vec![Pigment::new(0.5, 0.5, 0.5); n]);
                let table = GamutTable::build(&palette, steps).unwrap();
                assert_eq!(table.len(), GamutTable::expected_len(n, steps));
            }
        }
        // Two steps leave no room inside a triangle.
        assert_eq!(GamutTable::expected_len(3, 2), 3 + 3);
    }

    #[test]
    fn step_count_below_two_is_rejected() {
        for steps in [0, 1] {
            assert!(matches!(
                GamutTable::build(&Preset::Studio.palette(), steps),
                Err(Error::InvalidStepCount(s)) if s == steps
            ));
        }
    }

    #[test]
    fn recipe_weights_sum_to_one() {
        let table = GamutTable::build(&Preset::Process.palette(), 7).unwrap();
        for sample in table.samples() {
            let total: Component = sample.recipe.parts().iter().map(|p| p.weight).sum();
            approx::assert_abs_diff_eq!(total, 1.0, epsilon = 1.0e-9);
            assert!(sample.recipe.parts().iter().all(|p| p.weight > 0.0));
        }
    }

    #[test]
    fn pure_pigments_come_first() {
        let palette = Preset::Studio.palette();
        let table = GamutTable::build(&palette, 4).unwrap();
        for (index, sample) in table.samples()[..palette.len()].iter().enumerate() {
            assert_eq!(sample.recipe.parts(), &[Part { pigment: index, weight: 1.0 }]);
        }
    }

    #[test]
    fn empty_table_has_no_nearest() {
        let table = GamutTable::build(&Palette::default(), 10).unwrap();
        assert!(table.is_empty());
        assert!(table.nearest(&Lab::new(50.0, 0.0, 0.0)).is_none());
    }
}
