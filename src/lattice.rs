//! Control lattice deformation between color space layouts.
//!
//! A uniform `L³` lattice of control points spans the unit RGB cube. Each
//! control point has one position per color space (a pose). A point inside
//! the cube is bound to at most four control points with trilinear weights,
//! once, and can then be placed in any blend of two poses without converting
//! the point itself again.
//!
//! Full trilinear interpolation needs up to eight influences. Only the four
//! strongest are kept, so positions inside a cell are approximate.

use euclid::default::Vector3D;

use crate::{
    color::ColorSpace,
    convert::{Layout, Position},
    math::lerp,
    models::Srgb,
    transition::TransitionState,
    Component, Error, Result,
};

/// The most control points that influence a single point.
pub const MAX_INFLUENCES: usize = 4;

/// Corner weights below this are dropped before the strongest are picked.
const MIN_WEIGHT: Component = 0.001;

/// The control points influencing a point and their weights.
///
/// Weights are non-negative and sum to one. Unused slots hold index 0 with
/// weight 0, and used slots come first in descending weight order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WeightedInfluence {
    /// Control point indices.
    pub indices: [usize; MAX_INFLUENCES],
    /// Weight of each control point.
    pub weights: [Component; MAX_INFLUENCES],
}

impl WeightedInfluence {
    /// The used `(index, weight)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Component)> + '_ {
        self.indices
            .iter()
            .copied()
            .zip(self.weights.iter().copied())
            .filter(|&(_, weight)| weight > 0.0)
    }

    /// The number of used slots.
    pub fn len(&self) -> usize {
        self.weights.iter().filter(|&&weight| weight > 0.0).count()
    }

    /// Returns true if no slot is used.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute the control point influences of `point` on a lattice with
/// `lattice_size` points per axis.
///
/// The point is clamped into the unit cube. Control point `(x, y, z)`, with x,
/// y and z the red, green and blue lattice coordinates, has index
/// `x + y * L + z * L²`.
pub fn weights_for(point: &Srgb, lattice_size: usize) -> Result<WeightedInfluence> {
    if lattice_size < 2 {
        return Err(Error::InvalidLatticeSize(lattice_size));
    }
    Ok(influence(point, lattice_size))
}

fn influence(point: &Srgb, size: usize) -> WeightedInfluence {
    let n = (size - 1) as Component;

    // Cell and fractional offset along one axis.
    let locate = |value: Component| {
        let scaled = value.clamp(0.0, 1.0) * n;
        let cell = (scaled.floor() as usize).min(size - 2);
        (cell, scaled - cell as Component)
    };

    let (ri, rf) = locate(point.red);
    let (gi, gf) = locate(point.green);
    let (bi, bf) = locate(point.blue);

    let mut corners = [(0_usize, 0.0 as Component); 8];
    for (corner, slot) in corners.iter_mut().enumerate() {
        let (dr, dg, db) = (corner & 1, (corner >> 1) & 1, (corner >> 2) & 1);
        let wr = if dr == 1 { rf } else { 1.0 - rf };
        let wg = if dg == 1 { gf } else { 1.0 - gf };
        let wb = if db == 1 { bf } else { 1.0 - bf };
        let index = (ri + dr) + (gi + dg) * size + (bi + db) * size * size;
        *slot = (index, wr * wg * wb);
    }

    // Stable, so equal weights keep corner order.
    corners.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut result = WeightedInfluence::default();
    let kept = corners
        .iter()
        .filter(|&&(_, weight)| weight >= MIN_WEIGHT)
        .take(MAX_INFLUENCES);
    for (slot, &(index, weight)) in kept.enumerate() {
        result.indices[slot] = index;
        result.weights[slot] = weight;
    }

    // The largest of eight weights summing to one is at least 1/8, so the
    // total is never zero.
    let total: Component = result.weights.iter().sum();
    for weight in result.weights.iter_mut() {
        *weight /= total;
    }

    result
}

/// A control lattice with a cached pose for every color space.
#[derive(Clone, Debug)]
pub struct Lattice {
    size: usize,
    layout: Layout,
    poses: [Vec<Position>; 5],
}

impl Lattice {
    /// Default number of control points per axis.
    pub const DEFAULT_SIZE: usize = 3;

    /// Create a lattice with `size` points per axis and compute its poses in
    /// `layout`.
    pub fn new(size: usize, layout: Layout) -> Result<Self> {
        if size < 2 {
            return Err(Error::InvalidLatticeSize(size));
        }

        let points = size * size * size;
        let poses = ColorSpace::ALL.map(|space| {
            (0..points)
                .map(|index| layout.position(&Self::color_at(size, index), space))
                .collect::<Vec<_>>()
        });

        tracing::debug!(size, points, "computed lattice poses");

        Ok(Self {
            size,
            layout,
            poses,
        })
    }

    fn color_at(size: usize, index: usize) -> Srgb {
        let n = (size - 1) as Component;
        let x = index % size;
        let y = (index / size) % size;
        let z = index / (size * size);
        Srgb::new(x as Component / n, y as Component / n, z as Component / n)
    }

    /// Points per axis.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The layout the poses were computed in.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The number of control points.
    pub fn len(&self) -> usize {
        self.size * self.size * self.size
    }

    /// A lattice always has control points.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The RGB color a control point sits on.
    pub fn control_color(&self, index: usize) -> Srgb {
        Self::color_at(self.size, index)
    }

    /// The control point positions in `space`.
    pub fn pose(&self, space: ColorSpace) -> &[Position] {
        &self.poses[space.index()]
    }

    /// The influences of `point` on this lattice.
    pub fn influence(&self, point: &Srgb) -> WeightedInfluence {
        influence(point, self.size)
    }

    /// Place a point bound by `influence` in the blend described by
    /// `transition`.
    pub fn deform(
        &self,
        influence: &WeightedInfluence,
        transition: &TransitionState,
    ) -> Position {
        let from = self.pose(transition.from());
        let to = self.pose(transition.to());
        let t = transition.blend();

        influence
            .iter()
            .fold(Vector3D::zero(), |sum, (index, weight)| {
                let (a, b) = (from[index], to[index]);
                let blended = Vector3D::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t), lerp(a.z, b.z, t));
                sum + blended * weight
            })
            .to_point()
    }
}
