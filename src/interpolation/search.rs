//! Directional neighbor search for a single feature.
//!
//! Starting from a target cell, [`NeighborSearch::find`] walks outward one
//! cell at a time along the primary axis. At each step it returns either the
//! value stored there, or a value synthesized from the two nearest values on
//! the perpendicular line through that step:
//!
//! ```text
//!          primary axis (Y)
//!               │
//!      L ◄──────┼──────► H        step k: no stored value, so bound it
//!               │                 on the perpendicular axis (X) and
//!               ·                 interpolate between L and H
//!               │
//!               ◎  target
//! ```
//!
//! Each perpendicular bound is found by a direct scan, then by extrapolating
//! the line's least-squares trend one cell past the step, then (once) by
//! searching the opposite direction instead.
//!
//! Trends along [`PRIMARY_AXIS`] are fitted to the value each cell on the line
//! would report to [`NeighborSearch::find`]: stored if present, else
//! synthesized. Perpendicular trends only use stored values.
//!
//! The search only reads the grid.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::core::{Axis, Direction, FeatureKey, GridCoord};
use crate::grid::SparseGrid;

use super::regression::LineFit;

/// Axis a fill walks: columns, one row at a time.
pub const PRIMARY_AXIS: Axis = Axis::Y;

/// A value for the feature at a position along the searched axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    /// Position along the searched axis
    pub position: i32,
    /// Stored, synthesized or extrapolated value
    pub value: f32,
}

impl Neighbor {
    /// Create a neighbor.
    #[inline]
    pub fn new(position: i32, value: f32) -> Self {
        Self { position, value }
    }
}

/// Linear interpolation between two neighbors, evaluated at `at`.
///
/// Coincident endpoints collapse to the mean of their values.
pub fn interpolate(a: Neighbor, b: Neighbor, at: i32) -> f32 {
    if a.position == b.position {
        return (a.value + b.value) / 2.0;
    }
    let span = (b.position as f64) - (a.position as f64);
    let weight_a = ((b.position as f64) - (at as f64)) / span;
    let weight_b = ((at as f64) - (a.position as f64)) / span;
    (weight_a * a.value as f64 + weight_b * b.value as f64) as f32
}

/// Read-only search over one feature of a grid.
///
/// Line fits are memoized per `(axis, cross-coordinate)` for the lifetime of
/// the search, so one instance should live for one fill task.
pub struct NeighborSearch<'a> {
    grid: &'a SparseGrid,
    key: &'a FeatureKey,
    fits: RefCell<HashMap<(Axis, i32), Option<LineFit>>>,
}

impl<'a> NeighborSearch<'a> {
    /// Create a search for `key` over `grid`.
    pub fn new(grid: &'a SparseGrid, key: &'a FeatureKey) -> Self {
        Self {
            grid,
            key,
            fits: RefCell::new(HashMap::new()),
        }
    }

    /// Nearest stored or synthesized value walking from `from` along `axis`.
    ///
    /// `from` itself is not inspected. Returns `None` once the walk leaves
    /// the grid.
    pub fn find(&self, from: GridCoord, axis: Axis, direction: Direction) -> Option<Neighbor> {
        let bounds = self.grid.bounds();
        let mut next = from.stepped(axis, direction);

        while let Some(step) = next.filter(|c| bounds.contains(*c)) {
            if let Some(value) = self.reported(step, axis) {
                return Some(Neighbor::new(step.along(axis), value));
            }
            next = step.stepped(axis, direction);
        }

        None
    }

    /// Trend value one cell past `from` along `axis` in `direction`.
    ///
    /// Uses the least-squares fit over the line through `from`. On the
    /// primary axis every cell contributes its stored or synthesized value,
    /// on the other axis only stored values count.
    pub fn extrapolate(
        &self,
        from: GridCoord,
        axis: Axis,
        direction: Direction,
    ) -> Option<Neighbor> {
        let target = from.along(axis).checked_add(direction.delta())?;
        self.line_fit(axis, from.across(axis))
            .and_then(|fit| fit.extrapolate(target))
            .map(|value| Neighbor::new(target, value))
    }

    /// Stored value at `at`, else one synthesized across `axis`.
    fn reported(&self, at: GridCoord, axis: Axis) -> Option<f32> {
        self.grid
            .get(at, self.key)
            .or_else(|| self.synthesize(at, axis.perpendicular()))
    }

    /// Value for `at` interpolated from its two bounds on `axis`.
    fn synthesize(&self, at: GridCoord, axis: Axis) -> Option<f32> {
        let low = self.bound(at, axis, Direction::TowardLow, false)?;
        let high = self.bound(at, axis, Direction::TowardHigh, false)?;
        let value = interpolate(low, high, at.along(axis));
        value.is_finite().then_some(value)
    }

    /// One perpendicular bound: stored value, else trend, else the other side.
    fn bound(
        &self,
        at: GridCoord,
        axis: Axis,
        direction: Direction,
        tried_opposite: bool,
    ) -> Option<Neighbor> {
        if let Some(found) = self.scan(at, axis, direction) {
            return Some(found);
        }
        if let Some(trend) = self.extrapolate(at, axis, direction) {
            return Some(trend);
        }
        if tried_opposite {
            return None;
        }
        self.bound(at, axis, direction.opposite(), true)
    }

    /// Nearest stored value, ignoring synthesized ones.
    fn scan(&self, from: GridCoord, axis: Axis, direction: Direction) -> Option<Neighbor> {
        let bounds = self.grid.bounds();
        let mut next = from.stepped(axis, direction);

        while let Some(step) = next.filter(|c| bounds.contains(*c)) {
            if let Some(value) = self.grid.get(step, self.key) {
                return Some(Neighbor::new(step.along(axis), value));
            }
            next = step.stepped(axis, direction);
        }

        None
    }

    fn line_fit(&self, axis: Axis, across: i32) -> Option<LineFit> {
        if let Some(fit) = self.fits.borrow().get(&(axis, across)) {
            return *fit;
        }

        // Synthesizing re-enters line_fit for the other axis, so no borrow
        // may be held while fitting.
        let fit = if axis == PRIMARY_AXIS {
            let origin = GridCoord::new(0, 0).with_along(axis.perpendicular(), across);
            LineFit::fit(self.grid.bounds().range(axis).filter_map(|pos| {
                self.reported(origin.with_along(axis, pos), axis)
                    .map(|value| (pos, value))
            }))
        } else {
            LineFit::fit(self.grid.line_values(self.key, axis, across))
        };

        self.fits.borrow_mut().insert((axis, across), fit);
        fit
    }
}
