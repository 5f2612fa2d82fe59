//! Cell coordinates and directional stepping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid coordinates (integer cell indices)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

/// Coordinate a search varies while the other one stays fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Walk along a row (x changes, y fixed)
    X,
    /// Walk along a column (y changes, x fixed)
    Y,
}

impl Axis {
    /// The other axis.
    #[inline]
    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Which way a search walks along its axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward decreasing index
    TowardLow,
    /// Toward increasing index
    TowardHigh,
}

impl Direction {
    /// Both directions, low first.
    pub const BOTH: [Direction; 2] = [Direction::TowardLow, Direction::TowardHigh];

    /// Index delta of one step.
    #[inline]
    pub fn delta(self) -> i32 {
        match self {
            Direction::TowardLow => -1,
            Direction::TowardHigh => 1,
        }
    }

    /// Reverse direction.
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::TowardLow => Direction::TowardHigh,
            Direction::TowardHigh => Direction::TowardLow,
        }
    }
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component along `axis`.
    #[inline]
    pub fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Component held fixed while walking along `axis`.
    #[inline]
    pub fn across(&self, axis: Axis) -> i32 {
        self.along(axis.perpendicular())
    }

    /// Same cell with the `axis` component replaced.
    #[inline]
    pub fn with_along(&self, axis: Axis, position: i32) -> GridCoord {
        match axis {
            Axis::X => GridCoord::new(position, self.y),
            Axis::Y => GridCoord::new(self.x, position),
        }
    }

    /// Neighbor one step along `axis` in `direction`, or `None` past the
    /// `i32` range.
    #[inline]
    pub fn stepped(&self, axis: Axis, direction: Direction) -> Option<GridCoord> {
        let position = self.along(axis).checked_add(direction.delta())?;
        Some(self.with_along(axis, position))
    }

    /// Key used for this cell in the serialized cache (`"<x>_<y>"`).
    pub fn cell_key(&self) -> String {
        format!("{}_{}", self.x, self.y)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
