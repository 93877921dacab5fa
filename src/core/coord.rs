//! Board coordinates.
//!
//! A `Coordinate` is a plain `(x, y)` pair of signed integers. Equality is
//! component-wise and there is no normalization: `(-1, 0)` is a perfectly
//! valid coordinate, it just never lies on a board.

use serde::{Deserialize, Serialize};

/// A square on (or off) the board.
///
/// Also used as a footprint *offset*, in which case it is relative to a
/// unit's origin square rather than absolute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate.
    ///
    /// ```
    /// use tactics_engine::core::Coordinate;
    ///
    /// let a = Coordinate::new(3, 3);
    /// let b = Coordinate::new(6, 6);
    /// assert_eq!(a.manhattan(b), 6);
    /// ```
    #[must_use]
    pub const fn manhattan(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// This coordinate translated by an offset.
    #[must_use]
    pub const fn offset(self, offset: Self) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
