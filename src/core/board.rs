//! Static board geometry.
//!
//! A `Board` is a rectangular grid plus a set of blocked squares. Geometry is
//! fixed at construction: gameplay never adds or removes blocked squares.
//! The blocked set uses `im::HashSet` so snapshotting the board is O(1).

use im::HashSet as ImHashSet;

use super::coord::Coordinate;

/// Immutable board geometry: dimensions and blocked squares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    blocked: ImHashSet<Coordinate>,
}

impl Board {
    /// Create a board.
    ///
    /// Panics if the dimensions are not positive or a blocked square lies
    /// outside `[0,width)×[0,height)`. Board construction is configuration,
    /// not gameplay, so invalid geometry is a programming error.
    #[must_use]
    pub fn new(width: i32, height: i32, blocked: impl IntoIterator<Item = Coordinate>) -> Self {
        assert!(width > 0 && height > 0, "Board dimensions must be positive");

        let blocked: ImHashSet<Coordinate> = blocked.into_iter().collect();
        for coord in &blocked {
            assert!(
                coord.x >= 0 && coord.y >= 0 && coord.x < width && coord.y < height,
                "Blocked square {coord} lies outside the {width}x{height} board"
            );
        }

        Self {
            width,
            height,
            blocked,
        }
    }

    /// Create a board with no blocked squares.
    #[must_use]
    pub fn open(width: i32, height: i32) -> Self {
        Self::new(width, height, [])
    }

    /// Board width in squares.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Board height in squares.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Is the coordinate inside the board bounds?
    #[must_use]
    pub const fn contains(&self, coord: Coordinate) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width && coord.y < self.height
    }

    /// Is the square blocked for placement?
    #[must_use]
    pub fn is_blocked(&self, coord: Coordinate) -> bool {
        self.blocked.contains(&coord)
    }

    /// Iterate the blocked squares (unspecified order).
    pub fn blocked_squares(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.blocked.iter().copied()
    }

    /// Blocked squares as a sorted list, for serialization.
    #[must_use]
    pub fn blocked_list(&self) -> Vec<Coordinate> {
        let mut list: Vec<Coordinate> = self.blocked.iter().copied().collect();
        list.sort_unstable();
        list
    }
}
