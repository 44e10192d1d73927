//! Cell addresses in the cave.

use std::fmt;

/// A cell address. Depth grows downward from 0; horizontal is unbounded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Coordinate {
    pub depth: i32,
    pub horizontal: i32,
}

impl Coordinate {
    #[must_use]
    pub const fn new(depth: i32, horizontal: i32) -> Self {
        Self { depth, horizontal }
    }

    /// Build from the `horizontal,depth` order used by scan files.
    #[must_use]
    pub const fn from_scan(horizontal: i32, depth: i32) -> Self {
        Self::new(depth, horizontal)
    }

    #[must_use]
    pub const fn below(self) -> Self {
        Self::new(self.depth + 1, self.horizontal)
    }

    #[must_use]
    pub const fn below_left(self) -> Self {
        Self::new(self.depth + 1, self.horizontal - 1)
    }

    #[must_use]
    pub const fn below_right(self) -> Self {
        Self::new(self.depth + 1, self.horizontal + 1)
    }

    /// The three cells a falling unit may move into, in the order they are tried.
    #[must_use]
    pub const fn fall_candidates(self) -> [Self; 3] {
        [self.below(), self.below_left(), self.below_right()]
    }
}

/// Formats in scan order: `horizontal,depth`.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.horizontal, self.depth)
    }
}
