//! Cell states for the cave grid.

use std::fmt;

/// Discriminant values are what `Cave::cells` hands to JS: do not reorder.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Cell {
    #[default]
    Air = 0,
    Rock = 1,
    Sand = 2,
    Source = 3,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Air => write!(f, "Air"),
            Self::Rock => write!(f, "Rock"),
            Self::Sand => write!(f, "Sand"),
            Self::Source => write!(f, "Source"),
        }
    }
}

impl Cell {
    /// Character used when the grid is printed.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Air => '.',
            Self::Rock => '#',
            Self::Sand => 'o',
            Self::Source => '+',
        }
    }

    #[must_use]
    pub const fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }
}
