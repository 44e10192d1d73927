//! Error type shared by every fallible operation in the crate.

use std::fmt;

use crate::coord::Coordinate;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SimError {
    /// Consecutive path vertices share neither depth nor horizontal.
    InvalidPath { from: Coordinate, to: Coordinate },
    /// A cell outside the provisioned grid was read or written.
    OutOfBounds(Coordinate),
    /// Scan text could not be read. `line` is 1-based.
    Parse { line: usize, reason: String },
    Config { reason: &'static str },
    /// The grid needed for the scan exceeds `MAX_CELLS`.
    TooLarge { width: i64, height: i64 },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPath { from, to } => {
                write!(f, "rock segment {from} -> {to} is not axis-aligned")
            }
            Self::OutOfBounds(at) => write!(f, "cell {at} lies outside the grid"),
            Self::Parse { line, reason } => write!(f, "line {line}: {reason}"),
            Self::Config { reason } => write!(f, "invalid configuration: {reason}"),
            Self::TooLarge { width, height } => write!(
                f,
                "a {width}x{height} grid exceeds the {} cell limit",
                crate::MAX_CELLS
            ),
        }
    }
}

impl std::error::Error for SimError {}
