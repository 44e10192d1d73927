//! Settling a single sand unit: fall down, then down-left, then down-right.

use log::trace;

use crate::cell::Cell;
use crate::coord::Coordinate;
use crate::error::SimError;
use crate::Grid;

/// How one unit's descent ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// Came to rest below the source; the cell is now `Sand`.
    Settled(Coordinate),
    /// Reached the depth limit and left the cave. The grid is unchanged
    /// apart from the source marker.
    Escaped,
    /// Could not leave the source; the source cell is now `Sand`.
    BlockedAtSource,
}

impl Outcome {
    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Settled(_))
    }
}

/// Drop one unit from `start` until it rests or reaches `depth_limit`.
///
/// Only the resting cell is written as `Sand`. The source marker is cleared
/// to `Air` the first time a unit leaves it.
///
/// # Errors
///
/// `SimError::OutOfBounds` if the unit probes a cell the grid was not
/// provisioned for.
pub fn drop_unit(
    grid: &mut Grid,
    start: Coordinate,
    depth_limit: i32,
) -> Result<Outcome, SimError> {
    let mut at = start;
    loop {
        if at.depth >= depth_limit {
            return Ok(Outcome::Escaped);
        }
        let Some(next) = next_step(grid, at)? else {
            break;
        };
        if at == start {
            vacate(grid, start)?;
        }
        at = next;
    }

    grid.set(at, Cell::Sand)?;
    if at == grid.source() {
        trace!("unit blocked the source at {at}");
        Ok(Outcome::BlockedAtSource)
    } else {
        trace!("unit settled at {at}");
        Ok(Outcome::Settled(at))
    }
}

/// First air cell among below, below-left, below-right.
fn next_step(grid: &Grid, at: Coordinate) -> Result<Option<Coordinate>, SimError> {
    for candidate in at.fall_candidates() {
        if grid.get(candidate)?.is_air() {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

fn vacate(grid: &mut Grid, start: Coordinate) -> Result<(), SimError> {
    if grid.get(start)? == Cell::Source {
        grid.set(start, Cell::Air)?;
    }
    Ok(())
}
