//! Run configuration.

use crate::coord::Coordinate;
use crate::error::SimError;

/// Where sand enters the cave.
pub const DEFAULT_SOURCE: Coordinate = Coordinate::new(0, 500);
/// Closed floor sits this many rows below the deepest rock.
pub const DEFAULT_FLOOR_GAP: i32 = 2;
pub const DEFAULT_CROP_PADDING: usize = 5;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SimConfig {
    pub source: Coordinate,
    pub floor_gap: i32,
    pub crop_padding: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE,
            floor_gap: DEFAULT_FLOOR_GAP,
            crop_padding: DEFAULT_CROP_PADDING,
        }
    }
}

impl SimConfig {
    /// # Errors
    ///
    /// `SimError::Config` if the floor gap is below 1 or the source is above row 0.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.floor_gap < 1 {
            return Err(SimError::Config {
                reason: "floor gap must be at least 1",
            });
        }
        if self.source.depth < 0 {
            return Err(SimError::Config {
                reason: "source depth must not be negative",
            });
        }
        Ok(())
    }
}
