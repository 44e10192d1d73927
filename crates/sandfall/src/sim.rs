//! Driving repeated drops until the cave overflows or the source is buried.

use std::fmt;

use log::debug;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::rock::RockPath;
use crate::settle::{self, Outcome};
use crate::Grid;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Variant {
    /// No floor: stops when a unit falls past the deepest rock.
    OpenFloor,
    /// Rock floor `floor_gap` rows below the deepest rock: stops when the source is buried.
    ClosedFloor,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenFloor => write!(f, "open floor"),
            Self::ClosedFloor => write!(f, "closed floor"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Termination {
    Escaped,
    BlockedAtSource,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RunReport {
    pub variant: Variant,
    pub settled: usize,
    pub termination: Termination,
}

/// One run over a grid it owns exclusively.
#[derive(Clone, Debug)]
pub struct Simulation {
    grid: Grid,
    variant: Variant,
    depth_limit: i32,
    settled: usize,
    termination: Option<Termination>,
}

impl Simulation {
    /// Take ownership of `grid`, adding its closed floor for the closed-floor variant.
    ///
    /// # Errors
    ///
    /// `SimError::Config` if the source is not above the closed floor,
    /// `SimError::OutOfBounds` if the floor row was not provisioned.
    pub fn new(mut grid: Grid, variant: Variant) -> Result<Self, SimError> {
        let depth_limit = match variant {
            Variant::OpenFloor => grid.max_depth(),
            Variant::ClosedFloor => {
                let floor = grid.closed_floor_depth();
                if floor <= grid.source().depth {
                    return Err(SimError::Config {
                        reason: "source must lie above the closed floor",
                    });
                }
                grid.add_floor(floor)?;
                floor
            }
        };
        Ok(Self {
            grid,
            variant,
            depth_limit,
            settled: 0,
            termination: None,
        })
    }

    /// Build the grid for `paths` and wrap it.
    ///
    /// # Errors
    ///
    /// Anything `Grid::build` rejects.
    pub fn from_paths(
        paths: &[RockPath],
        variant: Variant,
        config: &SimConfig,
    ) -> Result<Self, SimError> {
        Self::new(Grid::build(paths, config)?, variant)
    }

    /// Drop the next unit from the source. Once finished, returns the
    /// terminal outcome again without touching the grid.
    ///
    /// # Errors
    ///
    /// `SimError::OutOfBounds` from the settling engine.
    pub fn step(&mut self) -> Result<Outcome, SimError> {
        match self.termination {
            Some(Termination::Escaped) => return Ok(Outcome::Escaped),
            Some(Termination::BlockedAtSource) => return Ok(Outcome::BlockedAtSource),
            None => {}
        }

        let source = self.grid.source();
        let outcome = settle::drop_unit(&mut self.grid, source, self.depth_limit)?;
        match outcome {
            Outcome::Settled(_) => self.settled += 1,
            Outcome::Escaped => self.finish(Termination::Escaped),
            Outcome::BlockedAtSource => {
                // The unit burying the source is part of the pile only when a floor holds it.
                if self.variant == Variant::ClosedFloor {
                    self.settled += 1;
                }
                self.finish(Termination::BlockedAtSource);
            }
        }
        Ok(outcome)
    }

    /// Drop units until the run terminates.
    ///
    /// # Errors
    ///
    /// `SimError::OutOfBounds` from the settling engine.
    pub fn run(&mut self) -> Result<RunReport, SimError> {
        loop {
            if let Some(report) = self.report() {
                return Ok(report);
            }
            self.step()?;
        }
    }

    /// Summary of a finished run.
    #[must_use]
    pub fn report(&self) -> Option<RunReport> {
        self.termination.map(|termination| RunReport {
            variant: self.variant,
            settled: self.settled,
            termination,
        })
    }

    #[must_use]
    pub fn settled(&self) -> usize {
        self.settled
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.termination.is_some()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    fn finish(&mut self, termination: Termination) {
        debug!(
            "{} run finished after {} settled units: {:?}",
            self.variant, self.settled, termination
        );
        self.termination = Some(termination);
    }
}
