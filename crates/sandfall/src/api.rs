//! Browser-facing wrapper around a simulation run.

use wasm_bindgen::prelude::*;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::parse::parse_scan;
use crate::render::render_cropped;
use crate::sim::{Simulation, Variant};

/// A cave built from scan text, stepped from JS one unit at a time.
#[wasm_bindgen]
#[derive(Debug)]
pub struct Cave {
    sim: Simulation,
    padding: usize,
}

#[wasm_bindgen]
impl Cave {
    /// # Errors
    ///
    /// A JS error carrying the parse or build failure.
    #[wasm_bindgen(constructor)]
    pub fn new(scan: &str, closed_floor: bool) -> Result<Cave, JsError> {
        Self::from_scan(scan, closed_floor, &SimConfig::default())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Drop one unit. Returns `true` while the run is still going.
    ///
    /// # Errors
    ///
    /// A JS error if the grid was under-provisioned.
    pub fn step(&mut self) -> Result<bool, JsError> {
        self.sim.step().map_err(|e| JsError::new(&e.to_string()))?;
        Ok(!self.sim.is_finished())
    }

    /// Run to completion and return the settled count.
    ///
    /// # Errors
    ///
    /// A JS error if the grid was under-provisioned.
    pub fn run(&mut self) -> Result<usize, JsError> {
        let report = self.sim.run().map_err(|e| JsError::new(&e.to_string()))?;
        Ok(report.settled)
    }

    #[must_use]
    pub fn settled(&self) -> usize {
        self.sim.settled()
    }

    #[must_use]
    pub fn finished(&self) -> bool {
        self.sim.is_finished()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.sim.grid().width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.sim.grid().height()
    }

    /// Cell discriminants, row-major.
    #[must_use]
    pub fn cells(&self) -> Vec<u8> {
        self.sim.grid().cells().iter().map(|&c| c as u8).collect()
    }

    #[must_use]
    pub fn render(&self) -> String {
        render_cropped(self.sim.grid(), self.padding)
    }
}

impl Cave {
    /// Native constructor; `new` is the JS entry point.
    ///
    /// # Errors
    ///
    /// Anything the scan reader or grid builder rejects.
    pub fn from_scan(
        scan: &str,
        closed_floor: bool,
        config: &SimConfig,
    ) -> Result<Self, SimError> {
        let paths = parse_scan(scan)?;
        let variant = if closed_floor {
            Variant::ClosedFloor
        } else {
            Variant::OpenFloor
        };
        let sim = Simulation::from_paths(&paths, variant, config)?;
        Ok(Self {
            sim,
            padding: config.crop_padding,
        })
    }
}
