//! Run parameters.
//!
//! `Params` is built once before a run (usually from the command line, see
//! [`crate::cli`]) and is never mutated while stepping.

use std::path::PathBuf;

use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct Params {
    pub output: PathBuf, // trajectory file
    pub npart: usize,    // requested particle count
    pub nframes: usize,  // frames written, including the initial one
    pub npframe: usize,  // steps between frames
    pub dt: f64,         // time step
    pub eps: f64,        // LJ well depth
    pub sigma: f64,      // LJ range
    pub gravity: f64,    // external field strength
    pub t0: f64,         // initial temperature
    pub seed: Option<u64>,
    pub monitor_energy: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            output: PathBuf::from("run.out"),
            npart: 500,
            nframes: 400,
            npframe: 50,
            dt: 1e-4,
            eps: 1.0,
            sigma: 1e-2,
            gravity: 1.0,
            t0: 1.0,
            seed: None,
            monitor_energy: false,
        }
    }
}

impl Params {
    /// Total number of integration steps a run performs
    pub fn total_steps(&self) -> usize {
        self.nframes.saturating_sub(1) * self.npframe
    }

    pub fn validate(&self) -> Result<()> {
        if self.npart == 0 {
            return Err(Error::config("particle count should be positive"));
        }
        if self.nframes == 0 {
            return Err(Error::config("frame count should be positive"));
        }
        if self.npframe == 0 {
            return Err(Error::config("steps per frame should be positive"));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(Error::config(format!(
                "time step should be positive, found {}",
                self.dt
            )));
        }
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(Error::config(format!(
                "sigma should be positive, found {}",
                self.sigma
            )));
        }
        if !(self.eps.is_finite() && self.eps >= 0.0) {
            return Err(Error::config(format!(
                "epsilon should be non-negative, found {}",
                self.eps
            )));
        }
        if !(self.t0.is_finite() && self.t0 >= 0.0) {
            return Err(Error::config(format!(
                "temperature should be non-negative, found {}",
                self.t0
            )));
        }
        if !self.gravity.is_finite() {
            return Err(Error::config("field strength should be finite"));
        }
        Ok(())
    }
}
