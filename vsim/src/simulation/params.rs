//! Numerical and physical parameters for the solver
//!
//! `Parameters` holds runtime settings:
//! - gravity, sub-step count and update rate (frame length),
//! - broad-phase cell size,
//! - collision response coefficient and coincidence threshold

use crate::error::{Error, Result};
use crate::simulation::states::NVec2;

pub const DEFAULT_GRAVITY: [f64; 2] = [0.0, 1000.0];
pub const DEFAULT_SUB_STEPS: u32 = 8;
pub const DEFAULT_UPDATE_RATE: u32 = 60;
pub const DEFAULT_CELL_SIZE: f64 = 50.0;
pub const DEFAULT_RESPONSE_COEF: f64 = 0.75;
pub const COINCIDENT_EPS: f64 = 1e-4;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub gravity: NVec2, // constant acceleration field
    pub sub_steps: u32, // sub-steps per update, >= 1
    pub update_rate: u32, // updates per second, frame_dt = 1 / update_rate
    pub cell_size: f64, // nominal broad-phase cell edge
    pub response_coef: f64, // overlap correction damping, (0, 1]
    pub eps: f64, // pairs closer than this are left alone
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            gravity: NVec2::new(DEFAULT_GRAVITY[0], DEFAULT_GRAVITY[1]),
            sub_steps: DEFAULT_SUB_STEPS,
            update_rate: DEFAULT_UPDATE_RATE,
            cell_size: DEFAULT_CELL_SIZE,
            response_coef: DEFAULT_RESPONSE_COEF,
            eps: COINCIDENT_EPS,
        }
    }
}

impl Parameters {
    pub fn frame_dt(&self) -> f64 {
        1.0 / self.update_rate as f64
    }

    pub fn step_dt(&self) -> f64 {
        self.frame_dt() / self.sub_steps as f64
    }

    /// Reject settings that would divide by zero or make the grid degenerate
    pub fn validate(&self) -> Result<()> {
        check_vec("gravity", self.gravity)?;
        check_sub_steps(self.sub_steps)?;
        check_update_rate(self.update_rate)?;
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(Error::invalid("cell_size must be finite and > 0"));
        }
        if !(self.response_coef > 0.0 && self.response_coef <= 1.0) {
            return Err(Error::invalid("response_coef must be in (0, 1]"));
        }
        if !self.eps.is_finite() || self.eps < 0.0 {
            return Err(Error::invalid("eps must be finite and >= 0"));
        }
        Ok(())
    }
}

pub(crate) fn check_sub_steps(n: u32) -> Result<()> {
    if n == 0 {
        return Err(Error::invalid("sub_steps must be >= 1"));
    }
    Ok(())
}

pub(crate) fn check_update_rate(hz: u32) -> Result<()> {
    if hz == 0 {
        return Err(Error::invalid("update_rate must be > 0"));
    }
    Ok(())
}

pub(crate) fn check_vec(name: &str, v: NVec2) -> Result<()> {
    if !(v.x.is_finite() && v.y.is_finite()) {
        return Err(Error::invalid(format!("{name} must be finite")));
    }
    Ok(())
}

pub(crate) fn check_radius(name: &str, r: f64) -> Result<()> {
    if !r.is_finite() || r <= 0.0 {
        return Err(Error::invalid(format!("{name} must be finite and > 0")));
    }
    Ok(())
}
