//! Timed body source
//!
//! An emitter sits at a fixed point and, between solver updates, spawns a
//! body every `interval` seconds of simulation time until `max_count` is
//! reached. Launch direction sweeps around `angle`:
//!
//! ```text
//! theta(t) = angle + sweep * sin(sweep_rate * t)
//! ```
//!
//! Spawned bodies are tinted with `Color::rainbow(t)`.
//!
//! Each `tick` spawns at most one body, so an `interval` shorter than the
//! solver's frame time emits one body per frame.

use crate::configuration::config::EmitterConfig;
use crate::error::{Error, Result};
use crate::simulation::params::{check_radius, check_vec};
use crate::simulation::solver::Solver;
use crate::simulation::states::{BodyHandle, Color, NVec2};

#[derive(Debug, Clone)]
pub struct Emitter {
    pub position: NVec2,
    pub speed: f64,
    pub radius: f64,
    pub interval: f64, // at most one spawn per tick, so intervals below frame_dt cap at one per frame
    pub max_count: usize,
    pub angle: f64,
    pub sweep: f64,
    pub sweep_rate: f64,
    emitted: usize,
    next_spawn: f64, // simulation time of the next spawn
}

impl Emitter {
    /// Straight-down emitter (+y is down in screen space) without sweep
    pub fn new(position: NVec2, speed: f64, radius: f64, interval: f64, max_count: usize) -> Result<Self> {
        check_vec("emitter position", position)?;
        check_radius("emitter radius", radius)?;
        if !speed.is_finite() {
            return Err(Error::invalid("emitter speed must be finite"));
        }
        if !interval.is_finite() || interval <= 0.0 {
            return Err(Error::invalid("emitter interval must be finite and > 0"));
        }
        Ok(Self {
            position,
            speed,
            radius,
            interval,
            max_count,
            angle: std::f64::consts::FRAC_PI_2,
            sweep: 0.0,
            sweep_rate: 1.0,
            emitted: 0,
            next_spawn: 0.0,
        })
    }

    pub fn with_sweep(mut self, angle: f64, sweep: f64, sweep_rate: f64) -> Result<Self> {
        if !(angle.is_finite() && sweep.is_finite() && sweep_rate.is_finite()) {
            return Err(Error::invalid("emitter angles must be finite"));
        }
        self.angle = angle;
        self.sweep = sweep;
        self.sweep_rate = sweep_rate;
        Ok(self)
    }

    pub fn from_config(cfg: &EmitterConfig) -> Result<Self> {
        let emitter = Self::new(
            NVec2::new(cfg.position[0], cfg.position[1]),
            cfg.speed,
            cfg.radius,
            cfg.interval,
            cfg.max_count,
        )?;
        let angle = cfg.angle.unwrap_or(emitter.angle);
        let sweep = cfg.sweep.unwrap_or(emitter.sweep);
        let sweep_rate = cfg.sweep_rate.unwrap_or(emitter.sweep_rate);
        emitter.with_sweep(angle, sweep, sweep_rate)
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn is_done(&self) -> bool {
        self.emitted >= self.max_count
    }

    /// Unit launch direction at time `t`
    pub fn direction(&self, t: f64) -> NVec2 {
        let theta = self.angle + self.sweep * (self.sweep_rate * t).sin();
        NVec2::new(theta.cos(), theta.sin())
    }

    /// Spawn at most one body if the interval has elapsed
    pub fn tick(&mut self, solver: &mut Solver) -> Result<Option<BodyHandle>> {
        let t = solver.time();
        if self.is_done() || t < self.next_spawn {
            return Ok(None);
        }

        let handle = solver.spawn(self.position, self.radius)?;
        solver.set_velocity(handle, self.direction(t) * self.speed)?;
        solver.set_color(handle, Color::rainbow(t))?;

        self.emitted += 1;
        self.next_spawn = t + self.interval;
        Ok(Some(handle))
    }
}
