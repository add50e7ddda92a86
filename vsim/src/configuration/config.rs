//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`SolverConfig`]    – gravity, stepping, boundary and grid settings
//! - [`BodyConfig`]      – bodies present at t = 0
//! - [`EmitterConfig`]   – sources that spawn bodies while the run goes on
//! - [`AttractorConfig`] – extra point attractors
//! - [`ScenarioConfig`]  – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! solver:
//!   gravity: [0.0, 1000.0]
//!   sub_steps: 8
//!   update_rate: 60         # frames per second
//!   boundary:
//!     center: [500.0, 500.0]
//!     radius: 450.0
//!   cell_size: 50.0         # optional
//!   response_coef: 0.75     # optional
//!
//! frames: 600
//!
//! bodies:
//!   - x: [200.0, 300.0]
//!     radius: 20.0
//!   - x: [700.0, 300.0]
//!     v: [-100.0, 0.0]
//!     radius: 10.0
//!     color: [255, 80, 80]
//!
//! emitters:
//!   - position: [500.0, 200.0]
//!     speed: 1200.0
//!     radius: 8.0
//!     interval: 0.025
//!     max_count: 500
//! ```
//!
//! Missing optional fields fall back to the defaults in
//! `simulation::params`. The `Scenario` builder validates everything.

use serde::Deserialize;

/// Circular container
#[derive(Deserialize, Debug, Clone)]
pub struct BoundaryConfig {
    pub center: [f64; 2],
    pub radius: f64,
}

/// Solver-wide settings
#[derive(Deserialize, Debug, Clone)]
pub struct SolverConfig {
    pub gravity: Option<[f64; 2]>, // defaults to (0, 1000)
    pub sub_steps: Option<u32>, // sub-steps per frame, >= 1
    pub update_rate: Option<u32>, // frames per second, > 0
    pub boundary: BoundaryConfig,
    pub cell_size: Option<f64>, // broad-phase cell edge
    pub response_coef: Option<f64>, // overlap correction damping
}

/// Initial state of one body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position
    pub v: Option<[f64; 2]>, // initial velocity in units per second
    pub radius: f64,
    pub color: Option<[u8; 3]>,
}

/// A fixed source spawning bodies over time, aimed along a sweeping angle
#[derive(Deserialize, Debug, Clone)]
pub struct EmitterConfig {
    pub position: [f64; 2],
    pub speed: f64, // launch speed
    pub radius: f64, // radius of spawned bodies
    pub interval: f64, // seconds between spawns
    pub max_count: usize, // stop after this many
    pub angle: Option<f64>, // base launch angle (radians), defaults to straight down (+y)
    pub sweep: Option<f64>, // sweep amplitude (radians)
    pub sweep_rate: Option<f64>, // sweep angular frequency (radians per second)
}

/// Constant-magnitude pull toward a point
#[derive(Deserialize, Debug, Clone)]
pub struct AttractorConfig {
    pub center: [f64; 2],
    pub strength: f64,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub solver: SolverConfig,
    pub frames: Option<u64>, // frames to run headless
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub emitters: Vec<EmitterConfig>,
    #[serde(default)]
    pub attractors: Vec<AttractorConfig>,
}
