//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - the solver (`Solver`) with validated parameters and boundary
//! - every configured body spawned at t = 0, with velocity and color applied
//! - extra acceleration terms registered on the solver
//! - emitters that keep spawning bodies while the scenario runs

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::Result;
use crate::simulation::constraint::Boundary;
use crate::simulation::emitter::Emitter;
use crate::simulation::forces::PointAttractor;
use crate::simulation::params::{
    Parameters, COINCIDENT_EPS, DEFAULT_CELL_SIZE, DEFAULT_GRAVITY, DEFAULT_RESPONSE_COEF,
    DEFAULT_SUB_STEPS, DEFAULT_UPDATE_RATE,
};
use crate::simulation::solver::Solver;
use crate::simulation::states::{Color, NVec2};

pub const DEFAULT_FRAMES: u64 = 600;

pub struct Scenario {
    pub solver: Solver,
    pub emitters: Vec<Emitter>,
    pub frames: u64, // frames a headless run lasts
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Parameters (runtime) from SolverConfig
        let s_cfg = cfg.solver;
        let gravity = s_cfg.gravity.unwrap_or(DEFAULT_GRAVITY);
        let parameters = Parameters {
            gravity: NVec2::new(gravity[0], gravity[1]),
            sub_steps: s_cfg.sub_steps.unwrap_or(DEFAULT_SUB_STEPS),
            update_rate: s_cfg.update_rate.unwrap_or(DEFAULT_UPDATE_RATE),
            cell_size: s_cfg.cell_size.unwrap_or(DEFAULT_CELL_SIZE),
            response_coef: s_cfg.response_coef.unwrap_or(DEFAULT_RESPONSE_COEF),
            eps: COINCIDENT_EPS,
        };

        let b_cfg = s_cfg.boundary;
        let boundary = Boundary::new(NVec2::new(b_cfg.center[0], b_cfg.center[1]), b_cfg.radius)?;

        let mut solver = Solver::new(parameters, boundary)?;

        // Bodies: spawn in file order so handles match list positions
        for bc in &cfg.bodies {
            spawn_body(&mut solver, bc)?;
        }

        for ac in &cfg.attractors {
            let center = NVec2::new(ac.center[0], ac.center[1]);
            solver.add_force(PointAttractor::new(center, ac.strength)?);
        }

        let emitters = cfg
            .emitters
            .iter()
            .map(Emitter::from_config)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            solver,
            emitters,
            frames: cfg.frames.unwrap_or(DEFAULT_FRAMES),
        })
    }

    /// Read and build a scenario from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
        Self::build_scenario(cfg)
    }

    /// Let emitters fire, then advance the solver by one frame
    pub fn step(&mut self) -> Result<()> {
        for emitter in self.emitters.iter_mut() {
            emitter.tick(&mut self.solver)?;
        }
        self.solver.update();
        Ok(())
    }

    /// Run all configured frames
    pub fn run(&mut self) -> Result<()> {
        for _ in 0..self.frames {
            self.step()?;
        }
        Ok(())
    }
}

fn spawn_body(solver: &mut Solver, bc: &BodyConfig) -> Result<()> {
    let handle = solver.spawn(NVec2::new(bc.x[0], bc.x[1]), bc.radius)?;
    if let Some(v) = bc.v {
        solver.set_velocity(handle, NVec2::new(v[0], v[1]))?;
    }
    if let Some(c) = bc.color {
        solver.set_color(handle, Color::from(c))?;
    }
    Ok(())
}
