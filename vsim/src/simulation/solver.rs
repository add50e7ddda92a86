//! Sub-stepped Verlet solver
//!
//! `Solver` owns every body plus the simulation clock. One call to
//! [`Solver::update`] advances one external frame of `1 / update_rate`
//! seconds, split into `sub_steps` equal sub-steps. Each sub-step runs, in
//! this order and over all bodies before moving on:
//!
//! 1. gravity (and any extra acceleration terms) into the accumulators
//! 2. Verlet integration
//! 3. broad-phase rebuild + narrow-phase overlap resolution
//! 4. boundary constraint
//!
//! All validation happens in the mutation calls; `update` cannot fail.

use crate::error::{Error, Result};
use crate::simulation::collision::{collide, CollisionStats};
use crate::simulation::constraint::{apply_constraint, Boundary};
use crate::simulation::forces::{AccelSet, Acceleration};
use crate::simulation::integrator::{apply_gravity, verlet_integrator};
use crate::simulation::params::{check_radius, check_sub_steps, check_update_rate, check_vec, Parameters};
use crate::simulation::spatial::SpatialIndex;
use crate::simulation::states::{Body, BodyHandle, Color, NVec2};

/// Counters gathered over the last `update` call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepStats {
    pub sub_steps: u32,
    pub candidates: usize, // narrow-phase tests, summed over sub-steps
    pub contacts: usize, // resolved overlaps, summed over sub-steps
    pub populated_cells: usize, // grid cells in use after the last sub-step
    pub cell_size: f64, // effective grid cell edge
}

pub struct Solver {
    params: Parameters,
    boundary: Boundary,
    bodies: Vec<Body>,
    forces: AccelSet,
    index: SpatialIndex,
    max_radius: f64, // largest radius spawned so far, sizes the grid
    time: f64,
    stats: StepStats,
}

impl Default for Solver {
    fn default() -> Self {
        let params = Parameters::default();
        Self {
            index: SpatialIndex::new(params.cell_size),
            params,
            boundary: Boundary::default(),
            bodies: Vec::new(),
            forces: AccelSet::new(),
            max_radius: 0.0,
            time: 0.0,
            stats: StepStats::default(),
        }
    }
}

impl Solver {
    pub fn new(params: Parameters, boundary: Boundary) -> Result<Self> {
        params.validate()?;
        check_vec("boundary center", boundary.center)?;
        check_radius("boundary radius", boundary.radius)?;
        Ok(Self {
            index: SpatialIndex::new(params.cell_size),
            params,
            boundary,
            ..Self::default()
        })
    }

    // =========================================================================================
    // mutation
    // =========================================================================================

    /// Append a body at rest. The handle stays valid for the solver's lifetime.
    pub fn spawn(&mut self, position: NVec2, radius: f64) -> Result<BodyHandle> {
        check_vec("position", position)?;
        check_radius("radius", radius)?;
        let handle = BodyHandle(self.bodies.len());
        self.bodies.push(Body::new(position, radius));
        self.max_radius = self.max_radius.max(radius);
        Ok(handle)
    }

    /// Velocity in units per second, converted with the current sub-step length
    pub fn set_velocity(&mut self, handle: BodyHandle, v: NVec2) -> Result<()> {
        check_vec("velocity", v)?;
        let dt = self.step_dt();
        self.body_mut(handle)?.set_velocity(v, dt);
        Ok(())
    }

    pub fn add_velocity(&mut self, handle: BodyHandle, v: NVec2) -> Result<()> {
        check_vec("velocity", v)?;
        let dt = self.step_dt();
        self.body_mut(handle)?.add_velocity(v, dt);
        Ok(())
    }

    pub fn set_color(&mut self, handle: BodyHandle, color: Color) -> Result<()> {
        self.body_mut(handle)?.color = color;
        Ok(())
    }

    pub fn set_gravity(&mut self, gravity: NVec2) -> Result<()> {
        check_vec("gravity", gravity)?;
        self.params.gravity = gravity;
        Ok(())
    }

    pub fn set_boundary(&mut self, center: NVec2, radius: f64) -> Result<()> {
        self.boundary = Boundary::new(center, radius)?;
        Ok(())
    }

    pub fn set_sub_steps(&mut self, n: u32) -> Result<()> {
        check_sub_steps(n)?;
        self.params.sub_steps = n;
        Ok(())
    }

    /// Frames per second; sets `frame_dt = 1 / hz`
    pub fn set_update_rate(&mut self, hz: u32) -> Result<()> {
        check_update_rate(hz)?;
        self.params.update_rate = hz;
        Ok(())
    }

    /// Register an extra acceleration term, applied after gravity each sub-step
    pub fn add_force<T>(&mut self, term: T)
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.forces.push(term);
    }

    pub fn clear_forces(&mut self) {
        self.forces.clear();
    }

    // =========================================================================================
    // stepping
    // =========================================================================================

    /// Advance by one frame: `sub_steps` full sub-steps of `frame_dt / sub_steps`
    pub fn update(&mut self) {
        self.time += self.params.frame_dt();
        let step_dt = self.step_dt();

        let cell_size = self.params.cell_size.max(2.0 * self.max_radius);
        self.index.set_cell_size(cell_size);

        let mut stats = StepStats {
            sub_steps: self.params.sub_steps,
            cell_size,
            ..StepStats::default()
        };
        for _ in 0..self.params.sub_steps {
            let c = self.sub_step(step_dt);
            stats.candidates += c.candidates;
            stats.contacts += c.contacts;
        }
        stats.populated_cells = self.index.populated_cells();
        self.stats = stats;
    }

    fn sub_step(&mut self, dt: f64) -> CollisionStats {
        apply_gravity(&mut self.bodies, self.params.gravity);
        self.forces.accumulate(self.time, &mut self.bodies);
        verlet_integrator(&mut self.bodies, dt);
        let stats = collide(&mut self.bodies, &mut self.index, &self.params);
        apply_constraint(&mut self.bodies, &self.boundary);
        stats
    }

    // =========================================================================================
    // queries
    // =========================================================================================

    /// Snapshot as of the last `update`, in creation order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.0)
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body> {
        self.bodies
            .get_mut(handle.0)
            .ok_or(Error::UnknownBody(handle.0))
    }

    pub fn velocity(&self, handle: BodyHandle) -> Result<NVec2> {
        let b = self.body(handle).ok_or(Error::UnknownBody(handle.0))?;
        Ok(b.velocity(self.step_dt()))
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn gravity(&self) -> NVec2 {
        self.params.gravity
    }

    pub fn sub_steps(&self) -> u32 {
        self.params.sub_steps
    }

    pub fn frame_dt(&self) -> f64 {
        self.params.frame_dt()
    }

    pub fn step_dt(&self) -> f64 {
        self.params.step_dt()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn stats(&self) -> StepStats {
        self.stats
    }
}
