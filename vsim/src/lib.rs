pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{Error, Result};

pub use simulation::states::{Body, BodyHandle, Color, NVec2};
pub use simulation::params::Parameters;
pub use simulation::forces::{Acceleration, AccelSet, PointAttractor};
pub use simulation::integrator::{apply_gravity, verlet_integrator};
pub use simulation::spatial::{Cell, SpatialIndex};
pub use simulation::collision::{collide, resolve_pair, CollisionStats};
pub use simulation::constraint::{apply_constraint, Boundary};
pub use simulation::solver::{Solver, StepStats};
pub use simulation::emitter::Emitter;
pub use simulation::scenario::Scenario;

pub use configuration::config::{SolverConfig, BoundaryConfig, BodyConfig, EmitterConfig, AttractorConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_collide, bench_update, bench_update_curve};
