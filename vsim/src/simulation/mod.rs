pub mod states;
pub mod params;
pub mod forces;
pub mod integrator;
pub mod spatial;
pub mod collision;
pub mod constraint;
pub mod solver;
pub mod emitter;
pub mod scenario;
