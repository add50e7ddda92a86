//! Circular containment boundary

use crate::error::Result;
use crate::simulation::params::{check_radius, check_vec};
use crate::simulation::states::{Body, NVec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub center: NVec2,
    pub radius: f64,
}

impl Default for Boundary {
    fn default() -> Self {
        Self {
            center: NVec2::zeros(),
            radius: 100.0,
        }
    }
}

impl Boundary {
    pub fn new(center: NVec2, radius: f64) -> Result<Self> {
        check_vec("boundary center", center)?;
        check_radius("boundary radius", radius)?;
        Ok(Self { center, radius })
    }

    /// Largest center distance `body` may have. A body wider than the
    /// boundary gets 0 and is pinned to the center.
    pub fn allowed(&self, body: &Body) -> f64 {
        (self.radius - body.radius()).max(0.0)
    }

    pub fn contains(&self, body: &Body, tol: f64) -> bool {
        (body.position - self.center).norm() <= self.allowed(body) + tol
    }

    /// Project a body that left the boundary back onto its edge
    pub fn constrain(&self, body: &mut Body) {
        let to_obj = body.position - self.center;
        let dist = to_obj.norm();
        let allowed = self.allowed(body);
        // allowed >= 0, so dist > 0 here
        if dist > allowed {
            body.position = self.center + to_obj * (allowed / dist);
        }
    }
}

pub fn apply_constraint(bodies: &mut [Body], boundary: &Boundary) {
    for b in bodies.iter_mut() {
        boundary.constrain(b);
    }
}
