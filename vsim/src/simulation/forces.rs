//! Acceleration contributors beyond uniform gravity
//!
//! Gravity is a plain vector on the solver. Anything else that should pull
//! on bodies (an input-driven attractor, for example) implements
//! [`Acceleration`] and is registered in the solver's [`AccelSet`].

use crate::error::{Error, Result};
use crate::simulation::params::check_vec;
use crate::simulation::states::{Body, NVec2};

/// Collection of acceleration terms
/// Each term's contribution is added to every body's accumulator
#[derive(Default)]
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.push(term);
        self
    }

    pub fn push<T>(&mut self, term: T)
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    /// Add every term's acceleration at time `t` into each body's accumulator
    pub fn accumulate(&self, t: f64, bodies: &mut [Body]) {
        for term in &self.terms {
            for body in bodies.iter_mut() {
                let a = term.acceleration(t, body);
                body.accelerate(a);
            }
        }
    }
}

/// Trait for acceleration sources acting on a single body
pub trait Acceleration {
    fn acceleration(&self, t: f64, body: &Body) -> NVec2;
}

/// Constant-magnitude pull toward a point
/// Negative strength pushes away instead
pub struct PointAttractor {
    pub center: NVec2,
    pub strength: f64,
}

impl PointAttractor {
    pub fn new(center: NVec2, strength: f64) -> Result<Self> {
        check_vec("attractor center", center)?;
        if !strength.is_finite() {
            return Err(Error::invalid("attractor strength must be finite"));
        }
        Ok(Self { center, strength })
    }
}

impl Acceleration for PointAttractor {
    fn acceleration(&self, _t: f64, body: &Body) -> NVec2 {
        let r = self.center - body.position;
        let dist = r.norm();
        // no defined direction at the center itself
        if dist < 1e-9 {
            return NVec2::zeros();
        }
        r * (self.strength / dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attractor_points_toward_center() {
        let att = PointAttractor { center: NVec2::new(10.0, 0.0), strength: 5.0 };
        let b = Body::new(NVec2::new(0.0, 0.0), 1.0);
        let a = att.acceleration(0.0, &b);
        assert!((a - NVec2::new(5.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn attractor_is_silent_at_its_center() {
        let att = PointAttractor { center: NVec2::new(1.0, 1.0), strength: 5.0 };
        let b = Body::new(NVec2::new(1.0, 1.0), 1.0);
        assert_eq!(att.acceleration(0.0, &b), NVec2::zeros());
    }

    #[test]
    fn attractor_rejects_non_finite_input() {
        assert!(PointAttractor::new(NVec2::new(f64::INFINITY, 0.0), 1.0).is_err());
        assert!(PointAttractor::new(NVec2::zeros(), f64::NAN).is_err());
        assert!(PointAttractor::new(NVec2::zeros(), -2.0).is_ok());
    }

    #[test]
    fn accel_set_sums_terms() {
        let set = AccelSet::new()
            .with(PointAttractor { center: NVec2::new(1.0, 0.0), strength: 2.0 })
            .with(PointAttractor { center: NVec2::new(0.0, 1.0), strength: 3.0 });
        let mut bodies = vec![Body::new(NVec2::zeros(), 1.0)];
        set.accumulate(0.0, &mut bodies);
        assert_eq!(set.len(), 2);
        assert!((bodies[0].accel - NVec2::new(2.0, 3.0)).norm() < 1e-12);
    }
}
