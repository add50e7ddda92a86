//! Fixed-step position Verlet over the whole body set
//!
//! Gravity is accumulated into every body before any body is integrated.
//! The solver calls the two phases in that order each sub-step.

use super::states::{Body, NVec2};

/// Add the uniform gravity field to every body's accumulator
pub fn apply_gravity(bodies: &mut [Body], gravity: NVec2) {
    for b in bodies.iter_mut() {
        b.accelerate(gravity);
    }
}

/// Advance every body by one sub-step of length `dt`
/// x_n+1 = 2 x_n - x_n-1 + a dt^2, accumulators cleared afterwards
pub fn verlet_integrator(bodies: &mut [Body], dt: f64) {
    for b in bodies.iter_mut() {
        b.integrate(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_fall_matches_closed_form() {
        // Starting at rest, n Verlet steps give y = a dt^2 n(n+1)/2
        let g = NVec2::new(0.0, 100.0);
        let dt = 0.01;
        let mut bodies = vec![Body::new(NVec2::zeros(), 1.0)];
        let n = 10;
        for _ in 0..n {
            apply_gravity(&mut bodies, g);
            verlet_integrator(&mut bodies, dt);
        }
        let expected = 100.0 * dt * dt * (n * (n + 1)) as f64 / 2.0;
        assert!((bodies[0].position.y - expected).abs() < 1e-12);
        assert_eq!(bodies[0].position.x, 0.0);
    }

    #[test]
    fn zero_gravity_body_at_rest_stays_put() {
        let mut bodies = vec![Body::new(NVec2::new(3.0, 4.0), 1.0)];
        for _ in 0..100 {
            apply_gravity(&mut bodies, NVec2::zeros());
            verlet_integrator(&mut bodies, 1.0 / 480.0);
        }
        assert_eq!(bodies[0].position, NVec2::new(3.0, 4.0));
    }
}
