//! Core state types for the circle solver.
//!
//! - `Body`       per-circle Verlet state (current + previous position)
//! - `BodyHandle` stable index returned by `Solver::spawn`
//! - `Color`      render tag carried through the solver untouched
//!
//! Velocity is never stored. It is implied by `position - position_prev`
//! over the sub-step length.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Index of a body inside its `Solver`. Bodies are never removed, so a
/// handle stays valid for the solver's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(crate) usize);

impl BodyHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Opaque display attribute. The solver stores it and hands it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Smoothly cycling hue, used by emitters to tint bodies by spawn time
    pub fn rainbow(t: f64) -> Self {
        let channel = |phase: f64| {
            let s = (t + phase * std::f64::consts::TAU).sin();
            (255.0 * s * s) as u8
        };
        Self {
            r: channel(0.0),
            g: channel(1.0 / 3.0),
            b: channel(2.0 / 3.0),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<[u8; 3]> for Color {
    fn from(c: [u8; 3]) -> Self {
        Color::new(c[0], c[1], c[2])
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub position: NVec2, // current position
    pub position_prev: NVec2, // position one sub-step ago
    pub accel: NVec2, // accumulator, cleared by `integrate`
    radius: f64, // fixed at creation
    pub color: Color, // render tag
}

impl Body {
    /// New body at rest. The radius is not checked here; `Solver::spawn`
    /// validates it, callers building bodies directly must pass a finite
    /// radius > 0 themselves.
    pub fn new(position: NVec2, radius: f64) -> Self {
        Self {
            position,
            position_prev: position,
            accel: NVec2::zeros(),
            radius,
            color: Color::default(),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Störmer–Verlet step:
    /// x_n+1 = x_n + (x_n - x_n-1) + a * dt^2
    pub fn integrate(&mut self, dt: f64) {
        let displacement = self.position - self.position_prev;
        self.position_prev = self.position;
        self.position += displacement + self.accel * (dt * dt);
        self.accel = NVec2::zeros();
    }

    pub fn accelerate(&mut self, a: NVec2) {
        self.accel += a;
    }

    /// Rewrite the previous position so the next step moves by `v * dt`
    pub fn set_velocity(&mut self, v: NVec2, dt: f64) {
        self.position_prev = self.position - v * dt;
    }

    pub fn add_velocity(&mut self, v: NVec2, dt: f64) {
        self.position_prev -= v * dt;
    }

    pub fn velocity(&self, dt: f64) -> NVec2 {
        (self.position - self.position_prev) / dt
    }
}
