use std::time::Instant;
use crate::error::Result;
use crate::simulation::states::{Body, NVec2};
use crate::simulation::params::Parameters;
use crate::simulation::collision::{collide, resolve_pair};
use crate::simulation::constraint::Boundary;
use crate::simulation::spatial::SpatialIndex;
use crate::simulation::solver::Solver;

const BODY_RADIUS: f64 = 3.0;
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Container radius that leaves room for `n` bodies of `BODY_RADIUS`
fn boundary_radius(n: usize) -> f64 {
    let d = 2.0 * BODY_RADIUS;
    (n as f64 * d * d * 1.5 / std::f64::consts::PI).sqrt() + 10.0 * d
}

/// Deterministic sunflower layout, no rand needed
fn make_bodies(n: usize) -> Vec<Body> {
    let r_max = 0.9 * boundary_radius(n);
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            let r = r_max * (i_f / n as f64).sqrt();
            let theta = i_f * GOLDEN_ANGLE;
            Body::new(NVec2::new(r * theta.cos(), r * theta.sin()), BODY_RADIUS)
        })
        .collect()
}

/// Helper to build a solver holding `n` bodies
fn make_solver(n: usize) -> Result<Solver> {
    let boundary = Boundary::new(NVec2::zeros(), boundary_radius(n))?;
    let mut solver = Solver::new(Parameters::default(), boundary)?;
    for b in make_bodies(n) {
        solver.spawn(b.position, b.radius())?;
    }
    Ok(solver)
}

/// All-pairs reference pass the grid is measured against
fn brute_force_collide(bodies: &mut [Body], params: &Parameters) {
    let n = bodies.len();
    for i in 0..n {
        let (lo, hi) = bodies.split_at_mut(i + 1);
        let a = &mut lo[i];
        for b in hi.iter_mut() {
            resolve_pair(a, b, params.response_coef, params.eps);
        }
    }
}

/// One collision pass: uniform grid vs. all pairs
pub fn bench_collide() {
    let ns = [500, 1000, 2000, 4000, 8000];
    let params = Parameters::default();

    for n in ns {
        let template = make_bodies(n);
        let mut index = SpatialIndex::new(params.cell_size);

        // Warm up so the grid storage is already sized
        let mut bodies = template.clone();
        collide(&mut bodies, &mut index, &params);

        let mut bodies = template.clone();
        let t0 = Instant::now();
        collide(&mut bodies, &mut index, &params);
        let dt_grid = t0.elapsed().as_secs_f64();

        let mut bodies = template.clone();
        let t1 = Instant::now();
        brute_force_collide(&mut bodies, &params);
        let dt_brute = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, grid = {:8.6} s, all-pairs = {:8.6} s", dt_grid, dt_brute);
    }
}

/// Full `update()` cost, default sub-stepping
pub fn bench_update() -> Result<()> {
    let ns = [500, 1000, 2000, 4000, 8000, 16000];
    let steps = 10;

    for n in ns {
        let mut solver = make_solver(n)?;

        // Warm-up
        solver.update();

        let t0 = Instant::now();
        for _ in 0..steps {
            solver.update();
        }
        let per_update = t0.elapsed().as_secs_f64() / steps as f64;
        let stats = solver.stats();

        println!(
            "N = {:5}, update = {:8.6} s, contacts/update = {:7}, cells = {:5}",
            n, per_update, stats.contacts, stats.populated_cells
        );
    }
    Ok(())
}

/// ms per `update()` for a range of n
/// Paste output directly into excel to graph
pub fn bench_update_curve() -> Result<()> {
    println!("N,update_ms");

    for n in (500..=20000).step_by(500) {
        // Small n: average over a few frames to smooth noise
        let steps = if n <= 5000 { 5 } else { 2 };
        let mut solver = make_solver(n)?;
        solver.update();

        let t0 = Instant::now();
        for _ in 0..steps {
            solver.update();
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
    Ok(())
}
