use vsim::Scenario;
use vsim::{bench_collide, bench_update, bench_update_curve};

use clap::Parser;
use anyhow::{Context, Result};

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, looked up in `scenarios/` unless it is an existing path
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Override the number of frames to run
    #[arg(long)]
    frames: Option<u64>,

    /// Print a progress line every this many frames (0 = summary only)
    #[arg(long, default_value_t = 60)]
    report_every: u64,

    /// Run the benchmark suite instead of a scenario
    #[arg(long)]
    bench: bool,
}

fn scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.is_file() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

fn run_headless(mut scenario: Scenario, report_every: u64) -> Result<()> {
    println!(
        "vsim: {} frames, {} bodies, {} sub-steps at {} Hz",
        scenario.frames,
        scenario.solver.body_count(),
        scenario.solver.sub_steps(),
        (1.0 / scenario.solver.frame_dt()).round()
    );

    for frame in 1..=scenario.frames {
        scenario.step()?;

        if report_every > 0 && frame % report_every == 0 {
            let solver = &scenario.solver;
            let stats = solver.stats();
            let dt = solver.step_dt();
            let max_speed = solver
                .bodies()
                .iter()
                .map(|b| b.velocity(dt).norm())
                .fold(0.0, f64::max);
            println!(
                "frame {:6}  t = {:8.3}  bodies = {:6}  contacts = {:7}  cells = {:5}  max |v| = {:9.2}",
                frame, solver.time(), solver.body_count(), stats.contacts, stats.populated_cells, max_speed
            );
        }
    }

    let solver = &scenario.solver;
    let boundary = solver.boundary();
    let escaped = solver.bodies().iter().filter(|b| !boundary.contains(b, 1e-6)).count();
    println!(
        "done: t = {:.3}, bodies = {}, outside boundary = {}",
        solver.time(),
        solver.body_count(),
        escaped
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_collide();
        bench_update()?;
        bench_update_curve()?;
        return Ok(());
    }

    let path = scenario_path(&args.file_name);
    let mut scenario = Scenario::load(&path)
        .with_context(|| format!("loading scenario {}", path.display()))?;
    if let Some(frames) = args.frames {
        scenario.frames = frames;
    }

    run_headless(scenario, args.report_every)
}
