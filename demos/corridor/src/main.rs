//! corridor — smallest demo for the crowd simulation framework.
//!
//! Twenty pedestrians enter a 30 m corridor on the left, walk to an exit on
//! the right, wait two seconds in the exit zone, and leave.  Three of them
//! carry an infection that spreads to nearby walkers on the way.  Set
//! `RUST_LOG=debug` to watch spawns, arrivals, and removals as they happen.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use crowd_output::{CsvWriter, OutputWriter, SimOutputObserver};
use crowd_sim::{SimObserver, SimulationBuilder, StepView};

// ── Constants ─────────────────────────────────────────────────────────────────

const TRAJECTORY_INTERVAL_STEPS: u64 = 1; // record every step
const SAMPLE_EVERY_STEPS:        u64 = 25;

// ── Scenario ──────────────────────────────────────────────────────────────────

const SCENARIO_JSON: &str = r#"{
    "name": "corridor",
    "simulation": { "step_length_secs": 0.4, "finish_time_secs": 60.0, "seed": 42 },
    "topography": {
        "bounds": { "x": 0.0, "y": 0.0, "width": 30.0, "height": 5.0 },
        "targets": [
            {
                "id": 1,
                "shape": { "type": "circle", "center": { "x": 28.0, "y": 2.5 }, "radius": 1.0 },
                "waiter": {
                    "enabled": true,
                    "distribution": { "type": "constant", "update_frequency_secs": 2.0 },
                    "individual_waiting": true
                }
            }
        ],
        "sources": [
            {
                "id": 1,
                "shape": { "type": "rectangle", "x": 1.0, "y": 1.5, "width": 1.5, "height": 2.0 },
                "spawner": {
                    "distribution": { "type": "constant", "update_frequency_secs": 0.5 },
                    "max_spawn_total": 20,
                    "spawn_at_random_positions": true
                },
                "target_ids": [1]
            }
        ]
    },
    "models": {
        "sir": {
            "infection_rate_per_second": 0.5,
            "recovery_rate_per_second": 0.02,
            "infection_max_distance_m": 1.0,
            "infections_at_start": 3
        },
        "cognition": "target_oriented"
    }
}"#;

// ── Observer wrapper to count rows and sample the run ─────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:           SimOutputObserver<W>,
    trajectory_rows: usize,
    summary_rows:    usize,
    peak_infected:   usize,
    samples:         Vec<(u64, f64, usize, usize, usize, usize)>,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self {
            inner,
            trajectory_rows: 0,
            summary_rows:    0,
            peak_infected:   0,
            samples:         Vec::new(),
        }
    }

    fn record(&mut self, view: &StepView<'_>) {
        self.summary_rows += 1;
        if view.step % TRAJECTORY_INTERVAL_STEPS == 0 {
            self.trajectory_rows += view.topography.agent_count();
        }
        let (susceptible, infected, removed) = view
            .compartments
            .map_or((0, 0, 0), |c| (c.susceptible, c.infected, c.removed));
        self.peak_infected = self.peak_infected.max(infected);
        if view.step % SAMPLE_EVERY_STEPS == 0 {
            self.samples.push((
                view.step,
                view.time_secs,
                view.topography.agent_count(),
                susceptible,
                infected,
                removed,
            ));
        }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn run_started(&mut self, view: &StepView<'_>) {
        self.record(view);
        self.inner.run_started(view);
    }

    fn step_finished(&mut self, view: &StepView<'_>) {
        self.record(view);
        self.inner.step_finished(view);
    }

    fn run_finished(&mut self, view: &StepView<'_>) {
        self.inner.run_finished(view);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== corridor — crowd simulation framework ===");
    println!();

    // 1. Build the simulation from the embedded scenario document.
    let mut sim = SimulationBuilder::from_json(SCENARIO_JSON)?.build()?;
    println!(
        "Scenario '{}': {:.0} s at {} s per step",
        sim.name(),
        sim.finish_time_secs(),
        sim.clock().step_length_secs
    );

    // 2. Set up CSV output.
    std::fs::create_dir_all("output/corridor")?;
    let writer = CsvWriter::new(Path::new("output/corridor"))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer, TRAJECTORY_INTERVAL_STEPS));

    // 3. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 4. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  trajectories.csv   : {} rows", obs.trajectory_rows);
    println!("  step_summaries.csv : {} rows", obs.summary_rows);
    println!("  peak infected      : {}", obs.peak_infected);
    println!("  agents remaining   : {}", sim.topography().agent_count());
    println!();

    // 5. Compartment counts over the run.
    println!("{:<6} {:<8} {:<7} {:<12} {:<9} {:<8}", "Step", "Time", "Agents", "Susceptible", "Infected", "Removed");
    println!("{}", "-".repeat(54));
    for (step, time_secs, agents, susceptible, infected, removed) in &obs.samples {
        println!(
            "{:<6} {:<8.1} {:<7} {:<12} {:<9} {:<8}",
            step, time_secs, agents, susceptible, infected, removed
        );
    }

    Ok(())
}
