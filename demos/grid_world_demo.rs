// Demonstration: solve a grid world, print the value table, and evaluate a policy.
//
// Build/run from this repo root:
//   RUST_LOG=gridmdp=debug cargo run --example grid_world_demo -- --policy optimal --episodes 50

use std::env;

use gridmdp::{EvaluationMetrics, Grid, PolicyKind, Simulation, SimulationConfig};
use tracing_subscriber::EnvFilter;

const LAYOUT: &str = "
    S....
    .##..
    ...#.
    .#...
    ...#T
";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let policy: PolicyKind = match arg_value(&args, "--policy").unwrap_or("optimal").parse() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    let episodes: usize = arg_value(&args, "--episodes")
        .and_then(|s| s.parse().ok())
        .unwrap_or(25);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let grid: Grid = match LAYOUT.parse() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("bad layout: {}", e);
            std::process::exit(2);
        }
    };
    let config = SimulationConfig {
        seed: Some(seed),
        ..SimulationConfig::default()
    };
    let mut sim = match Simulation::from_grid(grid, config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("bad configuration: {}", e);
            std::process::exit(2);
        }
    };

    println!("{}", sim.grid());
    println!("{}", sim.values());
    let report = sim.solve_report();
    println!(
        "Solved in {} sweeps (converged: {}, max delta {:.5})\n",
        report.iterations, report.converged, report.max_delta
    );

    let arrows: String = sim
        .values()
        .greedy_actions(sim.grid(), sim.rewards())
        .chunks(sim.grid().size())
        .zip(sim.grid().cells().chunks(sim.grid().size()))
        .map(|(actions, cells)| {
            let mut line: String = actions
                .iter()
                .zip(cells)
                .map(|(a, c)| a.map_or(c.symbol(), |a| a.arrow()))
                .collect();
            line.push('\n');
            line
        })
        .collect();
    println!("{}", arrows);

    let metrics = EvaluationMetrics::evaluate(&mut sim, policy, episodes, 200);
    println!("{}", metrics);
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
