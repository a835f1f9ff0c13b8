#[cfg(test)]
#[macro_use]
extern crate float_cmp;
extern crate log;

pub mod branch_and_bound;
pub mod config;
pub mod cost_matrix;
mod formatter;
pub mod greedy;
pub mod local_search;
pub mod scenario;
pub mod search_state;
pub mod solver;
pub mod tour;

use crate::config::{Algorithm, Config};
use crate::scenario::Scenario;
use crate::solver::TspSolver;
use formatter::{JsonFormatter, OutputData, TextFormatter};
use std::fs::File;
use std::io::stdout;

/// Solvers never fail for ordinary outcomes (no Hamiltonian cycle, empty
/// scenario); the only errors this crate surfaces are reading the scenario
/// file and writing the result, both wrapped with `?` into this return
/// type's `Box<dyn Error>`.
pub fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = Scenario::from_file(&config.scenario_file)?;
    let mut solver = TspSolver::setup(scenario, config.seed);

    let result = match config.algorithm {
        Algorithm::DefaultRandom => solver.solve_default_random(config.budget),
        Algorithm::Greedy => solver.solve_greedy(config.budget),
        Algorithm::BranchAndBound => solver.solve_branch_and_bound(config.budget),
        Algorithm::TwoOpt => solver.solve_two_opt(config.budget),
        Algorithm::Tournament => solver.solve_tournament(config.budget),
    };

    log::info!(
        "{}: cost = {}, elapsed = {:.3}s",
        result.algorithm.name(),
        result.cost,
        result.time.as_secs_f64()
    );

    let out_data = OutputData::new(&result, solver.scenario());

    match (config.out_as_json, config.out_filename.map(File::create)) {
        (true, Some(file)) => out_data.to_writer(file?, JsonFormatter),
        (false, Some(file)) => out_data.to_writer(file?, TextFormatter),
        (true, None) => out_data.to_writer(stdout(), JsonFormatter),
        (false, None) => out_data.to_writer(stdout(), TextFormatter),
    }?;

    Ok(())
}
