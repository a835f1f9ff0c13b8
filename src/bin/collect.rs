//! Outer data-collection harness: sweeps a matrix of (ncities, algorithm,
//! budget) tuples over randomly generated Euclidean scenarios and writes
//! the resulting metrics as CSV to stdout. A separate binary, external to
//! the core library.

use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tsp_solver::scenario::Scenario;
use tsp_solver::solver::{Algorithm, TspSolver};
use std::time::Duration;

const N_CITIES: [usize; 5] = [15, 30, 60, 100, 200];
const BUDGET_SECS: u64 = 600;
const ALGORITHMS: [Algorithm; 5] = [
    Algorithm::DefaultRandom,
    Algorithm::Greedy,
    Algorithm::BranchAndBound,
    Algorithm::TwoOpt,
    Algorithm::Tournament,
];

fn random_euclidean_scenario(n: usize, rng: &mut impl Rng) -> Scenario {
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)))
        .collect();
    let mut data = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            let dx = points[i].0 - points[j].0;
            let dy = points[i].1 - points[j].1;
            data[i * n + j] = (dx * dx + dy * dy).sqrt();
        }
    }
    Scenario::new(
        DMatrix::from_row_slice(n, n, &data),
        (0..n).map(|i| i.to_string()).collect(),
    )
}

fn main() {
    env_logger::init();

    let budget = Duration::from_secs(BUDGET_SECS);
    println!("ncities,algorithm,cost,time_secs,count,max_q,total_states,pruned");

    for &n in &N_CITIES {
        let mut scenario_rng = StdRng::seed_from_u64(n as u64);
        let scenario = random_euclidean_scenario(n, &mut scenario_rng);

        for (i, &algorithm) in ALGORITHMS.iter().enumerate() {
            let seed = n as u64 * 100 + i as u64;
            let mut solver = TspSolver::setup(scenario.clone(), seed);
            let result = match algorithm {
                Algorithm::DefaultRandom => solver.solve_default_random(budget),
                Algorithm::Greedy => solver.solve_greedy(budget),
                Algorithm::BranchAndBound => solver.solve_branch_and_bound(budget),
                Algorithm::TwoOpt => solver.solve_two_opt(budget),
                Algorithm::Tournament => solver.solve_tournament(budget),
            };
            println!(
                "{},{},{},{:.3},{},{},{},{}",
                n,
                algorithm.name(),
                result.cost,
                result.time.as_secs_f64(),
                result.count,
                result.max_q,
                result.total_states,
                result.pruned,
            );
        }
    }
}
