extern crate rand;

use crate::branch_and_bound;
pub use crate::config::Algorithm;
use crate::greedy;
use crate::local_search;
use crate::scenario::Scenario;
use crate::tour::Tour;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::{Duration, Instant};

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::DefaultRandom => "default_random",
            Algorithm::Greedy => "greedy",
            Algorithm::BranchAndBound => "branch_and_bound",
            Algorithm::TwoOpt => "two_opt",
            Algorithm::Tournament => "tournament",
        }
    }
}

/// Uniform result record returned by every algorithm. Fields not
/// meaningful for a given algorithm are left at their sentinel (`0` for
/// counters, `None` for `tour`).
#[derive(Debug)]
pub struct SolveResult {
    pub algorithm: Algorithm,
    pub cost: f64,
    pub time: Duration,
    pub count: u64,
    pub tour: Option<Tour>,
    pub max_q: usize,
    pub total_states: u64,
    pub pruned: u64,
    pub start_city: Option<usize>,
}

/// The single entry type external callers use: install a scenario, then
/// call any of the five solve methods. Owns the PRNG so repeated calls on
/// the same solver draw from a single reproducible stream.
pub struct TspSolver {
    scenario: Scenario,
    rng: StdRng,
}

impl TspSolver {
    /// Installs `scenario` and seeds the solver's PRNG explicitly, so a run
    /// is fully reproducible given the same seed.
    pub fn setup(scenario: Scenario, seed: u64) -> TspSolver {
        TspSolver {
            scenario,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Baseline: a uniformly random permutation of the cities, not
    /// optimized at all.
    pub fn solve_default_random(&mut self, _budget: Duration) -> SolveResult {
        let start = Instant::now();
        let n = self.scenario.n_cities();
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut self.rng);
        let tour = Tour::new(order);
        let cost = tour.total_cost(&self.scenario);
        SolveResult {
            algorithm: Algorithm::DefaultRandom,
            cost,
            time: start.elapsed(),
            count: 1,
            tour: if n == 0 { None } else { Some(tour) },
            max_q: 0,
            total_states: 0,
            pruned: 0,
            start_city: None,
        }
    }

    /// Deterministic-sweep greedy: tries every start city and keeps the
    /// best.
    pub fn solve_greedy(&mut self, _budget: Duration) -> SolveResult {
        let start = Instant::now();
        let n = self.scenario.n_cities();
        if n == 0 {
            return SolveResult {
                algorithm: Algorithm::Greedy,
                cost: 0.0,
                time: start.elapsed(),
                count: 0,
                tour: None,
                max_q: 0,
                total_states: 0,
                pruned: 0,
                start_city: None,
            };
        }
        let tour = greedy::greedy_sweep(&self.scenario);
        let cost = tour.total_cost(&self.scenario);
        SolveResult {
            algorithm: Algorithm::Greedy,
            cost,
            time: start.elapsed(),
            count: n as u64,
            tour: Some(tour),
            max_q: 0,
            total_states: 0,
            pruned: 0,
            start_city: None,
        }
    }

    /// Branch-and-bound search over reduced cost matrices. Start city is
    /// fixed at index 0; see DESIGN.md for why.
    pub fn solve_branch_and_bound(&mut self, budget: Duration) -> SolveResult {
        let start = Instant::now();
        let n = self.scenario.n_cities();
        if n == 0 {
            return SolveResult {
                algorithm: Algorithm::BranchAndBound,
                cost: 0.0,
                time: start.elapsed(),
                count: 0,
                tour: None,
                max_q: 0,
                total_states: 0,
                pruned: 0,
                start_city: Some(0),
            };
        }
        let result = branch_and_bound::solve(&self.scenario, budget, &mut self.rng, 0);
        SolveResult {
            algorithm: Algorithm::BranchAndBound,
            cost: result.cost,
            time: start.elapsed(),
            count: result.count,
            tour: result.tour,
            max_q: result.max_q,
            total_states: result.total_states,
            pruned: result.pruned,
            start_city: Some(result.start_city),
        }
    }

    /// Two-opt from a single greedy-random seed.
    pub fn solve_two_opt(&mut self, budget: Duration) -> SolveResult {
        let start = Instant::now();
        let n = self.scenario.n_cities();
        if n == 0 {
            return SolveResult {
                algorithm: Algorithm::TwoOpt,
                cost: 0.0,
                time: start.elapsed(),
                count: 0,
                tour: None,
                max_q: 0,
                total_states: 0,
                pruned: 0,
                start_city: None,
            };
        }
        let seed = greedy::greedy_randomized(&self.scenario, &mut self.rng);
        let result = local_search::two_opt(seed, &self.scenario, budget, &mut self.rng);
        SolveResult {
            algorithm: Algorithm::TwoOpt,
            cost: result.cost,
            time: start.elapsed(),
            count: result.tries,
            tour: Some(result.tour),
            max_q: 0,
            total_states: 0,
            pruned: 0,
            start_city: None,
        }
    }

    /// Tournament: multiple greedy-random 2-opt seeds, the winner refined
    /// with 3-opt.
    pub fn solve_tournament(&mut self, budget: Duration) -> SolveResult {
        let start = Instant::now();
        let n = self.scenario.n_cities();
        if n == 0 {
            return SolveResult {
                algorithm: Algorithm::Tournament,
                cost: 0.0,
                time: start.elapsed(),
                count: 0,
                tour: None,
                max_q: 0,
                total_states: 0,
                pruned: 0,
                start_city: None,
            };
        }
        let result = local_search::tournament(&self.scenario, budget, &mut self.rng);
        SolveResult {
            algorithm: Algorithm::Tournament,
            cost: result.cost,
            time: start.elapsed(),
            count: result.tries,
            tour: Some(result.tour),
            max_q: 0,
            total_states: 0,
            pruned: 0,
            start_city: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn triangle_scenario() -> Scenario {
        let points = [(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)];
        let n = points.len();
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

    #[test]
    fn greedy_solves_the_triangle_scenario() {
        let mut solver = TspSolver::setup(triangle_scenario(), 1);
        let result = solver.solve_greedy(Duration::from_secs(1));
        assert!((result.cost - 12.0).abs() < 1e-9);
    }

    #[test]
    fn branch_and_bound_solves_the_triangle_scenario() {
        let mut solver = TspSolver::setup(triangle_scenario(), 2);
        let result = solver.solve_branch_and_bound(Duration::from_secs(5));
        assert!((result.cost - 12.0).abs() < 1e-9);
        assert_eq!(Some(0), result.start_city);
    }

    #[test]
    fn tournament_solves_the_triangle_scenario() {
        let mut solver = TspSolver::setup(triangle_scenario(), 3);
        let result = solver.solve_tournament(Duration::from_secs(1));
        assert!((result.cost - 12.0).abs() < 1e-9);
    }

    #[test]
    fn empty_scenario_is_handled_without_panicking() {
        let scenario = Scenario::new(DMatrix::zeros(0, 0), Vec::new());
        let mut solver = TspSolver::setup(scenario, 4);
        assert_eq!(0.0, solver.solve_greedy(Duration::from_millis(10)).cost);
        assert_eq!(
            0.0,
            solver
                .solve_branch_and_bound(Duration::from_millis(10))
                .cost
        );
    }
}
