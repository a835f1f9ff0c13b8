//! Black-box acceptance tests against the public `TspSolver` facade, one
//! per concrete scenario.

use nalgebra::DMatrix;
use std::time::Duration;
use tsp_solver::scenario::Scenario;
use tsp_solver::solver::TspSolver;

fn euclidean(points: &[(f64, f64)]) -> Scenario {
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

/// Triangle at (0,0), (3,0), (0,4): optimal cost 12.
#[test]
fn triangle_is_solved_optimally_by_every_algorithm() {
    let scenario = euclidean(&[(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)]);

    let mut greedy = TspSolver::setup(scenario.clone(), 1);
    assert!((greedy.solve_greedy(Duration::from_secs(1)).cost - 12.0).abs() < 1e-9);

    let mut bnb = TspSolver::setup(scenario.clone(), 2);
    assert!((bnb.solve_branch_and_bound(Duration::from_secs(5)).cost - 12.0).abs() < 1e-9);

    let mut tournament = TspSolver::setup(scenario, 3);
    assert!((tournament.solve_tournament(Duration::from_secs(1)).cost - 12.0).abs() < 1e-9);
}

/// Unit square: optimal 4.0, every greedy start already optimal, local
/// search makes no further improvement.
#[test]
fn square_greedy_and_two_opt_agree_on_the_optimum() {
    let scenario = euclidean(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);

    let mut greedy = TspSolver::setup(scenario.clone(), 4);
    let greedy_cost = greedy.solve_greedy(Duration::from_secs(1)).cost;
    assert!((greedy_cost - 4.0).abs() < 1e-9);

    let mut two_opt = TspSolver::setup(scenario, 5);
    let two_opt_cost = two_opt.solve_two_opt(Duration::from_millis(500)).cost;
    assert!((two_opt_cost - 4.0).abs() < 1e-9);
}

/// Asymmetric 4-city scenario; only Hamiltonian cycle is A->B->C->D->A,
/// cost 4. Branch-and-bound must find it exactly.
#[test]
fn asymmetric_scenario_with_one_blocked_edge() {
    let inf = f64::INFINITY;
    #[rustfmt::skip]
    let data = [
        inf, 1.0, 5.0, inf,
        inf, inf, 1.0, 5.0,
        5.0, inf, inf, 1.0,
        1.0, 5.0, inf, inf,
    ];
    let scenario = Scenario::new(
        DMatrix::from_row_slice(4, 4, &data),
        vec!["A".into(), "B".into(), "C".into(), "D".into()],
    );
    let mut solver = TspSolver::setup(scenario, 6);
    let result = solver.solve_branch_and_bound(Duration::from_secs(5));
    assert!((result.cost - 4.0).abs() < 1e-9);
}

/// Disconnected scenario: only edge 0<->1 exists. Every algorithm returns
/// cost = infinity.
#[test]
fn disconnected_scenario_yields_infinite_cost_everywhere() {
    let mut data = vec![f64::INFINITY; 16];
    data[0 * 4 + 1] = 1.0;
    data[1 * 4 + 0] = 1.0;
    let scenario = Scenario::new(
        DMatrix::from_row_slice(4, 4, &data),
        (0..4).map(|i| i.to_string()).collect(),
    );

    let mut greedy = TspSolver::setup(scenario.clone(), 7);
    assert!(greedy.solve_greedy(Duration::from_secs(1)).cost.is_infinite());

    let mut bnb = TspSolver::setup(scenario, 8);
    let result = bnb.solve_branch_and_bound(Duration::from_secs(2));
    assert!(result.cost.is_infinite());
    assert!(result.tour.is_none());
}

/// Five cities where a greedy tour from index 0 is suboptimal; 2-opt
/// converges to the perimeter cost of 6.
#[test]
fn two_opt_fixes_a_suboptimal_greedy_tour() {
    let scenario = euclidean(&[
        (0.0, 0.0),
        (1.0, 0.0),
        (2.0, 0.0),
        (2.0, 1.0),
        (0.0, 1.0),
    ]);

    let mut greedy = TspSolver::setup(scenario.clone(), 9);
    let greedy_cost = greedy.solve_greedy(Duration::from_secs(1)).cost;

    let mut two_opt = TspSolver::setup(scenario, 10);
    let result = two_opt.solve_two_opt(Duration::from_secs(1));
    assert!((result.cost - 6.0).abs() < 1e-6);
    assert!(result.cost <= greedy_cost + 1e-9);
}

/// Five cities on a line; optimal round trip is 8. Branch-and-bound must
/// prune and must not enumerate every permutation.
#[test]
fn branch_and_bound_prunes_on_a_line_of_five_cities() {
    let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
    let n = xs.len();
    let mut data = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            data[i * n + j] = (xs[i] - xs[j]).abs();
        }
    }
    let scenario = Scenario::new(
        DMatrix::from_row_slice(n, n, &data),
        (0..n).map(|i| i.to_string()).collect(),
    );
    let mut solver = TspSolver::setup(scenario, 11);
    let result = solver.solve_branch_and_bound(Duration::from_secs(5));
    assert!((result.cost - 8.0).abs() < 1e-9);
    assert!(result.pruned > 0);
    let factorial: u64 = (1..=n as u64).product();
    assert!(result.total_states < factorial);
}
