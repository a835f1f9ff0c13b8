extern crate rand;

use crate::greedy;
use crate::scenario::Scenario;
use crate::tour::Tour;
use rand::Rng;
use std::time::{Duration, Instant};

/// Default k for the k-swap perturbation.
const K_SWAP_DEFAULT: usize = 5;

/// Number of independent greedy-random seeds in the tournament's 2-opt half.
const TOURNAMENT_SEEDS: usize = 5;

/// Outcome of any local-search engine: the best tour found and how many
/// candidate tours were evaluated to find it.
#[derive(Debug)]
pub struct LocalSearchResult {
    pub tour: Tour,
    pub cost: f64,
    pub tries: u64,
}

/// A single 2-opt + k-swap pass over `current`: scans every segment
/// reversal and `floor(n^2/2)` random k-swaps, and returns the single best
/// strictly-improving candidate found, if any.
fn best_improving_pass(
    current: &Tour,
    current_cost: f64,
    scenario: &Scenario,
    deadline: Instant,
    rng: &mut impl Rng,
    tries: &mut u64,
) -> Option<(Tour, f64)> {
    let n = current.len();
    let mut best: Option<(Tour, f64)> = None;

    for i in 0..n {
        if Instant::now() >= deadline {
            break;
        }
        for j in (i + 1)..n {
            let candidate = current.reverse_segment(i, j);
            let cost = candidate.total_cost(scenario);
            *tries += 1;
            if cost < current_cost && best.as_ref().map_or(true, |(_, c)| cost < *c) {
                best = Some((candidate, cost));
            }
        }
    }

    let k = K_SWAP_DEFAULT.min(n);
    if k >= 2 {
        let trials = n * n / 2;
        for _ in 0..trials {
            if Instant::now() >= deadline {
                break;
            }
            let candidate = current.k_random_swap(k, rng);
            let cost = candidate.total_cost(scenario);
            *tries += 1;
            if cost < current_cost && best.as_ref().map_or(true, |(_, c)| cost < *c) {
                best = Some((candidate, cost));
            }
        }
    }

    best
}

/// Runs 2-opt (plus k-swap perturbation) passes until a full pass finds no
/// improvement or the budget expires.
pub fn two_opt(
    tour: Tour,
    scenario: &Scenario,
    budget: Duration,
    rng: &mut impl Rng,
) -> LocalSearchResult {
    let deadline = Instant::now() + budget;
    let mut current = tour;
    let mut current_cost = current.total_cost(scenario);
    let mut tries = 0u64;

    if current.len() < 2 {
        return LocalSearchResult {
            tour: current,
            cost: current_cost,
            tries,
        };
    }

    loop {
        if Instant::now() >= deadline {
            break;
        }
        match best_improving_pass(&current, current_cost, scenario, deadline, rng, &mut tries) {
            Some((t, c)) => {
                current = t;
                current_cost = c;
            }
            None => break,
        }
    }

    LocalSearchResult {
        tour: current,
        cost: current_cost,
        tries,
    }
}

/// For every triple `(i, j, k)`, considers the three single-segment
/// reversals plus the whole-tour reversal of each; takes the first
/// strictly-improving candidate found and restarts the pass. Terminates
/// when a full pass improves nothing or the budget expires.
pub fn three_opt(tour: Tour, scenario: &Scenario, budget: Duration) -> LocalSearchResult {
    let deadline = Instant::now() + budget;
    let mut current = tour;
    let mut current_cost = current.total_cost(scenario);
    let mut tries = 0u64;
    let n = current.len();

    if n < 3 {
        return LocalSearchResult {
            tour: current,
            cost: current_cost,
            tries,
        };
    }

    'restart: loop {
        if Instant::now() >= deadline {
            break;
        }
        for i in 0..n {
            if Instant::now() >= deadline {
                break 'restart;
            }
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    let bases = [
                        current.reverse_segment(i, j),
                        current.reverse_segment(i, k),
                        current.reverse_segment(j, k),
                    ];
                    for base in &bases {
                        let full_reverse = base.reverse_segment(0, n - 1);
                        for candidate in [base.clone(), full_reverse] {
                            let cost = candidate.total_cost(scenario);
                            tries += 1;
                            if cost < current_cost {
                                current = candidate;
                                current_cost = cost;
                                continue 'restart;
                            }
                        }
                    }
                }
            }
        }
        break;
    }

    LocalSearchResult {
        tour: current,
        cost: current_cost,
        tries,
    }
}

/// Splits the budget in half: the first half runs the 2-opt engine from
/// `TOURNAMENT_SEEDS` independent greedy-random tours (each given an equal
/// slice of that half) and keeps the best; the second half polishes that
/// winner with the 3-opt engine.
pub fn tournament(scenario: &Scenario, budget: Duration, rng: &mut impl Rng) -> LocalSearchResult {
    let half = budget / 2;
    let slice = half / (TOURNAMENT_SEEDS as u32).max(1);

    let mut best_tour: Option<Tour> = None;
    let mut best_cost = f64::INFINITY;
    let mut tries = 0u64;

    for _ in 0..TOURNAMENT_SEEDS {
        // Each seed is built from a fresh copy of the scenario's greedy
        // tour; no candidate ever aliases another's backing Vec.
        let seed = greedy::greedy_randomized(scenario, rng);
        let improved = two_opt(seed, scenario, slice, rng);
        tries += improved.tries;
        if improved.cost < best_cost {
            best_cost = improved.cost;
            best_tour = Some(improved.tour);
        }
    }

    let base = best_tour.unwrap_or_else(|| Tour::new(Vec::new()));
    let polished = three_opt(base, scenario, half);
    tries += polished.tries;

    LocalSearchResult {
        tour: polished.tour,
        cost: polished.cost,
        tries,
    }
}
