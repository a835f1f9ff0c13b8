extern crate rand;

use crate::scenario::{City, Scenario};
use crate::tour::Tour;
use rand::Rng;

/// Deterministic sweep: build a nearest-neighbor tour from every possible
/// start city, and keep the best finite-cost one. If none is finite,
/// returns the best (shortest, though still infinite) one found instead.
pub fn greedy_sweep(scenario: &Scenario) -> Tour {
    let n = scenario.n_cities();
    let mut best: Option<Tour> = None;
    let mut best_cost = f64::INFINITY;
    let mut best_len = 0;
    for start in 0..n {
        let tour = nearest_neighbor_from(scenario, start);
        let cost = tour.total_cost(scenario);
        let len = tour.len();
        let better = match &best {
            None => true,
            Some(_) => {
                if cost.is_finite() || best_cost.is_finite() {
                    cost < best_cost
                } else {
                    // both infinite: prefer the more complete attempt
                    len > best_len
                }
            }
        };
        if better {
            best_cost = cost;
            best_len = len;
            best = Some(tour);
        }
    }
    best.unwrap_or_else(|| Tour::new(Vec::new()))
}

/// Randomized single start: picks a uniform random start city in `[0, n)`
/// and builds a nearest-neighbor tour from it.
pub fn greedy_randomized(scenario: &Scenario, rng: &mut impl Rng) -> Tour {
    let n = scenario.n_cities();
    if n == 0 {
        return Tour::new(Vec::new());
    }
    let start = rng.gen_range(0..n);
    nearest_neighbor_from(scenario, start)
}

/// At each step, chooses the unvisited city of minimum outgoing cost from
/// the current head; ties are broken by lowest index (the ascending scan
/// below keeps the first minimum it sees). Aborts early (leaving an
/// incomplete, infinite-cost tour) when no reachable unvisited city
/// remains from the current head.
fn nearest_neighbor_from(scenario: &Scenario, start: usize) -> Tour {
    let n = scenario.n_cities();
    if n == 0 {
        return Tour::new(Vec::new());
    }
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    order.push(start);
    visited[start] = true;
    let mut head = start;
    for _ in 1..n {
        let mut best_next = None;
        let mut best_cost = f64::INFINITY;
        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }
            let cost = scenario.cost(City(head), City(candidate));
            if cost < best_cost {
                best_cost = cost;
                best_next = Some(candidate);
            }
        }
        match best_next {
            Some(next) => {
                order.push(next);
                visited[next] = true;
                head = next;
            }
            None => break,
        }
    }
    Tour::new(order)
}
