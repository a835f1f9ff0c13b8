extern crate rand;

use crate::scenario::{City, Scenario};
use rand::seq::SliceRandom;
use rand::Rng;

/// An ordered sequence of N distinct city indices. The implied closing
/// edge is last -> first; it is never stored explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    pub fn new(order: Vec<usize>) -> Tour {
        Tour { order }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.order
    }

    /// Sum of consecutive edge costs plus the closing edge. Infinity if any
    /// edge is infinity, or if the tour is shorter than the scenario (an
    /// incomplete tour never has a finite cost).
    pub fn total_cost(&self, scenario: &Scenario) -> f64 {
        let n = scenario.n_cities();
        if self.order.len() != n {
            return f64::INFINITY;
        }
        if n <= 1 {
            return 0.0;
        }
        let mut total = 0.0;
        for i in 0..n {
            let from = City(self.order[i]);
            let to = City(self.order[(i + 1) % n]);
            let edge = scenario.cost(from, to);
            if !edge.is_finite() {
                return f64::INFINITY;
            }
            total += edge;
        }
        total
    }

    /// `t[0..i] ++ reverse(t[i..=j]) ++ t[j+1..]`. Requires `0 <= i < j < len`.
    pub fn reverse_segment(&self, i: usize, j: usize) -> Tour {
        assert!(
            i < j && j < self.order.len(),
            "reverse_segment requires 0 <= i < j < len, got i={}, j={}, len={}",
            i,
            j,
            self.order.len()
        );
        let mut order = self.order.clone();
        order[i..=j].reverse();
        Tour { order }
    }

    /// Picks `k` distinct indices and permutes the cities at those
    /// positions uniformly at random. `k <= len`.
    pub fn k_random_swap(&self, k: usize, rng: &mut impl Rng) -> Tour {
        let n = self.order.len();
        assert!(k <= n, "k must not exceed tour length");
        let mut order = self.order.clone();
        let mut indices: Vec<usize> = (0..n).collect();
        let (chosen, _) = indices.partial_shuffle(rng, k);
        let chosen: Vec<usize> = chosen.to_vec();
        let mut values: Vec<usize> = chosen.iter().map(|&idx| order[idx]).collect();
        values.shuffle(rng);
        for (&idx, val) in chosen.iter().zip(values) {
            order[idx] = val;
        }
        Tour { order }
    }
}
