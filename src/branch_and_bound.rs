extern crate min_max_heap;
extern crate ordered_float;
extern crate rand;

use crate::cost_matrix::CostMatrix;
use crate::greedy;
use crate::scenario::Scenario;
use crate::search_state::SearchState;
use crate::tour::Tour;
use min_max_heap::MinMaxHeap;
use ordered_float::OrderedFloat;
use rand::Rng;
use std::cell::Cell;
use std::cmp::Ordering;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Number of greedy runs used to seed the initial best-solution-so-far.
const DEFAULT_GREEDY_RESTARTS: usize = 10;

/// Metrics and the best tour found by a branch-and-bound search.
#[derive(Debug)]
pub struct BranchAndBoundResult {
    pub cost: f64,
    pub tour: Option<Tour>,
    pub count: u64,
    pub max_q: usize,
    pub total_states: u64,
    pub pruned: u64,
    pub start_city: usize,
}

/// A state shared between the depth-first and balanced queues. `stale` is
/// set the first time either queue pops and processes it, so the other
/// queue can recognize and skip its own (now-dangling) entry for the same
/// state in O(1) instead of linear-scanning it out.
struct QueuedState {
    state: SearchState,
    seq: u64,
    stale: Cell<bool>,
}

struct DfsEntry {
    key: (i64, OrderedFloat<f64>, u64),
    node: Rc<QueuedState>,
}

struct BalancedEntry {
    key: (OrderedFloat<f64>, u64),
    node: Rc<QueuedState>,
}

macro_rules! impl_ord_by_key {
    ($t:ty) => {
        impl PartialEq for $t {
            fn eq(&self, other: &Self) -> bool {
                self.key == other.key
            }
        }
        impl Eq for $t {}
        impl PartialOrd for $t {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }
        impl Ord for $t {
            fn cmp(&self, other: &Self) -> Ordering {
                self.key.cmp(&other.key)
            }
        }
    };
}

impl_ord_by_key!(DfsEntry);
impl_ord_by_key!(BalancedEntry);

fn dfs_key(state: &SearchState, seq: u64) -> (i64, OrderedFloat<f64>, u64) {
    (-(state.depth() as i64), OrderedFloat(state.bound()), seq)
}

fn balanced_key(state: &SearchState, seq: u64) -> (OrderedFloat<f64>, u64) {
    (
        OrderedFloat(state.bound() / (state.depth() as f64 + 1.0)),
        seq,
    )
}

/// Drives the search: a greedy-seeded best-solution-so-far, a depth-first
/// phase to find one improving solution quickly, then a best-first
/// (balanced) phase to refine it.
pub fn solve(
    scenario: &Scenario,
    budget: Duration,
    rng: &mut impl Rng,
    start_city: usize,
) -> BranchAndBoundResult {
    let start_time = Instant::now();
    let n = scenario.n_cities();

    let mut bssf_cost = f64::INFINITY;
    let mut bssf_tour: Option<Tour> = None;
    for _ in 0..DEFAULT_GREEDY_RESTARTS {
        let candidate = greedy::greedy_randomized(scenario, rng);
        let cost = candidate.total_cost(scenario);
        if cost < bssf_cost {
            bssf_cost = cost;
            bssf_tour = Some(candidate);
        }
    }
    log::info!(
        "branch-and-bound: greedy seeding done, initial bssf cost = {}",
        bssf_cost
    );

    let root_matrix = CostMatrix::new(scenario.cost_matrix());
    let root = SearchState::root(root_matrix, start_city);

    let mut seq = 0u64;
    let root_node = Rc::new(QueuedState {
        state: root,
        seq,
        stale: Cell::new(false),
    });

    let mut dfs_queue: MinMaxHeap<DfsEntry> = MinMaxHeap::new();
    let mut balanced_queue: MinMaxHeap<BalancedEntry> = MinMaxHeap::new();
    dfs_queue.push(DfsEntry {
        key: dfs_key(&root_node.state, seq),
        node: root_node.clone(),
    });
    balanced_queue.push(BalancedEntry {
        key: balanced_key(&root_node.state, seq),
        node: root_node,
    });

    let mut max_q = 1usize;
    let mut total_states = 1u64;
    let mut pruned = 0u64;
    let mut count = 0u64;

    // Phase 1: depth-first discovery, stop at the first DFS improvement.
    let mut dfs_done = false;
    while !dfs_done && !dfs_queue.is_empty() && start_time.elapsed() < budget {
        let entry = dfs_queue.pop_min().expect("checked non-empty above");
        max_q = max_q.max(dfs_queue.len());

        if entry.node.stale.get() {
            continue;
        }
        entry.node.stale.set(true);
        let state = &entry.node.state;

        if state.bound() >= bssf_cost {
            pruned += 1;
            continue;
        }

        if state.is_solution() {
            if state.bound() < bssf_cost {
                bssf_cost = state.bound();
                bssf_tour = Some(close_tour(state.path()));
                count += 1;
                dfs_done = true;
                log::info!("branch-and-bound: dfs phase found improvement, cost = {}", bssf_cost);
            }
            continue;
        }

        for child in state.expand() {
            total_states += 1;
            if child.bound() < bssf_cost {
                seq += 1;
                let node = Rc::new(QueuedState {
                    state: child,
                    seq,
                    stale: Cell::new(false),
                });
                dfs_queue.push(DfsEntry {
                    key: dfs_key(&node.state, seq),
                    node: node.clone(),
                });
                balanced_queue.push(BalancedEntry {
                    key: balanced_key(&node.state, seq),
                    node,
                });
                max_q = max_q.max(dfs_queue.len());
            } else {
                pruned += 1;
            }
        }
    }

    // Phase 2: best-first refinement over the balanced queue alone.
    while !balanced_queue.is_empty() && start_time.elapsed() < budget {
        let entry = balanced_queue.pop_min().expect("checked non-empty above");
        max_q = max_q.max(balanced_queue.len());

        if entry.node.stale.get() {
            continue;
        }
        entry.node.stale.set(true);
        let state = &entry.node.state;

        if state.bound() >= bssf_cost {
            pruned += 1;
            continue;
        }

        if state.is_solution() {
            if state.bound() < bssf_cost {
                bssf_cost = state.bound();
                bssf_tour = Some(close_tour(state.path()));
                count += 1;
                log::debug!("branch-and-bound: balanced phase improvement, cost = {}", bssf_cost);
            }
            continue;
        }

        for child in state.expand() {
            total_states += 1;
            if child.bound() < bssf_cost {
                seq += 1;
                let node = Rc::new(QueuedState {
                    state: child,
                    seq,
                    stale: Cell::new(false),
                });
                balanced_queue.push(BalancedEntry {
                    key: balanced_key(&node.state, seq),
                    node,
                });
                max_q = max_q.max(balanced_queue.len());
            } else {
                pruned += 1;
            }
        }
    }

    debug_assert!(n == 0 || bssf_cost.is_infinite() || bssf_tour.is_some());

    BranchAndBoundResult {
        cost: bssf_cost,
        tour: bssf_tour,
        count,
        max_q,
        total_states,
        pruned,
        start_city,
    }
}

fn close_tour(path: &[usize]) -> Tour {
    Tour::new(path.to_vec())
}
