use crate::cost_matrix::CostMatrix;

/// A node in the branch-and-bound tree: a reduced cost matrix consistent
/// with `path`, the path itself, its lower bound, and the last city
/// visited. Deliberately holds no reference to its parent; everything it
/// needs was copied at construction time, so a parent can be dropped the
/// moment its queue entries are popped.
#[derive(Debug, Clone)]
pub struct SearchState {
    bound: f64,
    matrix: CostMatrix,
    path: Vec<usize>,
    last: usize,
}

impl SearchState {
    /// Root state for a chosen start city: the scenario's full cost
    /// matrix (diagonal already infinity), reduced once.
    pub fn root(mut matrix: CostMatrix, start: usize) -> SearchState {
        let bound = matrix.reduce();
        let state = SearchState {
            bound,
            matrix,
            path: vec![start],
            last: start,
        };
        state.debug_check_invariants();
        state
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn last(&self) -> usize {
        self.last
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn matrix(&self) -> &CostMatrix {
        &self.matrix
    }

    /// Builds the child reached by committing edge `last -> next_city`.
    /// Returns `None` if that edge is infinite (infeasible).
    pub fn expand_to(&self, next_city: usize) -> Option<SearchState> {
        let edge_cost = self.matrix.get(self.last, next_city);
        if !edge_cost.is_finite() {
            return None;
        }
        debug_assert!(edge_cost >= 0.0, "edge costs must be nonnegative");

        let mut matrix = self.matrix.clone();
        matrix.block(self.last, next_city);

        let mut path = self.path.clone();
        path.push(next_city);

        // Block the premature return to the start city while cities
        // remain unvisited; once the path is complete this entry is left
        // alone so the real closing-edge cost survives into `reduce()`.
        if path.len() < matrix.n() {
            matrix.set_infinite(next_city, path[0]);
        }

        let reduction = matrix.reduce();
        let bound = self.bound + edge_cost + reduction;

        let state = SearchState {
            bound,
            matrix,
            path,
            last: next_city,
        };
        state.debug_check_invariants();
        Some(state)
    }

    /// Every child reachable from `last` via a finite edge.
    pub fn expand(&self) -> Vec<SearchState> {
        (0..self.matrix.n())
            .filter_map(|j| self.expand_to(j))
            .collect()
    }

    /// True iff every city has been visited and the closing edge back to
    /// `path[0]` is finite.
    pub fn is_solution(&self) -> bool {
        self.path.len() == self.matrix.n() && self.matrix.get(self.last, self.path[0]).is_finite()
    }

    #[cfg(debug_assertions)]
    fn debug_check_invariants(&self) {
        assert!(
            self.bound >= 0.0 || self.bound.is_infinite(),
            "InvariantViolation: negative finite bound {}",
            self.bound
        );
        assert!(
            self.matrix.is_reduced(),
            "InvariantViolation: non-reduced matrix reached a SearchState"
        );
        if self.path.len() < self.matrix.n() {
            assert!(
                self.matrix.get(self.last, self.path[0]).is_infinite(),
                "InvariantViolation: premature return edge is not blocked"
            );
        }
        for &visited in &self.path[..self.path.len().saturating_sub(1)] {
            for k in 0..self.matrix.n() {
                assert!(
                    self.matrix.get(visited, k).is_infinite(),
                    "InvariantViolation: row of a visited, non-last city is not fully blocked"
                );
                assert!(
                    self.matrix.get(k, visited).is_infinite(),
                    "InvariantViolation: column of a visited, non-last city is not fully blocked"
                );
            }
        }
    }

    #[cfg(not(debug_assertions))]
    fn debug_check_invariants(&self) {}
}
