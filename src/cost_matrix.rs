extern crate nalgebra;

use nalgebra::DMatrix;

/// An N x N mapping from (row, col) to a nonnegative real or infinity.
/// Owns its storage; `clone()` (derived) gives an independent copy, which
/// is what `SearchState` relies on when it mutates a child's matrix
/// without touching the parent's.
#[derive(Debug, Clone)]
pub struct CostMatrix {
    data: DMatrix<f64>,
}

impl CostMatrix {
    pub fn new(data: DMatrix<f64>) -> CostMatrix {
        assert_eq!(data.nrows(), data.ncols(), "cost matrix must be square");
        CostMatrix { data }
    }

    pub fn n(&self) -> usize {
        self.data.nrows()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[(i, j)]
    }

    /// Forces a single entry to infinity, used to block the premature
    /// return edge `last -> path[0]` while the tour is still incomplete.
    pub fn set_infinite(&mut self, i: usize, j: usize) {
        self.data[(i, j)] = f64::INFINITY;
    }

    /// Subtracts row minima, then column minima (of what remains after row
    /// reduction), from every finite entry. Rows/columns whose minimum is
    /// infinity contribute zero. Returns the total amount subtracted.
    pub fn reduce(&mut self) -> f64 {
        let mut total = 0.0;
        for mut row in self.data.row_iter_mut() {
            let min = finite_min(row.iter().copied());
            if min.is_finite() && min > 0.0 {
                for v in row.iter_mut() {
                    if v.is_finite() {
                        *v -= min;
                    }
                }
                total += min;
            }
        }
        for mut col in self.data.column_iter_mut() {
            let min = finite_min(col.iter().copied());
            if min.is_finite() && min > 0.0 {
                for v in col.iter_mut() {
                    if v.is_finite() {
                        *v -= min;
                    }
                }
                total += min;
            }
        }
        total
    }

    /// Commits edge `i -> j`: sets row `i` and column `j` to infinity, and
    /// also sets the reverse edge `(j, i)` to infinity so the just-taken
    /// edge can never be immediately undone.
    pub fn block(&mut self, i: usize, j: usize) {
        for k in 0..self.n() {
            self.data[(i, k)] = f64::INFINITY;
            self.data[(k, j)] = f64::INFINITY;
        }
        self.data[(j, i)] = f64::INFINITY;
    }

    /// True iff every row and every column has a zero entry or is entirely
    /// infinite.
    pub fn is_reduced(&self) -> bool {
        for row in self.data.row_iter() {
            let min = finite_min(row.iter().copied());
            if min.is_finite() && min != 0.0 {
                return false;
            }
        }
        for col in self.data.column_iter() {
            let min = finite_min(col.iter().copied());
            if min.is_finite() && min != 0.0 {
                return false;
            }
        }
        true
    }
}

fn finite_min(it: impl Iterator<Item = f64>) -> f64 {
    it.fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn reduce_subtracts_row_then_column_minima() {
        let data = DMatrix::from_row_slice(
            3,
            3,
            &[
                f64::INFINITY,
                2.0,
                5.0,
                3.0,
                f64::INFINITY,
                1.0,
                4.0,
                6.0,
                f64::INFINITY,
            ],
        );
        let mut matrix = CostMatrix::new(data);
        let cost = matrix.reduce();
        assert!(matrix.is_reduced());
        assert!(approx_eq!(f64, cost, 2.0 + 3.0 + 4.0, epsilon = 1e-9));
    }

    #[test]
    fn reduce_is_idempotent() {
        let data = DMatrix::from_row_slice(
            3,
            3,
            &[
                f64::INFINITY,
                2.0,
                5.0,
                3.0,
                f64::INFINITY,
                1.0,
                4.0,
                6.0,
                f64::INFINITY,
            ],
        );
        let mut matrix = CostMatrix::new(data);
        matrix.reduce();
        let second = matrix.reduce();
        assert_eq!(0.0, second);
    }

    #[test]
    fn reduce_treats_all_infinite_row_as_zero_contribution() {
        let data = DMatrix::from_row_slice(
            2,
            2,
            &[f64::INFINITY, f64::INFINITY, 1.0, f64::INFINITY],
        );
        let mut matrix = CostMatrix::new(data);
        let cost = matrix.reduce();
        assert!(approx_eq!(f64, cost, 1.0, epsilon = 1e-9));
        assert!(matrix.is_reduced());
    }

    #[test]
    fn block_infinities_row_column_and_reverse_edge() {
        let data = DMatrix::from_row_slice(
            3,
            3,
            &[
                f64::INFINITY,
                1.0,
                2.0,
                3.0,
                f64::INFINITY,
                4.0,
                5.0,
                6.0,
                f64::INFINITY,
            ],
        );
        let mut matrix = CostMatrix::new(data);
        matrix.block(0, 1);
        for k in 0..3 {
            assert!(matrix.get(0, k).is_infinite());
            assert!(matrix.get(k, 1).is_infinite());
        }
        assert!(matrix.get(1, 0).is_infinite());
        // entry (2, 0) is untouched by blocking edge 0 -> 1
        assert_eq!(5.0, matrix.get(2, 0));
    }
}
