extern crate nalgebra;
extern crate serde;
extern crate serde_json;
extern crate thiserror;

use nalgebra::DMatrix;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioParseError {
    #[error("cannot open scenario file: {0}")]
    IO(#[from] std::io::Error),

    #[error("cannot parse scenario file: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("cost matrix must be square, found a row of length {row_len} in a {n}-city scenario")]
    NotSquare { n: usize, row_len: usize },
}

/// On-disk shape of a scenario: an N x N cost matrix plus optional labels.
/// `null` entries mean no edge (infinity).
#[derive(Debug, Deserialize)]
struct ScenarioFile {
    #[serde(default)]
    labels: Vec<String>,
    cost: Vec<Vec<Option<f64>>>,
}

/// A city is nothing more than a stable index into the owning `Scenario`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct City(pub usize);

impl City {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// The immutable input to a solve: N cities and the N x N cost between
/// them. Diagonal entries are always infinity, regardless of what the
/// input matrix says.
#[derive(Debug, Clone)]
pub struct Scenario {
    labels: Vec<String>,
    cost: DMatrix<f64>,
}

impl Scenario {
    pub fn new(mut cost: DMatrix<f64>, labels: Vec<String>) -> Scenario {
        assert_eq!(
            cost.nrows(),
            cost.ncols(),
            "cost matrix must be square, got {} rows and {} columns",
            cost.nrows(),
            cost.ncols()
        );
        for i in 0..cost.nrows() {
            cost[(i, i)] = f64::INFINITY;
        }
        Scenario { labels, cost }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Scenario, ScenarioParseError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let raw: ScenarioFile = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    pub fn from_str(s: &str) -> Result<Scenario, ScenarioParseError> {
        let raw: ScenarioFile = serde_json::from_str(s)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: ScenarioFile) -> Result<Scenario, ScenarioParseError> {
        let n = raw.cost.len();
        for row in &raw.cost {
            if row.len() != n {
                return Err(ScenarioParseError::NotSquare {
                    n,
                    row_len: row.len(),
                });
            }
        }

        let mut matrix = DMatrix::repeat(n, n, f64::INFINITY);
        for (i, row) in raw.cost.into_iter().enumerate() {
            for (j, val) in row.into_iter().enumerate() {
                matrix[(i, j)] = val.unwrap_or(f64::INFINITY);
            }
        }

        let labels = if raw.labels.is_empty() {
            (0..n).map(|i| i.to_string()).collect()
        } else {
            raw.labels
        };

        Ok(Scenario::new(matrix, labels))
    }

    pub fn n_cities(&self) -> usize {
        self.cost.nrows()
    }

    pub fn cities(&self) -> Vec<City> {
        (0..self.n_cities()).map(City).collect()
    }

    pub fn label(&self, city: City) -> &str {
        &self.labels[city.0]
    }

    /// Cost of the edge i -> j; `cost(i, i)` is always infinity.
    pub fn cost(&self, i: City, j: City) -> f64 {
        self.cost[(i.0, j.0)]
    }

    /// A fresh N x N matrix (diagonal already infinity) ready for reduction.
    pub fn cost_matrix(&self) -> DMatrix<f64> {
        self.cost.clone()
    }
}
