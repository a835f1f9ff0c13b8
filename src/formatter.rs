extern crate serde;
extern crate serde_json;
use thiserror::Error;

use crate::scenario::Scenario;
use crate::solver::SolveResult;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::io::Write;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot save result as JSON: {0}")]
    SerializeJson(#[from] serde_json::Error),

    #[error("Cannot save result: {0}")]
    IO(#[from] std::io::Error),
}

type Result = std::result::Result<(), Error>;

/// One stop on the tour: its index into the scenario and its label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathPoint {
    pub index: usize,
    pub label: String,
}

impl Display for PathPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.index, self.label)
    }
}

/// Flattened, serializable view of a `SolveResult` plus the scenario labels
/// needed to render `path`.
#[derive(Debug, Serialize)]
pub struct OutputData {
    pub algorithm: &'static str,
    pub cost: f64,
    pub time_secs: f64,
    pub count: u64,
    pub max_q: usize,
    pub total_states: u64,
    pub pruned: u64,
    pub start_city: Option<usize>,
    pub path: Vec<PathPoint>,
}

impl OutputData {
    pub fn new(result: &SolveResult, scenario: &Scenario) -> OutputData {
        let path = result
            .tour
            .as_ref()
            .map(|t| {
                t.as_slice()
                    .iter()
                    .map(|&idx| PathPoint {
                        index: idx,
                        label: scenario.label(crate::scenario::City(idx)).to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        OutputData {
            algorithm: result.algorithm.name(),
            cost: result.cost,
            time_secs: result.time.as_secs_f64(),
            count: result.count,
            max_q: result.max_q,
            total_states: result.total_states,
            pruned: result.pruned,
            start_city: result.start_city,
            path,
        }
    }

    pub fn to_writer<W, F>(&self, writer: W, formatter: F) -> Result
    where
        W: Write,
        F: OutputFormatter<W>,
    {
        formatter.fmt(self, writer)
    }
}

pub trait OutputFormatter<W: Write> {
    fn fmt(&self, data: &OutputData, writer: W) -> Result;
}

pub struct TextFormatter;

impl<W: Write> OutputFormatter<W> for TextFormatter {
    fn fmt(&self, data: &OutputData, writer: W) -> Result {
        let mut writer = writer;
        writeln!(writer, "Algorithm: {}", data.algorithm)?;
        writeln!(writer, "Cost: {:.3}", data.cost)?;
        writeln!(writer, "Time: {:.3} s", data.time_secs)?;
        writeln!(writer, "Count: {}", data.count)?;
        writeln!(writer, "Max queue size: {}", data.max_q)?;
        writeln!(writer, "Total states: {}", data.total_states)?;
        writeln!(writer, "Pruned: {}", data.pruned)?;
        if let Some(start) = data.start_city {
            writeln!(writer, "Start city: {}", start)?;
        }
        writeln!(writer, "Path:")?;
        for p in &data.path {
            writeln!(writer, "{}", p)?;
        }

        Ok(writer.flush()?)
    }
}

pub struct JsonFormatter;

impl<W: Write> OutputFormatter<W> for JsonFormatter {
    fn fmt(&self, data: &OutputData, writer: W) -> Result {
        Ok(serde_json::to_writer_pretty(writer, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;
    use crate::solver::Algorithm;
    use crate::tour::Tour;
    use nalgebra::DMatrix;
    use std::time::Duration;

    fn triangle_scenario() -> Scenario {
        let data = DMatrix::from_row_slice(
            3,
            3,
            &[0.0, 3.0, 4.0, 3.0, 0.0, 5.0, 4.0, 5.0, 0.0],
        );
        Scenario::new(data, vec!["A".into(), "B".into(), "C".into()])
    }

    #[test]
    fn output_data_carries_labels_along_the_path() {
        let scenario = triangle_scenario();
        let result = SolveResult {
            algorithm: Algorithm::Greedy,
            cost: 12.0,
            time: Duration::from_millis(5),
            count: 3,
            tour: Some(Tour::new(vec![0, 1, 2])),
            max_q: 0,
            total_states: 0,
            pruned: 0,
            start_city: None,
        };
        let data = OutputData::new(&result, &scenario);
        assert_eq!(3, data.path.len());
        assert_eq!("A", data.path[0].label);
        assert_eq!("C", data.path[2].label);
    }

    #[test]
    fn text_formatter_round_trips_without_error() {
        let scenario = triangle_scenario();
        let result = SolveResult {
            algorithm: Algorithm::Greedy,
            cost: 12.0,
            time: Duration::from_millis(5),
            count: 3,
            tour: Some(Tour::new(vec![0, 1, 2])),
            max_q: 0,
            total_states: 0,
            pruned: 0,
            start_city: None,
        };
        let data = OutputData::new(&result, &scenario);
        let mut buf = Vec::new();
        data.to_writer(&mut buf, TextFormatter).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Cost: 12.000"));
    }
}
