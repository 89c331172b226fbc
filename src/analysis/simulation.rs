// src/analysis/simulation.rs

use serde::{Serialize, Deserialize};
use rand::prelude::*;
use rand_distr::{Distribution, Uniform};
use statrs::statistics::Statistics;
use tracing::debug;
use crate::analysis::frequency::{FrequencyTable, RANDOM_MAX, RANDOM_MIN};
use crate::error::SimulationError;

/// Maps each draw to the midpoint of the first row whose random slice holds it.
pub fn simulate(draws: &[u32], table: &FrequencyTable) -> Result<Vec<f64>, SimulationError> {
    draws.iter()
        .enumerate()
        .map(|(index, &draw)| {
            table.find_row(draw)
                .map(|row| row.midpoint)
                .ok_or(SimulationError::UnmatchedDraw { draw, index })
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulatedDraw {
    pub draw: u32,
    pub value: f64,
    pub percent_change: f64,
    pub percent_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl SimulationSummary {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self { count: 0, min: 0.0, max: 0.0, mean: 0.0, std_dev: 0.0 };
        }

        let std_dev = if values.len() > 1 {
            values.iter().std_dev()
        } else {
            0.0
        };

        Self {
            count: values.len(),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean: values.iter().mean(),
            std_dev,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationRun {
    pub baseline: f64,
    pub draws: Vec<SimulatedDraw>,
    pub summary: SimulationSummary,
}

/// Runs [`simulate`] and derives the change of every value against `baseline`.
pub fn simulate_series(
    draws: &[u32],
    table: &FrequencyTable,
    baseline: f64,
) -> Result<SimulationRun, SimulationError> {
    let values = simulate(draws, table)?;

    let rows = draws.iter()
        .zip(values.iter())
        .map(|(&draw, &value)| {
            let percent_change = value - baseline;
            SimulatedDraw {
                draw,
                value,
                percent_change,
                percent_label: percent_label(percent_change),
            }
        })
        .collect();

    let summary = SimulationSummary::from_values(&values);
    debug!(count = summary.count, mean = summary.mean, "simulated series");

    Ok(SimulationRun { baseline, draws: rows, summary })
}

pub fn percent_label(change: f64) -> String {
    format!("{:.2}%", change)
}

/// Source of uniformly distributed integer draws.
pub trait DrawSource {
    fn draws(&mut self, count: usize) -> Vec<u32>;
}

pub struct UniformDraws {
    rng: StdRng,
    range: Uniform<u32>,
}

impl UniformDraws {
    /// Draws over `[RANDOM_MIN, RANDOM_MAX]`; a seed makes the sequence reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        Self { rng, range: Uniform::new_inclusive(RANDOM_MIN, RANDOM_MAX) }
    }
}

impl DrawSource for UniformDraws {
    fn draws(&mut self, count: usize) -> Vec<u32> {
        (0..count).map(|_| self.range.sample(&mut self.rng)).collect()
    }
}
