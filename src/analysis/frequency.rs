// src/analysis/frequency.rs

use serde::{Serialize, Deserialize};
use tracing::debug;
use crate::error::SimulationError;

/// Inclusive range of the random-number space partitioned by a table.
pub const RANDOM_MIN: u32 = 1;
pub const RANDOM_MAX: u32 = 100;

/// How the random-number bounds are derived from the cumulative probabilities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BoundsPolicy {
    /// Bounds follow the 2-decimal cumulative probability shown in the table.
    #[default]
    RoundedCumulative,
    /// Bounds follow the unrounded cumulative probability, truncated to whole percent.
    UnroundedCumulative,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassInterval {
    pub lower: i64,
    pub upper: i64,
    pub midpoint: f64,
    pub frequency: usize,
    pub probability: f64,
    pub cumulative_probability: f64,
    pub raw_probability: f64,
    pub raw_cumulative: f64,
    pub random_low: u32,
    pub random_high: u32,
}

impl ClassInterval {
    /// An empty slice (`random_low > random_high`) never matches.
    pub fn contains_draw(&self, draw: u32) -> bool {
        self.random_low <= draw && draw <= self.random_high
    }

    pub fn interval_label(&self) -> String {
        format!("{} - {}", self.lower, self.upper)
    }

    pub fn random_label(&self) -> String {
        format!("{} - {}", self.random_low, self.random_high)
    }
}

/// Discretized distribution of one cleaned series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrequencyTable {
    rows: Vec<ClassInterval>,
    class_count: usize,
    class_width: i64,
    min: i64,
    max: i64,
    total: usize,
    policy: BoundsPolicy,
}

impl FrequencyTable {
    pub fn build(series: &[f64]) -> Result<Self, SimulationError> {
        Self::build_with(series, BoundsPolicy::default())
    }

    pub fn build_with(series: &[f64], policy: BoundsPolicy) -> Result<Self, SimulationError> {
        let cleaned = clean_series(series);
        let total = cleaned.len();
        let min = cleaned.iter().copied().min().ok_or(SimulationError::InsufficientData)?;
        let max = cleaned.iter().copied().max().ok_or(SimulationError::InsufficientData)?;

        let class_count = sturges_class_count(total);
        let class_width = class_width(min, max, class_count);
        let bounds = class_bounds(min, max, class_count, class_width);

        let mut rows = Vec::with_capacity(bounds.len());
        let mut cumulative_frequency = 0;
        let mut raw_cumulative = 0.0;
        let mut previous_high = 0;

        for (index, &(lower, upper)) in bounds.iter().enumerate() {
            let frequency = cleaned.iter()
                .filter(|&&v| lower <= v && v <= upper)
                .count();
            cumulative_frequency += frequency;

            let raw_probability = frequency as f64 / total as f64;
            raw_cumulative += raw_probability;
            let cumulative_hundredths = round_hundredths(raw_cumulative);

            let random_high = match policy {
                BoundsPolicy::RoundedCumulative => cumulative_hundredths,
                BoundsPolicy::UnroundedCumulative => percent_floor(cumulative_frequency, total),
            };
            let random_low = if index == 0 { RANDOM_MIN } else { previous_high + 1 };
            previous_high = random_high;

            rows.push(ClassInterval {
                lower,
                upper,
                midpoint: (lower + upper) as f64 / 2.0,
                frequency,
                probability: round_hundredths(raw_probability) as f64 / 100.0,
                cumulative_probability: cumulative_hundredths as f64 / 100.0,
                raw_probability,
                raw_cumulative,
                random_low,
                random_high,
            });
        }

        debug!(
            total, min, max, class_count, class_width,
            rows = rows.len(),
            "built frequency table"
        );

        Ok(Self { rows, class_count, class_width, min, max, total, policy })
    }

    pub fn rows(&self) -> &[ClassInterval] {
        &self.rows
    }

    /// Class count requested by Sturges' rule; `rows().len()` can be smaller
    /// when the value range is narrower than `class_count * class_width`.
    pub fn class_count(&self) -> usize {
        self.class_count
    }

    pub fn class_width(&self) -> i64 {
        self.class_width
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn policy(&self) -> BoundsPolicy {
        self.policy
    }

    /// First row whose random-number slice holds `draw`.
    pub fn find_row(&self, draw: u32) -> Option<&ClassInterval> {
        self.rows.iter().find(|row| row.contains_draw(draw))
    }
}

/// Drops missing (non-finite) values and rounds the rest half-to-even.
pub fn clean_series(series: &[f64]) -> Vec<i64> {
    series.iter()
        .copied()
        .filter(|v| v.is_finite())
        .map(|v| v.round_ties_even() as i64)
        .collect()
}

/// Sturges' rule: `ceil(1 + 3.3 * log10(n))`.
pub fn sturges_class_count(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    (1.0 + 3.3 * (n as f64).log10()).ceil() as usize
}

fn class_width(min: i64, max: i64, class_count: usize) -> i64 {
    let span = max - min + 1;
    let classes = class_count as i64;
    (span + classes - 1) / classes
}

// Classes starting past `max` are not emitted; the last emitted class closes at `max`.
fn class_bounds(min: i64, max: i64, class_count: usize, width: i64) -> Vec<(i64, i64)> {
    let mut bounds: Vec<(i64, i64)> = (0..class_count as i64)
        .map(|i| min + i * width)
        .take_while(|&lower| lower <= max)
        .map(|lower| (lower, (lower + width - 1).min(max)))
        .collect();

    if let Some(last) = bounds.last_mut() {
        last.1 = max;
    }
    bounds
}

/// `x` rounded to two decimals, as integer hundredths.
///
/// The rounding decision is made on the exact binary value of `x`, so a
/// decimal tie that is stored slightly above or below the midpoint (`0.165`,
/// `0.155`) goes to the nearer side. Exact binary ties are odd multiples of
/// `1/8` and go half-to-even.
fn round_hundredths(x: f64) -> u32 {
    let eighths = x * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let below = (x * 100.0).floor() as u32;
        return if below % 2 == 0 { below } else { below + 1 };
    }

    // float formatting rounds the exact binary value
    format!("{:.2}", x)
        .replace('.', "")
        .parse()
        .unwrap_or_else(|_| (x * 100.0).round() as u32)
}

fn percent_floor(part: usize, total: usize) -> u32 {
    (part * 100 / total) as u32
}
