// src/analysis/mod.rs
pub mod frequency;
pub mod simulation;

use serde::{Serialize, Deserialize};
use crate::error::SimulationError;

// Re-export commonly used types
pub use frequency::{
    BoundsPolicy,
    FrequencyTable,
    clean_series,
};
pub use simulation::{
    DrawSource,
    SimulationRun,
    UniformDraws,
    simulate_series,
};

/// Table and simulated series for one data column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnRun {
    pub column: String,
    pub rounded: Vec<i64>,
    pub table: FrequencyTable,
    pub simulation: SimulationRun,
}

impl ColumnRun {
    /// Builds the table, then simulates one draw per non-missing value.
    pub fn execute(
        column: &str,
        series: &[f64],
        policy: BoundsPolicy,
        baseline: f64,
        source: &mut dyn DrawSource,
    ) -> Result<Self, SimulationError> {
        let table = FrequencyTable::build_with(series, policy)?;
        let draws = source.draws(table.total());
        let simulation = simulate_series(&draws, &table, baseline)?;

        Ok(Self {
            column: column.to_string(),
            rounded: clean_series(series),
            table,
            simulation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDraws(Vec<u32>);

    impl DrawSource for FixedDraws {
        fn draws(&mut self, count: usize) -> Vec<u32> {
            self.0.iter().copied().cycle().take(count).collect()
        }
    }

    #[test]
    fn test_column_run_uses_one_draw_per_value() {
        let series = [100.2, f64::NAN, 101.7, 103.0, 99.6];
        let mut source = FixedDraws(vec![1, 100]);

        let run = ColumnRun::execute("index", &series, BoundsPolicy::default(), 100.0, &mut source).unwrap();

        assert_eq!(run.column, "index");
        assert_eq!(run.rounded, vec![100, 102, 103, 100]);
        assert_eq!(run.table.total(), 4);
        let draws: Vec<u32> = run.simulation.draws.iter().map(|d| d.draw).collect();
        assert_eq!(draws, vec![1, 100, 1, 100]);
    }

    #[test]
    fn test_column_run_propagates_insufficient_data() {
        let mut source = UniformDraws::new(Some(1));
        let result = ColumnRun::execute("empty", &[f64::NAN], BoundsPolicy::default(), 100.0, &mut source);
        assert!(matches!(result, Err(SimulationError::InsufficientData)));
    }

    #[test]
    fn test_column_run_reports_unmatched_draws() {
        let mut source = FixedDraws(vec![0]);
        let result = ColumnRun::execute("bad", &[1.0, 2.0], BoundsPolicy::default(), 100.0, &mut source);
        assert_eq!(result.unwrap_err(), SimulationError::UnmatchedDraw { draw: 0, index: 0 });
    }
}
