// src/input/command.rs
use std::path::PathBuf;
use anyhow::{Result, anyhow};
use dialoguer::MultiSelect;
use tracing::{info, warn};

use crate::analysis::{ColumnRun, UniformDraws};
use crate::file::{Dataset, ResultsFileManager};
use crate::state::AppState;
use crate::ui;

pub trait Command {
    fn execute(&self, state: &mut AppState) -> Result<()>;
}

pub struct LoadDatasetCommand(pub PathBuf);
impl Command for LoadDatasetCommand {
    fn execute(&self, state: &mut AppState) -> Result<()> {
        let delimiter = state.settings.delimiter_byte()?;
        state.dataset = Some(Dataset::from_csv_path(&self.0, delimiter)?);
        state.source = Some(self.0.clone());
        state.selected.clear();
        state.runs.clear();
        Ok(())
    }
}

pub struct ListColumnsCommand;
impl Command for ListColumnsCommand {
    fn execute(&self, state: &mut AppState) -> Result<()> {
        for column in state.dataset()?.numeric_columns() {
            println!("{}", column);
        }
        Ok(())
    }
}

/// Chooses the columns to simulate: the named ones, a prompt, or every
/// numeric column when neither is given.
pub struct SelectColumnsCommand {
    pub columns: Vec<String>,
    pub interactive: bool,
}
impl Command for SelectColumnsCommand {
    fn execute(&self, state: &mut AppState) -> Result<()> {
        let numeric = state.dataset()?.numeric_columns();

        let selected = if !self.columns.is_empty() {
            for column in &self.columns {
                if !numeric.contains(column) {
                    return Err(anyhow!("Column {} is missing or not numeric", column));
                }
            }
            self.columns.clone()
        } else if self.interactive {
            let picks = MultiSelect::new()
                .with_prompt("Select the columns to simulate")
                .items(&numeric)
                .interact()?;
            picks.into_iter().map(|i| numeric[i].clone()).collect()
        } else {
            numeric
        };

        if selected.is_empty() {
            return Err(anyhow!("No numeric column selected"));
        }

        info!(columns = ?selected, "selected columns");
        state.selected = selected;
        Ok(())
    }
}

/// Builds a table and simulated series for every selected column. Columns
/// the core rejects are skipped with a warning.
pub struct RunSimulationCommand;
impl Command for RunSimulationCommand {
    fn execute(&self, state: &mut AppState) -> Result<()> {
        let dataset = state.dataset()?;
        let settings = &state.settings;
        let mut source = UniformDraws::new(settings.seed);
        let mut runs = Vec::with_capacity(state.selected.len());

        for column in &state.selected {
            let series = dataset.column(column)?;
            match ColumnRun::execute(
                column,
                &series,
                settings.bounds_policy,
                settings.baseline,
                &mut source,
            ) {
                Ok(run) => {
                    info!(
                        column = %column,
                        classes = run.table.rows().len(),
                        draws = run.simulation.summary.count,
                        "simulated column"
                    );
                    runs.push(run);
                }
                Err(e) => warn!(column = %column, "skipping column: {}", e),
            }
        }

        if runs.is_empty() {
            return Err(anyhow!("None of the selected columns could be simulated"));
        }
        state.runs = runs;
        Ok(())
    }
}

pub struct PrintReportCommand;
impl Command for PrintReportCommand {
    fn execute(&self, state: &mut AppState) -> Result<()> {
        for run in &state.runs {
            println!("=== {} ===", run.column);
            println!("Rounded values: {}", ui::render_rounded(&run.rounded));
            println!();
            print!("{}", ui::render_frequency_table(&run.table));
            println!();
            print!("{}", ui::render_simulation(&run.simulation));
            println!();
        }
        Ok(())
    }
}

pub struct SaveResultsCommand(pub PathBuf);
impl Command for SaveResultsCommand {
    fn execute(&self, state: &mut AppState) -> Result<()> {
        if state.runs.is_empty() {
            return Err(anyhow!("No simulation results to save"));
        }

        let manager = ResultsFileManager::new(&self.0);
        let run_dir = manager.save_run(&state.runs, &state.settings, state.source.as_deref())?;

        let metadata = manager.load_metadata(&run_dir)?;
        println!("Saved run {} to {}", metadata.run_id, run_dir.display());
        for entry in &metadata.columns {
            println!("  {}: {}, {}", entry.column, entry.table_file, entry.simulation_file);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    const DATA: &str = "\
label,index,empty
a,100,
b,102,
c,101,
d,103,
e,100,
f,104,
g,102,
h,101,
";

    fn loaded_state(seed: u64) -> AppState {
        let settings = Settings { seed: Some(seed), ..Settings::default() };
        let mut state = AppState::new(settings);
        state.dataset = Some(Dataset::from_reader(DATA.as_bytes(), b',').unwrap());
        state
    }

    #[test]
    fn test_select_named_columns() {
        let mut state = loaded_state(1);
        SelectColumnsCommand { columns: vec!["index".to_string()], interactive: false }
            .execute(&mut state)
            .unwrap();
        assert_eq!(state.selected, vec!["index"]);
    }

    #[test]
    fn test_select_rejects_text_column() {
        let mut state = loaded_state(1);
        let result = SelectColumnsCommand { columns: vec!["label".to_string()], interactive: false }
            .execute(&mut state);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_selection_is_all_numeric_columns() {
        let mut state = loaded_state(1);
        SelectColumnsCommand { columns: Vec::new(), interactive: false }
            .execute(&mut state)
            .unwrap();
        assert_eq!(state.selected, vec!["index"]);
    }

    #[test]
    fn test_run_simulation() {
        let mut state = loaded_state(11);
        state.selected = vec!["index".to_string()];
        RunSimulationCommand.execute(&mut state).unwrap();

        assert_eq!(state.runs.len(), 1);
        let run = &state.runs[0];
        assert_eq!(run.table.rows().len(), 3);
        assert_eq!(run.simulation.draws.len(), 8);
        assert!(run.simulation
            .draws
            .iter()
            .all(|d| [100.5, 102.5, 104.0].contains(&d.value)));
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let mut first = loaded_state(5);
        first.selected = vec!["index".to_string()];
        RunSimulationCommand.execute(&mut first).unwrap();

        let mut second = loaded_state(5);
        second.selected = vec!["index".to_string()];
        RunSimulationCommand.execute(&mut second).unwrap();

        assert_eq!(first.runs[0].simulation, second.runs[0].simulation);
    }

    #[test]
    fn test_column_without_values_is_skipped() {
        let mut state = AppState::new(Settings::default());
        state.dataset = Some(Dataset::from_reader("x,y\n1,nan\n2,\n".as_bytes(), b',').unwrap());
        state.selected = vec!["x".to_string(), "y".to_string()];
        RunSimulationCommand.execute(&mut state).unwrap();

        assert_eq!(state.runs.len(), 1);
        assert_eq!(state.runs[0].column, "x");
    }

    #[test]
    fn test_save_requires_runs() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = loaded_state(1);
        assert!(SaveResultsCommand(dir.path().to_path_buf()).execute(&mut state).is_err());

        state.selected = vec!["index".to_string()];
        RunSimulationCommand.execute(&mut state).unwrap();
        SaveResultsCommand(dir.path().to_path_buf()).execute(&mut state).unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_commands_need_a_dataset() {
        let mut state = AppState::new(Settings::default());
        assert!(ListColumnsCommand.execute(&mut state).is_err());
        assert!(RunSimulationCommand.execute(&mut state).is_err());
    }
}
