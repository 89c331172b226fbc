// src/file/results.rs

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::{Result, Context, anyhow};
use chrono::prelude::*;
use csv::Writer;
use serde::{Serialize, Deserialize};
use tracing::info;
use uuid::Uuid;
use super::{FileHandler, file_stem, pretty_ron};
use crate::analysis::{BoundsPolicy, ColumnRun, FrequencyTable, SimulationRun};
use crate::config::Settings;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnEntry {
    pub column: String,
    pub table_file: String,
    pub simulation_file: String,
    pub classes: usize,
    pub draws: usize,
    pub mean: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunMetadata {
    pub version: String,
    pub run_id: String,
    pub created: DateTime<Utc>,
    pub source: Option<String>,
    pub seed: Option<u64>,
    pub baseline: f64,
    pub bounds_policy: BoundsPolicy,
    pub columns: Vec<ColumnEntry>,
}

#[derive(Debug)]
pub struct MetadataFileHandler;

impl FileHandler<RunMetadata> for MetadataFileHandler {
    fn load(&self, path: &Path) -> Result<RunMetadata> {
        let content = fs::read_to_string(path)?;
        ron::from_str(&content).context("Failed to parse run metadata")
    }

    fn save(&self, data: &RunMetadata, path: &Path) -> Result<()> {
        let content = ron::ser::to_string_pretty(data, pretty_ron())?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Writes simulation runs below `<base>/<run-id>/`.
#[derive(Debug)]
pub struct ResultsFileManager {
    base_path: PathBuf,
    metadata_handler: MetadataFileHandler,
}

impl ResultsFileManager {
    pub fn new(base_path: &Path) -> Self {
        Self {
            base_path: base_path.to_path_buf(),
            metadata_handler: MetadataFileHandler,
        }
    }

    /// Saves every run plus a `run.ron` index and returns the run directory.
    pub fn save_run(&self, runs: &[ColumnRun], settings: &Settings, source: Option<&Path>) -> Result<PathBuf> {
        let run_id = Uuid::new_v4().to_string();
        let run_dir = self.base_path.join(&run_id);
        fs::create_dir_all(&run_dir)
            .with_context(|| format!("Failed to create run directory: {}", run_dir.display()))?;

        let mut columns = Vec::with_capacity(runs.len());
        for run in runs {
            let stem = file_stem(&run.column);
            let table_file = format!("frequency_{}.csv", stem);
            let simulation_file = format!("simulation_{}.csv", stem);

            self.save_frequency_table(&run_dir.join(&table_file), &run.table)?;
            self.save_simulation(&run_dir.join(&simulation_file), &run.simulation)?;

            columns.push(ColumnEntry {
                column: run.column.clone(),
                table_file,
                simulation_file,
                classes: run.table.rows().len(),
                draws: run.simulation.summary.count,
                mean: run.simulation.summary.mean,
            });
        }

        let metadata = RunMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            run_id,
            created: Utc::now(),
            source: source.map(|p| p.to_string_lossy().into_owned()),
            seed: settings.seed,
            baseline: settings.baseline,
            bounds_policy: settings.bounds_policy,
            columns,
        };
        self.metadata_handler.save(&metadata, &run_dir.join("run.ron"))?;

        info!(path = %run_dir.display(), columns = metadata.columns.len(), "saved run");
        Ok(run_dir)
    }

    fn save_frequency_table(&self, path: &Path, table: &FrequencyTable) -> Result<()> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record([
            "interval",
            "midpoint",
            "frequency",
            "probability",
            "cumulative_probability",
            "random_interval",
        ])?;

        for row in table.rows() {
            writer.write_record(&[
                row.interval_label(),
                row.midpoint.to_string(),
                row.frequency.to_string(),
                format!("{:.2}", row.probability),
                format!("{:.2}", row.cumulative_probability),
                row.random_label(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    fn save_simulation(&self, path: &Path, run: &SimulationRun) -> Result<()> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(["draw", "simulated", "percent_change", "percent_change_value"])?;

        for draw in &run.draws {
            writer.write_record(&[
                draw.draw.to_string(),
                draw.value.to_string(),
                draw.percent_label.clone(),
                draw.percent_change.to_string(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    pub fn load_metadata(&self, run_dir: &Path) -> Result<RunMetadata> {
        let metadata_path = run_dir.join("run.ron");
        if !metadata_path.exists() {
            return Err(anyhow!("Metadata file not found: {}", metadata_path.display()));
        }

        self.metadata_handler.load(&metadata_path)
            .with_context(|| format!("Failed to load metadata file: {}", metadata_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{ColumnRun, UniformDraws};

    fn sample_run(column: &str) -> ColumnRun {
        let series = [100.0, 102.0, 101.0, 103.0, 100.0, 104.0, 102.0, 101.0];
        let mut source = UniformDraws::new(Some(3));
        ColumnRun::execute(column, &series, BoundsPolicy::default(), 100.0, &mut source).unwrap()
    }

    #[test]
    fn test_save_run_writes_tables_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ResultsFileManager::new(dir.path());
        let settings = Settings { seed: Some(3), ..Settings::default() };

        let runs = vec![sample_run("Index A"), sample_run("cost")];
        let run_dir = manager.save_run(&runs, &settings, Some(Path::new("data.csv"))).unwrap();

        let table_csv = fs::read_to_string(run_dir.join("frequency_index_a.csv")).unwrap();
        let mut lines = table_csv.lines();
        assert_eq!(
            lines.next(),
            Some("interval,midpoint,frequency,probability,cumulative_probability,random_interval")
        );
        assert_eq!(lines.next(), Some("100 - 101,100.5,4,0.50,0.50,1 - 50"));
        assert_eq!(lines.count(), 2);

        let simulation_csv = fs::read_to_string(run_dir.join("simulation_cost.csv")).unwrap();
        assert_eq!(simulation_csv.lines().count(), 9);

        let metadata = manager.load_metadata(&run_dir).unwrap();
        assert_eq!(metadata.seed, Some(3));
        assert_eq!(metadata.source.as_deref(), Some("data.csv"));
        assert_eq!(metadata.columns.len(), 2);
        assert_eq!(metadata.columns[0].column, "Index A");
        assert_eq!(metadata.columns[0].classes, 3);
        assert_eq!(metadata.columns[0].draws, 8);
    }

    #[test]
    fn test_load_metadata_missing() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ResultsFileManager::new(dir.path());
        assert!(manager.load_metadata(dir.path()).is_err());
    }
}
