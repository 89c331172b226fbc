// src/file/dataset.rs

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use anyhow::{Result, Context, anyhow};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell {
    Missing,
    Number(f64),
    Text,
}

fn parse_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cell::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_nan() => Cell::Missing,
        Ok(value) => Cell::Number(value),
        Err(_) => Cell::Text,
    }
}

/// Tabular data read from a delimited text file, kept as raw cells.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn from_csv_path(path: &Path, delimiter: u8) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow!("Data file not found: {}", path.display()));
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open data file: {}", path.display()))?;
        let dataset = Self::from_reader(BufReader::new(file), delimiter)
            .with_context(|| format!("Failed to read data file: {}", path.display()))?;

        info!(
            path = %path.display(),
            columns = dataset.headers().len(),
            rows = dataset.row_count(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn cells(&self, index: usize) -> impl Iterator<Item = Cell> + '_ {
        self.rows.iter()
            .map(move |row| row.get(index).map_or(Cell::Missing, |raw| parse_cell(raw)))
    }

    /// Columns whose non-blank cells all parse as numbers, with at least one number.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.headers.iter()
            .enumerate()
            .filter(|(index, _)| {
                let mut has_number = false;
                for cell in self.cells(*index) {
                    match cell {
                        Cell::Text => return false,
                        Cell::Number(_) => has_number = true,
                        Cell::Missing => {}
                    }
                }
                has_number
            })
            .map(|(_, name)| name.clone())
            .collect()
    }

    /// Values of a numeric column, with blank or NaN cells as `f64::NAN`.
    pub fn column(&self, name: &str) -> Result<Vec<f64>> {
        let index = self.column_index(name)
            .ok_or_else(|| anyhow!("Column not found: {}", name))?;

        let values = self.cells(index)
            .enumerate()
            .map(|(row, cell)| match cell {
                Cell::Number(value) => Ok(value),
                Cell::Missing => Ok(f64::NAN),
                Cell::Text => Err(anyhow!("Column {} is not numeric (row {})", name, row + 1)),
            })
            .collect::<Result<Vec<f64>>>()?;

        debug!(column = name, len = values.len(), "read column");
        Ok(values)
    }
}
