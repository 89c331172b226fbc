// src/state/mod.rs
use std::path::PathBuf;
use anyhow::{Result, anyhow};

use crate::analysis::ColumnRun;
use crate::config::Settings;
use crate::file::Dataset;

#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,
    pub source: Option<PathBuf>,
    pub dataset: Option<Dataset>,
    pub selected: Vec<String>,
    pub runs: Vec<ColumnRun>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            source: None,
            dataset: None,
            selected: Vec::new(),
            runs: Vec::new(),
        }
    }

    pub fn dataset(&self) -> Result<&Dataset> {
        self.dataset
            .as_ref()
            .ok_or_else(|| anyhow!("No dataset loaded"))
    }
}
