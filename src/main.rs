// src/main.rs
use std::io::IsTerminal;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod analysis;
mod config;
mod error;
mod file;
mod input;
mod state;
mod ui;

use crate::config::Settings;
use input::cli::Cli;
use input::command::{
    Command,
    ListColumnsCommand,
    LoadDatasetCommand,
    PrintReportCommand,
    RunSimulationCommand,
    SaveResultsCommand,
    SelectColumnsCommand,
};
use state::AppState;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    cli.apply_to(&mut settings);

    let mut state = AppState::new(settings);
    LoadDatasetCommand(cli.file.clone()).execute(&mut state)?;

    if cli.list {
        return ListColumnsCommand.execute(&mut state);
    }

    let interactive = cli.interactive
        || (cli.columns.is_empty() && std::io::stdin().is_terminal());

    let mut commands: Vec<Box<dyn Command>> = vec![
        Box::new(SelectColumnsCommand { columns: cli.columns.clone(), interactive }),
        Box::new(RunSimulationCommand),
        Box::new(PrintReportCommand),
    ];
    if let Some(output) = state.settings.output_dir.clone() {
        commands.push(Box::new(SaveResultsCommand(output)));
    }

    for command in commands {
        command.execute(&mut state)?;
    }
    Ok(())
}
