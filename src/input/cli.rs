// src/input/cli.rs
use std::path::PathBuf;
use clap::Parser;
use crate::analysis::BoundsPolicy;
use crate::config::Settings;

/// Builds a frequency table from numeric columns of a CSV file and runs a
/// Monte Carlo simulation over it.
#[derive(Debug, Parser)]
#[command(name = "freqsim", version, about)]
pub struct Cli {
    /// CSV file with a header row
    pub file: PathBuf,

    /// Column to simulate; repeat for several columns
    #[arg(short = 'c', long = "column")]
    pub columns: Vec<String>,

    /// Seed for the random draws
    #[arg(long)]
    pub seed: Option<u64>,

    /// Settings file (RON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory to save tables and simulated series into
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// How random-number bounds follow the cumulative probability
    #[arg(long, value_enum)]
    pub bounds: Option<BoundsPolicy>,

    /// Baseline the percent change is measured against
    #[arg(long)]
    pub baseline: Option<f64>,

    /// Field delimiter of the CSV file
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Only list the numeric columns
    #[arg(long)]
    pub list: bool,

    /// Pick columns from a prompt
    #[arg(short, long)]
    pub interactive: bool,
}

impl Cli {
    /// Command line flags win over file and environment settings.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(output) = &self.output {
            settings.output_dir = Some(output.clone());
        }
        if let Some(bounds) = self.bounds {
            settings.bounds_policy = bounds;
        }
        if let Some(baseline) = self.baseline {
            settings.baseline = baseline;
        }
        if let Some(delimiter) = self.delimiter {
            settings.delimiter = delimiter.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_apply() {
        let cli = Cli::try_parse_from([
            "freqsim", "data.csv",
            "-c", "index", "--column", "cost",
            "--seed", "9",
            "--bounds", "unrounded-cumulative",
            "--baseline", "50",
            "-d", ";",
        ]).unwrap();

        assert_eq!(cli.file, PathBuf::from("data.csv"));
        assert_eq!(cli.columns, vec!["index", "cost"]);
        assert!(!cli.list);

        let mut settings = Settings::default();
        cli.apply_to(&mut settings);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.bounds_policy, BoundsPolicy::UnroundedCumulative);
        assert_eq!(settings.baseline, 50.0);
        assert_eq!(settings.delimiter, ";");
        assert_eq!(settings.output_dir, None);
    }

    #[test]
    fn test_flags_leave_settings_alone_when_absent() {
        let cli = Cli::try_parse_from(["freqsim", "data.csv", "--list"]).unwrap();
        assert!(cli.list);

        let mut settings = Settings { seed: Some(1), ..Settings::default() };
        cli.apply_to(&mut settings);
        assert_eq!(settings, Settings { seed: Some(1), ..Settings::default() });
    }

    #[test]
    fn test_every_flag_has_help() {
        use clap::CommandFactory;

        let command = Cli::command();
        for arg in command.get_arguments() {
            assert!(arg.get_help().is_some(), "--{} has no help", arg.get_id());
        }
    }

    #[test]
    fn test_file_is_required() {
        assert!(Cli::try_parse_from(["freqsim"]).is_err());
    }
}
