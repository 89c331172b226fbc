// src/config/settings.rs
use std::path::{Path, PathBuf};
use anyhow::{Result, Context, anyhow};
use ::config::{Config, Environment, File, FileFormat};
use serde::{Serialize, Deserialize};
use tracing::debug;
use crate::analysis::BoundsPolicy;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub seed: Option<u64>,
    pub baseline: f64,
    pub bounds_policy: BoundsPolicy,
    pub delimiter: String,
    pub output_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            baseline: 100.0,
            bounds_policy: BoundsPolicy::RoundedCumulative,
            delimiter: ",".to_string(),
            output_dir: None,
        }
    }
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("freqsim").join("settings.ron"))
    }

    /// Layers the RON settings file under `FREQSIM_*` environment variables.
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(anyhow!("Settings file not found: {}", path.display()));
                }
                builder = builder.add_source(File::from(path).format(FileFormat::Ron));
            }
            None => {
                if let Some(default) = Self::default_path() {
                    debug!(path = %default.display(), "looking for default settings");
                    builder = builder.add_source(
                        File::from(default.as_path()).format(FileFormat::Ron).required(false)
                    );
                }
            }
        }

        builder
            .add_source(Environment::with_prefix("FREQSIM"))
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Failed to parse settings")
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(anyhow!("Delimiter must be a single ASCII character, got {:?}", self.delimiter)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.baseline, 100.0);
        assert_eq!(settings.seed, None);
        assert_eq!(settings.bounds_policy, BoundsPolicy::RoundedCumulative);
        assert_eq!(settings.delimiter_byte().unwrap(), b',');
    }

    #[test]
    fn test_load_from_ron_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(&path, r#"(
    seed: 7,
    baseline: 50.0,
    bounds_policy: "unrounded_cumulative",
    delimiter: ";",
)"#).unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.baseline, 50.0);
        assert_eq!(settings.bounds_policy, BoundsPolicy::UnroundedCumulative);
        assert_eq!(settings.delimiter_byte().unwrap(), b';');
        assert_eq!(settings.output_dir, None);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(Some(dir.path().join("absent.ron").as_path())).is_err());
    }

    #[test]
    fn test_bad_delimiter() {
        let settings = Settings { delimiter: "::".to_string(), ..Settings::default() };
        assert!(settings.delimiter_byte().is_err());
    }
}
