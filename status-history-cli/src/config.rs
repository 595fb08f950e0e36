//! Configuration loading and parsing
//!
//! The config file is optional; command-line flags override anything it sets.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use status_history::{DateRange, Event};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub range: RangeConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Events listed inline in the config file
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RangeConfig {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl RangeConfig {
    /// Resolve to a concrete range; both ends must be known
    pub fn resolve(&self) -> Result<DateRange> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Ok(DateRange::new(from, to)),
            (None, _) => bail!("Report range is missing its start date (--from or [range].from)"),
            (_, None) => bail!("Report range is missing its end date (--to or [range].to)"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputConfig {
    /// Event file: `.json` array or `date,delta,flag` records
    pub events_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Write the report here instead of stdout
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Txt,
    Json,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    log::debug!(
        "Config {:?}: {} inline events, events file {:?}",
        path,
        config.events.len(),
        config.input.events_file
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [range]
            from = "2014-08-01"
            to = "2014-08-31"

            [input]
            events_file = "events.txt"

            [output]
            format = "json"

            [[events]]
            date = "2014-08-01"
            delta = 1
            flag = "DISPATCH"

            [[events]]
            date = "2014-08-02"
            delta = -1
            flag = "DISPATCH"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        let range = config.range.resolve().unwrap();
        assert_eq!(range.num_days(), 31);
        assert_eq!(config.input.events_file, Some(PathBuf::from("events.txt")));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.events.len(), 2);
        assert_eq!(config.events[1].delta, -1);
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.output.format, OutputFormat::Txt);
        assert!(config.events.is_empty());
        assert!(config.range.resolve().is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[range]\nfrom = \"2014-08-02\"\nto = \"2014-08-01\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert!(config.range.resolve().unwrap().is_empty());
    }

    #[test]
    fn test_load_config_rejects_bad_dates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[range]\nfrom = \"August 1st\"").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }
}
