use crate::dataset::UncertaintySource;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct EnvelopeToolConfig {
    /// Input CSV file with a header row.
    pub input: PathBuf,
    /// Column holding the x measurements.
    pub x_column: String,
    /// Column holding the y measurements.
    pub y_column: String,
    /// Uncertainty source for x; zero half-width when omitted.
    #[serde(default)]
    pub x_uncertainty: UncertaintySource,
    /// Uncertainty source for y; zero half-width when omitted.
    #[serde(default)]
    pub y_uncertainty: UncertaintySource,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Write the full report as JSON to this path.
    pub json_out: Option<PathBuf>,
    /// Write the fitted lines as CSV rows to this path.
    pub csv_out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Both,
}

impl OutputFormat {
    pub fn includes_text(&self) -> bool {
        matches!(self, OutputFormat::Text | OutputFormat::Both)
    }

    pub fn includes_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }
}

pub fn load_config(path: &Path) -> Result<EnvelopeToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_defaults_to_exact_points_and_text() {
        let config: EnvelopeToolConfig = serde_json::from_str(
            r#"{"input": "run.csv", "x_column": "t", "y_column": "v"}"#,
        )
        .unwrap();
        assert_eq!(
            config.x_uncertainty,
            UncertaintySource::Constant { value: 0.0 }
        );
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.json_out.is_none());
    }

    #[test]
    fn full_config_parses() {
        let config: EnvelopeToolConfig = serde_json::from_str(
            r#"{
                "input": "run.csv",
                "x_column": "t",
                "y_column": "v",
                "x_uncertainty": {"kind": "constant", "value": 0.05},
                "y_uncertainty": {"kind": "column", "name": "dv"},
                "output": {"format": "both", "json_out": "report.json"}
            }"#,
        )
        .unwrap();
        assert_eq!(
            config.y_uncertainty,
            UncertaintySource::Column { name: "dv".into() }
        );
        assert!(config.output.format.includes_text());
        assert!(config.output.format.includes_json());
    }
}
