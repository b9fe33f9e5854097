//! The chart list file (`charts.yaml`).

use crate::common::log_multiline;
use crate::error::{ManifestError, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One chart tracked by the updater.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChartEntry {
    /// Chart name inside its repository
    pub name: String,
    /// Local alias for the Helm repository
    pub repo: String,
    /// Helm repository URL
    pub url: String,
    /// Pinned chart version, kept in its original textual form
    pub version: String,
}

impl ChartEntry {
    /// `<repo>/<name>`, the reference Helm uses for this chart.
    pub fn reference(&self) -> String {
        format!("{}/{}", self.repo, self.name)
    }
}

pub fn parse_charts(yaml: &str, source_name: &str) -> Result<Vec<ChartEntry>> {
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }
    let charts = serde_yaml::from_str(yaml).map_err(|e| ManifestError::Yaml {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    })?;
    Ok(charts)
}

pub fn render_charts(charts: &[ChartEntry]) -> Result<String> {
    let yaml = serde_yaml::to_string(charts).map_err(|e| ManifestError::Serialize {
        target: "chart list".to_string(),
        reason: e.to_string(),
    })?;
    Ok(yaml)
}

pub fn load_charts(path: &Path) -> Result<Vec<ChartEntry>> {
    info!("Opening file from {}...", path.display());
    let yaml = fs::read_to_string(path)?;
    log_multiline(log::Level::Debug, &yaml);
    parse_charts(&yaml, &path.display().to_string())
}

pub fn save_charts(path: &Path, charts: &[ChartEntry]) -> Result<()> {
    let yaml = render_charts(charts)?;
    fs::write(path, &yaml)?;
    info!("Written new chart version configuration to {}", path.display());
    log_multiline(log::Level::Debug, &yaml);
    Ok(())
}
