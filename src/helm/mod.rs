//! Thin wrapper around the `helm` CLI.

use crate::charts::{ChartEntry, VersionSource};
use crate::common::{CommandRunner, CommandSpec};
use crate::error::{ChartError, ManifestError, Result};
use log::info;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// One row of `helm search repo -o yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub name: Option<String>,
    pub version: String,
    #[serde(default)]
    pub app_version: Option<String>,
}

pub struct HelmClient<'a, R: CommandRunner> {
    runner: &'a R,
    added_repos: HashSet<String>,
}

impl<'a, R: CommandRunner> HelmClient<'a, R> {
    pub fn new(runner: &'a R) -> Self {
        Self {
            runner,
            added_repos: HashSet::new(),
        }
    }

    /// Add and refresh the chart's repository, once per alias.
    pub fn add_repo(&mut self, chart: &ChartEntry) -> Result<()> {
        if self.added_repos.contains(&chart.repo) {
            return Ok(());
        }

        info!("Getting {} Helm repository from {}", chart.name, chart.url);
        self.runner.run(
            &CommandSpec::new("helm").args(["repo", "add", chart.repo.as_str(), chart.url.as_str()]),
        )?;
        self.runner
            .run(&CommandSpec::new("helm").args(["repo", "update", chart.repo.as_str()]))?;

        self.added_repos.insert(chart.repo.clone());
        Ok(())
    }

    /// The newest published version of `chart`, as Helm prints it.
    pub fn search_latest(&self, chart: &ChartEntry) -> Result<String> {
        info!("Pulling {} versions", chart.name);
        let reference = chart.reference();
        let output = self.runner.run(
            &CommandSpec::new("helm").args(["search", "repo", reference.as_str(), "-l", "-o", "yaml"]),
        )?;

        let results = parse_search_results(&String::from_utf8_lossy(&output), &reference)?;
        results
            .into_iter()
            .next()
            .map(|r| r.version)
            .ok_or_else(|| {
                ChartError::NoPublishedVersions {
                    chart: chart.name.clone(),
                }
                .into()
            })
    }

    /// Render every template of `chart`, including CRDs.
    pub fn template(&self, chart: &ChartEntry, values: Option<&Path>, working_dir: &Path) -> Result<String> {
        let mut spec = CommandSpec::new("helm")
            .args(["template", chart.name.as_str()])
            .arg(chart.reference())
            .args(["--version", chart.version.as_str(), "--include-crds"])
            .current_dir(working_dir);

        if let Some(values) = values {
            spec = spec.arg("--values").arg(values.display().to_string());
        }

        let output = self.runner.run(&spec)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

impl<R: CommandRunner> VersionSource for HelmClient<'_, R> {
    fn latest_version(&mut self, chart: &ChartEntry) -> Result<String> {
        self.add_repo(chart)?;
        self.search_latest(chart)
    }
}

pub fn parse_search_results(yaml: &str, reference: &str) -> Result<Vec<SearchResult>> {
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }
    let results = serde_yaml::from_str(yaml).map_err(|e| ManifestError::Yaml {
        source_name: format!("helm search repo {}", reference),
        reason: e.to_string(),
    })?;
    Ok(results)
}
