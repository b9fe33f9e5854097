//! Chart version checking.

use super::manifest::ChartEntry;
use crate::error::{ChartError, Result};
use log::info;
use semver::Version;
use serde::Serialize;
use std::cmp::Ordering;

/// A chart whose pinned version was bumped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartUpdate {
    pub name: String,
    pub old_version: String,
    pub version: String,
}

/// Source of "latest published version" answers.
pub trait VersionSource {
    fn latest_version(&mut self, chart: &ChartEntry) -> Result<String>;
}

/// Parse a chart version leniently: an optional leading `v` and missing
/// minor/patch components are accepted (`v1.2` reads as `1.2.0`).
pub fn parse_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    if let Ok(version) = Version::parse(trimmed) {
        return Some(version);
    }

    // Pad the numeric core, keeping any pre-release/build suffix.
    let split_at = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(split_at);
    let parts: Vec<&str> = core.split('.').collect();
    if parts.is_empty() || parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
        return None;
    }

    let mut padded = parts.join(".");
    for _ in parts.len()..3 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);
    Version::parse(&padded).ok()
}

/// Compare two chart versions by semantic-version precedence.
pub fn compare_versions(chart: &str, current: &str, latest: &str) -> Result<Ordering> {
    let parse = |raw: &str| {
        parse_version(raw).ok_or_else(|| ChartError::InvalidVersion {
            chart: chart.to_string(),
            version: raw.to_string(),
        })
    };
    let current = parse(current)?;
    let latest = parse(latest)?;
    Ok(current.cmp_precedence(&latest))
}

/// Bump every chart whose latest published version is strictly newer.
///
/// Entries are updated in place; the returned list holds only the charts
/// that changed, in file order.
pub fn check_for_updates<S: VersionSource>(
    charts: &mut [ChartEntry],
    source: &mut S,
) -> Result<Vec<ChartUpdate>> {
    let mut updates = Vec::new();

    for chart in charts.iter_mut() {
        let latest = source.latest_version(chart)?;

        if compare_versions(&chart.name, &chart.version, &latest)? == Ordering::Less {
            info!("Found newer version of {}: {}", chart.name, latest);
            let old_version = std::mem::replace(&mut chart.version, latest);
            updates.push(ChartUpdate {
                name: chart.name.clone(),
                old_version,
                version: chart.version.clone(),
            });
        } else {
            info!("Current version {} of {} is the latest", chart.version, chart.name);
        }
    }

    Ok(updates)
}
