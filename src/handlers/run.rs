use super::digests::generate_digests;
use super::RunOutcome;
use crate::charts::{ChartEntry, ChartUpdate, check_for_updates, load_charts, save_charts};
use crate::common::CommandRunner;
use crate::config::types::RunConfig;
use crate::error::Result;
use crate::helm::HelmClient;
use crate::publish::publish_chart_updates;
use log::info;

/// Result of the chart checking stage.
pub enum ChartStage {
    /// Nothing newer upstream
    UpToDate,
    /// Updates found but `NO_WRITE` prevented persisting them
    NotWritten(Vec<ChartUpdate>),
    /// Updates written to the chart file
    Written {
        charts: Vec<ChartEntry>,
        updates: Vec<ChartUpdate>,
    },
}

/// Check every chart and rewrite the chart file when something changed.
pub fn update_charts<R: CommandRunner>(
    config: &RunConfig,
    helm: &mut HelmClient<'_, R>,
) -> Result<ChartStage> {
    let mut charts = load_charts(&config.chart_path)?;
    let updates = check_for_updates(&mut charts, helm)?;

    if updates.is_empty() {
        info!("No newer versions found, nothing to do.");
        return Ok(ChartStage::UpToDate);
    }

    if config.no_write {
        info!("NO_WRITE set, preventing file writing and pull request");
        return Ok(ChartStage::NotWritten(updates));
    }

    info!("Newer versions found, updating {}", config.chart_path.display());
    save_charts(&config.chart_path, &charts)?;
    Ok(ChartStage::Written { charts, updates })
}

/// The full pipeline, or the digest-only pipeline when configured.
pub fn handle_run<R: CommandRunner>(config: &RunConfig, runner: &R) -> Result<RunOutcome> {
    if config.digests_only {
        return super::handle_digests(config, runner);
    }

    let mut helm = HelmClient::new(runner);
    let (charts, updates) = match update_charts(config, &mut helm)? {
        ChartStage::UpToDate => return Ok(RunOutcome::UpToDate),
        ChartStage::NotWritten(updates) => return Ok(RunOutcome::NotWritten(updates)),
        ChartStage::Written { charts, updates } => (charts, updates),
    };

    let images = generate_digests(config, &charts, &mut helm, runner)?;
    let images_changed = !images.is_empty();

    info!("Creating pull request...");
    let publish = publish_chart_updates(runner, config, &updates, images_changed)?;
    Ok(RunOutcome::ChartsUpdated { updates, publish })
}
