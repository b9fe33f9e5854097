use super::RunOutcome;
use crate::charts::{ChartEntry, load_charts};
use crate::common::CommandRunner;
use crate::config::types::RunConfig;
use crate::error::Result;
use crate::helm::HelmClient;
use crate::images::{ImageEntry, discover_images, resolve_images, save_images};
use crate::publish::publish_digests;
use log::info;

/// Discover, resolve and write the image digest file for `charts`.
pub fn generate_digests<R: CommandRunner>(
    config: &RunConfig,
    charts: &[ChartEntry],
    helm: &mut HelmClient<'_, R>,
    runner: &R,
) -> Result<Vec<ImageEntry>> {
    let refs = discover_images(charts, helm, config)?;
    let images = resolve_images(&refs, runner, config)?;
    save_images(&config.image_path, &images)?;
    Ok(images)
}

/// Regenerate digests for the pinned chart versions and push them to the
/// current branch.
pub fn handle_digests<R: CommandRunner>(config: &RunConfig, runner: &R) -> Result<RunOutcome> {
    let charts = load_charts(&config.chart_path)?;
    let mut helm = HelmClient::new(runner);
    let images = generate_digests(config, &charts, &mut helm, runner)?;

    if images.is_empty() {
        info!("No images found, nothing to commit");
        return Ok(RunOutcome::DigestsUpdated { images: 0, publish: None });
    }

    let publish = publish_digests(runner, config)?;
    Ok(RunOutcome::DigestsUpdated {
        images: images.len(),
        publish: Some(publish),
    })
}
