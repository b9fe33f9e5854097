//! Image discovery, registry login and digest resolution.

pub mod digest;
pub mod manifest;
pub mod reference;
pub mod registry;
pub mod scraper;

pub use digest::{ArchDigests, DigestResolver, ManifestList};
pub use manifest::{ImageEntry, render_images, save_images};
pub use reference::ImageReference;
pub use registry::{LoginStrategy, RegistryAuthenticator, classify_registry};
pub use scraper::{dedup_refs, extract_image_refs, scrape_images};

use crate::charts::ChartEntry;
use crate::common::CommandRunner;
use crate::config::types::RunConfig;
use crate::error::Result;
use crate::helm::HelmClient;
use log::info;

/// Render every chart and collect the distinct raw image references.
pub fn discover_images<R: CommandRunner>(
    charts: &[ChartEntry],
    helm: &mut HelmClient<'_, R>,
    config: &RunConfig,
) -> Result<Vec<String>> {
    let mut rendered = Vec::with_capacity(charts.len());

    for chart in charts {
        helm.add_repo(chart)?;

        let values_file = config.values_file(&chart.name);
        let values = values_file.is_file().then_some(values_file.as_path());
        if let Some(values) = values {
            info!("Using values override {}", values.display());
        }

        rendered.push(helm.template(chart, values, &config.working_dir)?);
    }

    let refs = scrape_images(rendered.iter().map(String::as_str));
    info!("Found {} distinct image references", refs.len());
    Ok(refs)
}

/// Parse, log in and resolve digests for every raw reference, in order.
pub fn resolve_images<R: CommandRunner>(
    refs: &[String],
    runner: &R,
    config: &RunConfig,
) -> Result<Vec<ImageEntry>> {
    let images = refs
        .iter()
        .map(|raw| ImageReference::parse(raw))
        .collect::<Result<Vec<_>>>()?;

    RegistryAuthenticator::new(runner, &config.credentials).login_all(&images)?;

    let resolver = DigestResolver::new(runner, &config.reg_path);
    let mut entries = Vec::with_capacity(images.len());
    for image in &images {
        entries.push(ImageEntry::new(image, resolver.resolve(image)?));
    }
    Ok(entries)
}
