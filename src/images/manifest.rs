//! The image digest file (`images.yaml`).

use super::digest::ArchDigests;
use super::reference::ImageReference;
use crate::common::log_multiline;
use crate::error::{ManifestError, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One pinned image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    pub name: String,
    pub digests: ArchDigests,
}

impl ImageEntry {
    pub fn new(image: &ImageReference, digests: ArchDigests) -> Self {
        Self {
            registry: image.registry.clone(),
            name: image.name.clone(),
            digests,
        }
    }
}

pub fn render_images(images: &[ImageEntry]) -> Result<String> {
    let yaml = serde_yaml::to_string(images).map_err(|e| ManifestError::Serialize {
        target: "image list".to_string(),
        reason: e.to_string(),
    })?;
    Ok(yaml)
}

pub fn save_images(path: &Path, images: &[ImageEntry]) -> Result<()> {
    let yaml = render_images(images)?;
    fs::write(path, &yaml)?;
    info!("Written {} image digests to {}", images.len(), path.display());
    log_multiline(log::Level::Debug, &yaml);
    Ok(())
}
