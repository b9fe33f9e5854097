//! Splitting raw `registry/name:tag` strings into their parts.

use crate::error::{RegistryError, Result};

pub const DEFAULT_REGISTRY: &str = "docker.io";
const LEGACY_DEFAULT_REGISTRY: &str = "index.docker.io";

/// A parsed image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// The string as it was scraped, used for tool invocations
    pub raw: String,
    /// Registry host; `None` for the public default registry
    pub registry: Option<String>,
    /// Repository path without registry, tag or digest
    pub name: String,
    pub tag: Option<String>,
    pub digest: Option<String>,
}

impl ImageReference {
    /// Parse `raw` with Docker's normalisation rules.
    ///
    /// Parsing is best-effort: anything non-empty yields a reference.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RegistryError::InvalidReference(raw.to_string()).into());
        }

        let (rest, digest) = match trimmed.split_once('@') {
            Some((rest, digest)) => (rest, Some(digest.to_string())),
            None => (trimmed, None),
        };

        // A tag is a colon in the final path component; earlier colons are ports.
        let last_slash = rest.rfind('/').map(|i| i + 1).unwrap_or(0);
        let (path, tag) = match rest[last_slash..].rfind(':') {
            Some(i) => (
                &rest[..last_slash + i],
                Some(rest[last_slash + i + 1..].to_string()),
            ),
            None => (rest, None),
        };

        let (registry, name) = match path.split_once('/') {
            Some((host, remainder)) if is_registry_host(host) => (host.to_string(), remainder.to_string()),
            _ => (DEFAULT_REGISTRY.to_string(), path.to_string()),
        };

        let is_default = registry == DEFAULT_REGISTRY || registry == LEGACY_DEFAULT_REGISTRY;
        let name = if is_default && !name.contains('/') {
            format!("library/{}", name)
        } else {
            name
        };

        Ok(Self {
            raw: raw.to_string(),
            registry: (!is_default).then_some(registry),
            name,
            tag,
            digest,
        })
    }

    /// Registry host, with the default registry spelled out.
    pub fn registry_host(&self) -> &str {
        self.registry.as_deref().unwrap_or(DEFAULT_REGISTRY)
    }
}

fn is_registry_host(component: &str) -> bool {
    component.contains('.') || component.contains(':') || component == "localhost"
}
