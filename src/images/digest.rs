//! Multi-architecture digest lookup through the registry inspector (`reg`).

use super::reference::ImageReference;
use crate::common::{CommandRunner, CommandSpec};
use crate::error::{ManifestError, RegistryError, Result};
use log::info;
use serde::{Deserialize, Serialize};

/// Manifest list as printed by `reg manifest <image>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestList {
    #[serde(default)]
    pub manifests: Vec<PlatformManifest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformManifest {
    pub digest: String,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub platform: Platform,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Platform {
    #[serde(default)]
    pub architecture: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub variant: Option<String>,
}

/// The pair of digests every image must provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchDigests {
    pub amd64: String,
    pub arm64: String,
}

impl ManifestList {
    pub fn parse(json: &[u8], image: &str) -> Result<Self> {
        let list = serde_json::from_slice(json).map_err(|e| ManifestError::Json {
            source_name: format!("manifest of {}", image),
            reason: e.to_string(),
        })?;
        Ok(list)
    }

    /// Digest of the first manifest for `arch`.
    pub fn digest_for(&self, arch: &str) -> Option<&str> {
        self.manifests
            .iter()
            .find(|m| m.platform.architecture == arch)
            .map(|m| m.digest.as_str())
    }

    /// Both required digests, or an error naming the first missing architecture.
    pub fn arch_digests(&self, image: &str) -> Result<ArchDigests> {
        let require = |arch: &str| {
            self.digest_for(arch)
                .map(str::to_string)
                .ok_or_else(|| RegistryError::MissingDigest {
                    image: image.to_string(),
                    arch: arch.to_string(),
                })
        };
        Ok(ArchDigests {
            amd64: require("amd64")?,
            arm64: require("arm64")?,
        })
    }
}

pub struct DigestResolver<'a, R: CommandRunner> {
    runner: &'a R,
    reg_path: &'a str,
}

impl<'a, R: CommandRunner> DigestResolver<'a, R> {
    pub fn new(runner: &'a R, reg_path: &'a str) -> Self {
        Self { runner, reg_path }
    }

    pub fn resolve(&self, image: &ImageReference) -> Result<ArchDigests> {
        let output = self
            .runner
            .run(&CommandSpec::new(self.reg_path).args(["manifest", image.raw.as_str()]))?;
        let digests = ManifestList::parse(&output, &image.raw)?.arch_digests(&image.raw)?;
        info!("Resolved digests for {}", image.raw);
        Ok(digests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MULTI_ARCH: &str = r#"{
  "schemaVersion": 2,
  "mediaType": "application/vnd.docker.distribution.manifest.list.v2+json",
  "manifests": [
    {
      "mediaType": "application/vnd.docker.distribution.manifest.v2+json",
      "size": 1357,
      "digest": "sha256:aaa",
      "platform": { "architecture": "amd64", "os": "linux" }
    },
    {
      "mediaType": "application/vnd.docker.distribution.manifest.v2+json",
      "size": 1357,
      "digest": "sha256:bbb",
      "platform": { "architecture": "arm", "os": "linux", "variant": "v7" }
    },
    {
      "mediaType": "application/vnd.docker.distribution.manifest.v2+json",
      "size": 1357,
      "digest": "sha256:ccc",
      "platform": { "architecture": "arm64", "os": "linux", "variant": "v8" }
    }
  ]
}"#;

    #[test]
    fn test_extracts_both_digests() {
        let list = ManifestList::parse(MULTI_ARCH.as_bytes(), "img").unwrap();
        assert_eq!(
            list.arch_digests("img").unwrap(),
            ArchDigests {
                amd64: "sha256:aaa".to_string(),
                arm64: "sha256:ccc".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_arm64_is_fatal() {
        let json = r#"{"manifests":[{"digest":"sha256:aaa","platform":{"architecture":"amd64","os":"linux"}}]}"#;
        let list = ManifestList::parse(json.as_bytes(), "quay.io/a/b:1").unwrap();
        let err = list.arch_digests("quay.io/a/b:1").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("quay.io/a/b:1"));
        assert!(message.contains("arm64"));
    }

    #[test]
    fn test_single_arch_manifest_has_no_digests() {
        // A plain image manifest carries no `manifests` list.
        let json = r#"{"schemaVersion":2,"config":{"digest":"sha256:x"}}"#;
        let list = ManifestList::parse(json.as_bytes(), "img").unwrap();
        assert!(list.arch_digests("img").is_err());
    }

    #[test]
    fn test_invalid_json() {
        assert!(ManifestList::parse(b"not json", "img").is_err());
    }
}
