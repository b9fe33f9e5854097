use std::process::ExitStatus;

use thiserror::Error;

/// Top-level error for a helm-updater run.
///
/// Every failure is fatal to the run; `main` logs it and exits non-zero.
#[derive(Debug, Error)]
pub enum UpdaterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command `{program} {}` failed ({status}): {stderr}", .args.join(" "))]
    Command {
        program: String,
        args: Vec<String>,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to parse YAML from {source_name}: {reason}")]
    Yaml { source_name: String, reason: String },

    #[error("Failed to parse JSON from {source_name}: {reason}")]
    Json { source_name: String, reason: String },

    #[error("Failed to serialize {target}: {reason}")]
    Serialize { target: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Chart {chart} has an unparseable version '{version}'")]
    InvalidVersion { chart: String, version: String },

    #[error("Repository search returned no versions for chart {chart}")]
    NoPublishedVersions { chart: String },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("No login configuration for {0}")]
    UnsupportedRegistry(String),

    #[error("Failed to find both ARM and AMD digests for image {image} (missing {arch})")]
    MissingDigest { image: String, arch: String },

    #[error("Cannot derive an AWS region from ECR host {0}")]
    InvalidEcrHost(String),

    #[error("Cannot parse image reference '{0}'")]
    InvalidReference(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No {description} (env {name}) provided")]
    MissingEnv {
        name: &'static str,
        description: &'static str,
    },

    #[error("Failed to parse configuration: {0}")]
    Parsing(String),
}

pub type Result<T> = std::result::Result<T, UpdaterError>;
