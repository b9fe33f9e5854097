pub mod types;

use crate::cli::Settings;
use crate::error::{ConfigError, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use types::{FileConfig, GitHubSettings, RegistryCredentials, RunConfig};

const CONFIG_FILE_NAME: &str = ".helm-updater.toml";

/// Get the global config file path (~/.helm-updater.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (working-dir/.helm-updater.toml)
pub fn local_config_path(working_dir: &Path) -> PathBuf {
    working_dir.join(CONFIG_FILE_NAME)
}

/// Load the config file.
///
/// An explicit path must exist. Otherwise the working directory is checked
/// first, then the home directory, falling back to defaults.
pub fn load_file_config(explicit: Option<&Path>, working_dir: &Path) -> Result<FileConfig> {
    if let Some(path) = explicit {
        return parse_config_file(path);
    }

    let local = local_config_path(working_dir);
    if local.exists() {
        return parse_config_file(&local);
    }

    if let Some(global) = global_config_path()
        && global.exists()
    {
        return parse_config_file(&global);
    }

    Ok(FileConfig::default())
}

fn parse_config_file(path: &Path) -> Result<FileConfig> {
    debug!("Loading configuration from {}", path.display());
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)
        .map_err(|e| ConfigError::Parsing(format!("{}: {}", path.display(), e)))?;
    Ok(config)
}

/// Combine command-line/environment settings with the config file.
pub fn build_run_config(settings: &Settings, file: FileConfig) -> RunConfig {
    let working_dir = settings.working_directory.clone();
    RunConfig {
        chart_path: working_dir.join(&settings.chart_file),
        image_path: working_dir.join(&settings.image_file),
        values_dir: working_dir.join(&file.helm.values_dir),
        working_dir,
        digests_only: settings.digests_only,
        no_write: settings.no_write,
        no_pr: settings.no_pr,
        main_branch: settings.main_branch.clone(),
        reg_path: settings.reg_path.clone(),
        github: GitHubSettings {
            token: non_empty(&settings.github_token),
            actor: non_empty(&settings.github_actor),
            repository: non_empty(&settings.github_repository),
        },
        credentials: RegistryCredentials {
            quay_username: non_empty(&settings.quay_username),
            quay_password: non_empty(&settings.quay_password),
            gcr_json_key: non_empty(&settings.gcr_json_key),
        },
        pull_request: file.pull_request,
        digests: file.digests,
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_local_config_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            local_config_path(dir.path()),
            "[pull_request]\nlabels = [\"deps\"]\n\n[helm]\nvalues_dir = \"values\"\n",
        )
        .unwrap();

        let config = load_file_config(None, dir.path()).unwrap();
        assert_eq!(config.pull_request.labels, vec!["deps".to_string()]);
        assert_eq!(config.pull_request.branch_prefix, "helm-update");
        assert_eq!(config.helm.values_dir, PathBuf::from("values"));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[pull_request]\nlablels = []\n").unwrap();

        let err = load_file_config(Some(&path), dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse configuration"));
    }

    #[test]
    fn test_build_run_config_joins_paths() {
        let cli = Cli::try_parse_from([
            "helm-updater",
            "--working-directory",
            "/ws",
            "--chart-file",
            "c.yaml",
            "--image-file",
            "i.yaml",
        ])
        .unwrap();

        let config = build_run_config(&cli.settings, FileConfig::default());
        assert_eq!(config.chart_path, PathBuf::from("/ws/c.yaml"));
        assert_eq!(config.image_path, PathBuf::from("/ws/i.yaml"));
        assert_eq!(config.values_file("argo-cd"), PathBuf::from("/ws/generation/values/argo-cd.yaml"));
    }
}
