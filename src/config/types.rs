use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Optional settings read from `.helm-updater.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub helm: HelmConfig,
    #[serde(default)]
    pub pull_request: PullRequestConfig,
    #[serde(default)]
    pub digests: DigestsConfig,
}

/// Chart rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct HelmConfig {
    /// Directory with per-chart values overrides, relative to the working directory
    pub values_dir: PathBuf,
}

impl Default for HelmConfig {
    fn default() -> Self {
        Self {
            values_dir: PathBuf::from("generation/values"),
        }
    }
}

/// Pull request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PullRequestConfig {
    pub branch_prefix: String,
    pub labels: Vec<String>,
    pub body_header: String,
    pub commit_message: String,
}

impl Default for PullRequestConfig {
    fn default() -> Self {
        Self {
            branch_prefix: "helm-update".to_string(),
            labels: vec!["dependencies".to_string(), "github_actions".to_string()],
            body_header: "## Helm Chart Updater".to_string(),
            commit_message: "Updated chart versions".to_string(),
        }
    }
}

/// Digest-only mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DigestsConfig {
    pub commit_message: String,
}

impl Default for DigestsConfig {
    fn default() -> Self {
        Self {
            commit_message: "Updated image digests [ci skip]".to_string(),
        }
    }
}

/// GitHub identity used when publishing. Validated only when needed.
#[derive(Clone, Default)]
pub struct GitHubSettings {
    pub token: Option<String>,
    pub actor: Option<String>,
    pub repository: Option<String>,
}

impl std::fmt::Debug for GitHubSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubSettings")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("actor", &self.actor)
            .field("repository", &self.repository)
            .finish()
    }
}

/// Static registry credentials. ECR tokens are fetched at login time.
#[derive(Clone, Default)]
pub struct RegistryCredentials {
    pub quay_username: Option<String>,
    pub quay_password: Option<String>,
    pub gcr_json_key: Option<String>,
}

impl std::fmt::Debug for RegistryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryCredentials")
            .field("quay_username", &self.quay_username)
            .field("quay_password", &self.quay_password.as_ref().map(|_| "<redacted>"))
            .field("gcr_json_key", &self.gcr_json_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub working_dir: PathBuf,
    pub chart_path: PathBuf,
    pub image_path: PathBuf,
    pub values_dir: PathBuf,
    pub digests_only: bool,
    pub no_write: bool,
    pub no_pr: bool,
    pub main_branch: String,
    pub reg_path: String,
    pub github: GitHubSettings,
    pub credentials: RegistryCredentials,
    pub pull_request: PullRequestConfig,
    pub digests: DigestsConfig,
}

impl RunConfig {
    /// Configuration rooted at `working_dir` with every other setting at its default.
    pub fn for_working_dir(working_dir: impl Into<PathBuf>) -> Self {
        let working_dir = working_dir.into();
        let helm = HelmConfig::default();
        Self {
            chart_path: working_dir.join("charts.yaml"),
            image_path: working_dir.join("images.yaml"),
            values_dir: working_dir.join(helm.values_dir),
            working_dir,
            digests_only: false,
            no_write: false,
            no_pr: false,
            main_branch: "main".to_string(),
            reg_path: "reg".to_string(),
            github: GitHubSettings::default(),
            credentials: RegistryCredentials::default(),
            pull_request: PullRequestConfig::default(),
            digests: DigestsConfig::default(),
        }
    }

    /// Path of the optional values override for `chart`.
    pub fn values_file(&self, chart: &str) -> PathBuf {
        self.values_dir.join(format!("{}.yaml", chart))
    }
}
