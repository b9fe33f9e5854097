use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "helm-updater")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bump Helm chart versions and pin multi-arch image digests")]
#[command(long_about = "Checks a list of Helm charts for newer upstream versions, rewrites the chart list, renders every chart to discover container images, resolves their amd64/arm64 digests and opens a pull request with the result.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub settings: Settings,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Update chart versions, regenerate image digests and open a pull request
    Run,

    /// Regenerate the image digest file for the current chart versions
    Digests,

    /// Report available chart updates without writing anything
    Check {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

/// Settings normally provided by the CI environment.
///
/// Switches are on for any value except an empty or false-like one
/// (`0`, `false`, `no`, `off`).
#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Directory holding the chart list and the git checkout
    #[arg(long, global = true, env = "WORKING_DIRECTORY", default_value = "/github/workspace")]
    pub working_directory: PathBuf,

    /// Chart list file name, relative to the working directory
    #[arg(long, global = true, env = "CHART_FILE", default_value = "charts.yaml")]
    pub chart_file: String,

    /// Image digest file name, relative to the working directory
    #[arg(long, global = true, env = "IMAGE_FILE", default_value = "images.yaml")]
    pub image_file: String,

    /// Only regenerate image digests and commit them to the current branch
    #[arg(long, global = true, env = "DIGESTS_ONLY", value_parser = FalseyValueParser::new())]
    pub digests_only: bool,

    /// Stop after detecting chart updates, before writing any file
    #[arg(long, global = true, env = "NO_WRITE", value_parser = FalseyValueParser::new())]
    pub no_write: bool,

    /// Do not commit or open a pull request for chart updates
    #[arg(long, global = true, env = "NO_PR", value_parser = FalseyValueParser::new())]
    pub no_pr: bool,

    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true, hide = true)]
    pub github_token: Option<String>,

    #[arg(long, global = true, env = "GITHUB_ACTOR", hide = true)]
    pub github_actor: Option<String>,

    #[arg(long, global = true, env = "GITHUB_REPOSITORY", hide = true)]
    pub github_repository: Option<String>,

    /// Base branch for pull requests
    #[arg(long, global = true, env = "MAIN_BRANCH", default_value = "main")]
    pub main_branch: String,

    /// Registry inspector binary used to fetch manifest lists
    #[arg(long, global = true, env = "REG_PATH", default_value = "reg")]
    pub reg_path: String,

    #[arg(long, global = true, env = "QUAY_USERNAME", hide = true)]
    pub quay_username: Option<String>,

    #[arg(long, global = true, env = "QUAY_PASSWORD", hide_env_values = true, hide = true)]
    pub quay_password: Option<String>,

    #[arg(long, global = true, env = "GCR_JSON_KEY", hide_env_values = true, hide = true)]
    pub gcr_json_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        let level = if self.quiet {
            log::LevelFilter::Error
        } else {
            match self.verbose {
                0 => log::LevelFilter::Info,
                1 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            }
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .format_target(false)
            .init();
    }
}
