//! # Helm Updater
//!
//! A CI step that keeps a declarative list of Helm charts current and pins
//! the container images those charts deploy.
//!
//! ## Features
//!
//! - **Chart bumps**: queries each chart's repository and rewrites `charts.yaml`
//!   when a semantically newer version is published
//! - **Image discovery**: renders each chart with `helm template` and scrapes
//!   image references from the output
//! - **Digest pinning**: logs in to the registries involved and records the
//!   amd64/arm64 manifest digests of every image in `images.yaml`
//! - **Publishing**: commits the result and opens a pull request with `gh`
//!
//! All external tools are driven through [`common::CommandRunner`], so the
//! whole pipeline can run against a scripted runner.
//!
//! ## Example
//!
//! ```rust,no_run
//! use helm_updater::{SystemCommandRunner, config::types::RunConfig, handle_run};
//!
//! # fn main() -> helm_updater::Result<()> {
//! let config = RunConfig::for_working_dir("/github/workspace");
//! let outcome = handle_run(&config, &SystemCommandRunner)?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

pub mod charts;
pub mod cli;
pub mod common;
pub mod config;
pub mod error;
pub mod handlers;
pub mod helm;
pub mod images;
pub mod publish;

pub use common::{CommandRunner, CommandSpec, SystemCommandRunner};
pub use error::{Result, UpdaterError};
pub use handlers::*;
