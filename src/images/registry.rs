//! Registry login.
//!
//! Supported registries:
//!
//! | Host pattern        | Credentials                                      |
//! |---------------------|--------------------------------------------------|
//! | `quay.io`           | `QUAY_USERNAME` / `QUAY_PASSWORD`                |
//! | contains `gcr.io`   | `_json_key` / `GCR_JSON_KEY`                     |
//! | contains `.ecr.`    | `AWS` / `aws ecr get-login-password`             |
//! | default (Docker Hub)| none                                             |
//!
//! ECR logins need `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY` in the
//! environment with `ecr:GetAuthorizationToken` and `ecr:BatchGetImage`.

use super::reference::ImageReference;
use crate::common::{CommandRunner, CommandSpec, log_multiline};
use crate::config::types::RegistryCredentials;
use crate::error::{RegistryError, Result};
use log::info;
use std::collections::HashSet;

/// How to authenticate against a registry host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStrategy {
    /// The public default registry; pulled anonymously
    Anonymous,
    Quay,
    Gcr,
    Ecr { region: String },
}

/// Pick the login strategy for `host`. Empty means the default registry.
pub fn classify_registry(host: &str) -> Result<LoginStrategy> {
    if host.is_empty() {
        Ok(LoginStrategy::Anonymous)
    } else if host == "quay.io" {
        Ok(LoginStrategy::Quay)
    } else if host.contains("gcr.io") {
        Ok(LoginStrategy::Gcr)
    } else if host.contains(".ecr.") {
        Ok(LoginStrategy::Ecr {
            region: ecr_region(host)?,
        })
    } else {
        Err(RegistryError::UnsupportedRegistry(host.to_string()).into())
    }
}

/// `<account>.dkr.ecr.<region>.amazonaws.com` -> `<region>`
fn ecr_region(host: &str) -> Result<String> {
    let labels: Vec<&str> = host.split('.').collect();
    labels
        .iter()
        .position(|label| *label == "ecr")
        .filter(|i| labels.len() > i + 2)
        .map(|i| labels[i + 1])
        .filter(|region| !region.is_empty())
        .map(str::to_string)
        .ok_or_else(|| RegistryError::InvalidEcrHost(host.to_string()).into())
}

/// Logs in to each registry once per run.
pub struct RegistryAuthenticator<'a, R: CommandRunner> {
    runner: &'a R,
    credentials: &'a RegistryCredentials,
    logged_in: HashSet<String>,
}

impl<'a, R: CommandRunner> RegistryAuthenticator<'a, R> {
    pub fn new(runner: &'a R, credentials: &'a RegistryCredentials) -> Self {
        Self {
            runner,
            credentials,
            logged_in: HashSet::new(),
        }
    }

    /// Log in to the registries of every image.
    ///
    /// Fails on the first unsupported registry.
    pub fn login_all(&mut self, images: &[ImageReference]) -> Result<()> {
        for image in images {
            self.login(image.registry.as_deref().unwrap_or(""))?;
        }
        Ok(())
    }

    pub fn login(&mut self, host: &str) -> Result<()> {
        let strategy = classify_registry(host)?;
        if self.logged_in.contains(host) {
            return Ok(());
        }

        let (username, password) = match &strategy {
            LoginStrategy::Anonymous => return Ok(()),
            LoginStrategy::Quay => (
                self.credentials.quay_username.clone().unwrap_or_default(),
                self.credentials.quay_password.clone().unwrap_or_default(),
            ),
            LoginStrategy::Gcr => (
                "_json_key".to_string(),
                self.credentials.gcr_json_key.clone().unwrap_or_default(),
            ),
            LoginStrategy::Ecr { region } => ("AWS".to_string(), self.ecr_password(region)?),
        };

        let output = self.runner.run(
            &CommandSpec::new("docker")
                .args(["login", host, "--username", username.as_str(), "--password-stdin"])
                .secret_stdin(password),
        )?;
        info!("{} login result:", host);
        log_multiline(log::Level::Info, &String::from_utf8_lossy(&output));

        self.logged_in.insert(host.to_string());
        Ok(())
    }

    fn ecr_password(&self, region: &str) -> Result<String> {
        let output = self.runner.run(
            &CommandSpec::new("aws")
                .args(["ecr", "get-login-password", "--region", region])
                .env("AWS_REGION", region),
        )?;
        Ok(String::from_utf8_lossy(&output).trim_end().to_string())
    }
}
