use crate::common::{CommandRunner, CommandSpec};
use crate::config::types::{GitHubSettings, RunConfig};
use crate::error::{ConfigError, Result};
use log::info;

/// Git operations in the working checkout.
pub struct GitRepo<'a, R: CommandRunner> {
    runner: &'a R,
    config: &'a RunConfig,
}

impl<'a, R: CommandRunner> GitRepo<'a, R> {
    pub fn new(runner: &'a R, config: &'a RunConfig) -> Self {
        Self { runner, config }
    }

    fn git<I, S>(&self, args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runner.run(
            &CommandSpec::new("git")
                .args(args)
                .current_dir(&self.config.working_dir),
        )
    }

    /// Set the commit identity from the GitHub actor.
    pub fn configure_identity(&self) -> Result<()> {
        let actor = require_github(&self.config.github)?;
        self.git(["config", "user.name", actor])?;
        self.git(["config", "user.email", "<>"])?;
        Ok(())
    }

    /// Commit everything and push.
    ///
    /// With `branch`, a new branch is created and pushed upstream; otherwise
    /// the current branch is pushed. Returns `false` when the working tree
    /// had nothing to commit.
    pub fn commit_and_push(&self, branch: Option<&str>, message: &str) -> Result<bool> {
        self.configure_identity()?;

        if let Some(branch) = branch {
            info!("Creating new branch {}...", branch);
            self.git(["checkout", "-b", branch])?;
        }

        info!("Committing changes to remote branch...");
        let status = self.git(["status", "--porcelain"])?;
        if String::from_utf8_lossy(&status).trim().is_empty() {
            info!("No changes, skipping commit");
            return Ok(false);
        }

        self.git(["add", "-A"])?;
        self.git(["commit", "-m", message])?;

        match branch {
            Some(branch) => self.git(["push", "-u", "origin", branch])?,
            None => self.git(["push"])?,
        };

        info!("Successfully pushed changes to remote branch!");
        Ok(true)
    }
}

/// Check the GitHub settings needed to publish, returning the actor.
pub fn require_github(github: &GitHubSettings) -> Result<&str> {
    if github.token.is_none() {
        return Err(ConfigError::MissingEnv {
            name: "GITHUB_TOKEN",
            description: "GitHub token",
        }
        .into());
    }
    if github.repository.is_none() {
        return Err(ConfigError::MissingEnv {
            name: "GITHUB_REPOSITORY",
            description: "GitHub repository",
        }
        .into());
    }
    github.actor.as_deref().ok_or_else(|| {
        ConfigError::MissingEnv {
            name: "GITHUB_ACTOR",
            description: "GitHub actor",
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_github_reports_first_missing() {
        let mut github = GitHubSettings::default();
        let err = require_github(&github).unwrap_err();
        assert!(err.to_string().contains("GITHUB_TOKEN"));

        github.token = Some("t".to_string());
        let err = require_github(&github).unwrap_err();
        assert!(err.to_string().contains("GITHUB_REPOSITORY"));

        github.repository = Some("org/repo".to_string());
        let err = require_github(&github).unwrap_err();
        assert!(err.to_string().contains("GITHUB_ACTOR"));

        github.actor = Some("bot".to_string());
        assert_eq!(require_github(&github).unwrap(), "bot");
    }
}
