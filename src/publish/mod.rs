//! Committing results and opening pull requests.

pub mod git;
pub mod message;

pub use git::{GitRepo, require_github};
pub use message::PullRequestText;

use crate::charts::ChartUpdate;
use crate::common::{CommandRunner, CommandSpec, log_multiline};
use crate::config::types::RunConfig;
use crate::error::Result;
use log::info;

/// What the publisher did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// `NO_PR` was set; nothing was committed
    Skipped,
    /// The working tree had no changes
    NoChanges,
    PullRequestOpened { branch: String },
    Pushed,
}

/// `<prefix>-<6 hex chars>`
pub fn new_branch_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &id[..6])
}

/// Commit chart bumps to a fresh branch and open a pull request for them.
pub fn publish_chart_updates<R: CommandRunner>(
    runner: &R,
    config: &RunConfig,
    updates: &[ChartUpdate],
    images_changed: bool,
) -> Result<PublishOutcome> {
    let text = PullRequestText::new(updates, images_changed, &config.pull_request.body_header);

    info!("Pull Request Title:");
    info!("{}", text.title);
    info!("Pull Request Body:");
    log_multiline(log::Level::Info, &text.body);

    if config.no_pr {
        info!("NO_PR set, skipping commit and pull request");
        return Ok(PublishOutcome::Skipped);
    }

    let branch = new_branch_name(&config.pull_request.branch_prefix);
    let git = GitRepo::new(runner, config);
    if !git.commit_and_push(Some(&branch), &config.pull_request.commit_message)? {
        info!("No changes for a pull request");
        return Ok(PublishOutcome::NoChanges);
    }

    info!("Creating pull request...");
    let mut spec = CommandSpec::new("gh")
        .args(["pr", "create", "-t", text.title.as_str(), "-b", text.body.as_str()])
        .args(["-B", config.main_branch.as_str(), "-H", branch.as_str()])
        .current_dir(&config.working_dir);
    for label in &config.pull_request.labels {
        spec = spec.args(["-l", label.as_str()]);
    }
    runner.run(&spec)?;
    info!("Successfully created pull request!");

    Ok(PublishOutcome::PullRequestOpened { branch })
}

/// Commit regenerated digests directly to the current branch.
pub fn publish_digests<R: CommandRunner>(runner: &R, config: &RunConfig) -> Result<PublishOutcome> {
    let git = GitRepo::new(runner, config);
    if git.commit_and_push(None, &config.digests.commit_message)? {
        Ok(PublishOutcome::Pushed)
    } else {
        Ok(PublishOutcome::NoChanges)
    }
}
