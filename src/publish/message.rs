use crate::charts::ChartUpdate;

/// Title and body of the pull request for a set of chart bumps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestText {
    pub title: String,
    pub body: String,
}

impl PullRequestText {
    pub fn new(updates: &[ChartUpdate], images_changed: bool, body_header: &str) -> Self {
        let title = format!(
            "Bump {}",
            updates
                .iter()
                .map(|u| format!("{} from {} to {}", u.name, u.old_version, u.version))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut body = format!("{}\n", body_header);
        for update in updates {
            body.push_str(&format!(
                "Bumps {} Helm Chart version from {} to {}.\n",
                update.name, update.old_version, update.version
            ));
        }
        if images_changed {
            body.push_str("\n---\nAlso updated list of image digests.");
        }

        Self { title, body }
    }
}
