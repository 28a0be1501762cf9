use std::sync::Arc;

use linker::{
    extract_references, upsert_annotation, Clock, CommitSource, HostError, MessageSet,
    PullRequestId, PullRequestSnapshot, PullRequestUpdater, ReferenceList,
    DEFAULT_ATTRIBUTION_URL,
};
use thiserror::Error;
use tracing::{debug, error, info, instrument};

/// Errors that end a run without touching the pull request.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The pull request's commits could not be read.
    ///
    /// Surfaced instead of treating the pull request as having no commits,
    /// which would silently skip every reference made in commit messages.
    #[error("failed to fetch commits for pull request #{pull_request}")]
    FetchCommits {
        pull_request: PullRequestId,
        #[source]
        source: HostError,
    },
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The triggering event was not a pull request.
    Skipped,

    /// Neither the title nor any commit message references an issue.
    NoReferences,

    /// The description was rewritten with a fresh annotation block.
    Linked {
        references: ReferenceList,
        body: String,
    },

    /// Dry run: the new description was computed but not written.
    DryRun {
        references: ReferenceList,
        body: String,
    },

    /// References were found but writing the description failed.
    UpdateFailed {
        references: ReferenceList,
        error: HostError,
    },
}

/// Links the issues referenced in a pull request's title and commits to the
/// pull request description.
pub struct LinkerAction {
    commits: Arc<dyn CommitSource>,
    updater: Arc<dyn PullRequestUpdater>,
    clock: Arc<dyn Clock>,
    attribution_url: String,
    dry_run: bool,
}

impl LinkerAction {
    pub fn new(
        commits: Arc<dyn CommitSource>,
        updater: Arc<dyn PullRequestUpdater>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            commits,
            updater,
            clock,
            attribution_url: DEFAULT_ATTRIBUTION_URL.to_string(),
            dry_run: false,
        }
    }

    /// Overrides the link in the annotation's attribution line.
    pub fn with_attribution_url(mut self, url: impl Into<String>) -> Self {
        self.attribution_url = url.into();
        self
    }

    /// When set, the new description is computed and logged but never written.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Runs the action for the pull request carried by the triggering event.
    #[instrument(skip_all, fields(pull_request = %pull_request.number))]
    pub async fn run(&self, pull_request: &PullRequestSnapshot) -> Result<RunOutcome, ActionError> {
        debug!("Linking PR to issue");
        let references = self.collect_references(pull_request).await?;
        debug!(issues = %references, "Issues");

        if references.is_empty() {
            info!("No issue references found in title or commits");
            return Ok(RunOutcome::NoReferences);
        }

        let body = self.annotated_body(pull_request, &references);
        if self.dry_run {
            info!(issues = %references, "Dry run, pull request left unchanged");
            return Ok(RunOutcome::DryRun { references, body });
        }

        debug!("Linking Issues to PR");
        match self
            .updater
            .update_pull_request(pull_request.number, &pull_request.title, &body)
            .await
        {
            Ok(()) => {
                info!(issues = %references, "Pull request description updated");
                Ok(RunOutcome::Linked { references, body })
            }
            Err(err) => {
                error!(error = %err, "Error linking PR to an issue.");
                Ok(RunOutcome::UpdateFailed {
                    references,
                    error: err,
                })
            }
        }
    }

    /// Returns the issues referenced by the pull request title and commits.
    ///
    /// The description is not scanned; GitHub links closing keywords written
    /// there on its own.
    pub async fn collect_references(
        &self,
        pull_request: &PullRequestSnapshot,
    ) -> Result<ReferenceList, ActionError> {
        debug!(title = %pull_request.title, "PR title");
        debug!(body = pull_request.body.as_deref().unwrap_or(""), "PR body");

        let commits = self
            .commits
            .list_commits(pull_request.number)
            .await
            .map_err(|source| ActionError::FetchCommits {
                pull_request: pull_request.number,
                source,
            })?;

        let messages = MessageSet::new(
            pull_request.title.clone(),
            commits
                .into_iter()
                .map(|commit| {
                    debug!(sha = %commit.sha, "Scanning commit");
                    commit.message
                })
                .collect(),
        );
        if tracing::enabled!(tracing::Level::DEBUG) {
            let texts: Vec<&str> = messages.iter().collect();
            debug!(
                messages = %serde_json::to_string(&texts).unwrap_or_default(),
                "Searching through the following messages"
            );
        }

        Ok(extract_references(&messages))
    }

    fn annotated_body(
        &self,
        pull_request: &PullRequestSnapshot,
        references: &ReferenceList,
    ) -> String {
        let current = pull_request.body.as_deref().unwrap_or("");
        let body = upsert_annotation(
            current,
            references,
            self.clock.now(),
            &self.attribution_url,
        );
        debug!(body = %body, "New PR body");
        body
    }
}
