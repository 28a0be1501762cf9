use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use github::{GithubClientConfig, DEFAULT_API_URL};
use linker::{RepositoryId, DEFAULT_ATTRIBUTION_URL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Every setting falls back to the variable the GitHub Actions runner
/// exports, so the binary runs as an action step without arguments.
#[derive(Parser, Debug)]
#[command(
    name = "pr-issue-linker",
    version,
    about = "Link issues closed by a pull request's title and commits in its description"
)]
pub struct Cli {
    #[arg(
        long,
        env = "GITHUB_EVENT_PATH",
        help = "Workflow event payload; runs without one are skipped"
    )]
    pub event_path: Option<PathBuf>,

    #[arg(long, env = "GITHUB_REPOSITORY", help = "Repository as owner/repo")]
    pub repository: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    #[arg(long, default_value_t = 30_000)]
    pub request_timeout_ms: u64,

    #[arg(
        long,
        default_value_t = false,
        help = "Compute the new description and print it instead of updating the pull request"
    )]
    pub dry_run: bool,

    #[arg(long, default_value = DEFAULT_ATTRIBUTION_URL)]
    pub attribution_url: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Validates the GitHub settings and turns them into a client config.
    ///
    /// The repository may come from the event payload when it was not
    /// configured explicitly.
    pub fn github_config(
        &self,
        event_repository: Option<&RepositoryId>,
    ) -> Result<GithubClientConfig> {
        let repository = match self.repository.as_deref() {
            Some(slug) => RepositoryId::new(slug)
                .with_context(|| format!("invalid repository '{slug}', expected owner/repo"))?,
            None => event_repository.cloned().context(
                "repository is not configured; set GITHUB_REPOSITORY or pass --repository",
            )?,
        };

        let token = self
            .github_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string);
        if token.is_none() && !self.dry_run {
            bail!("a GitHub token is required; set GITHUB_TOKEN or pass --github-token");
        }

        Ok(GithubClientConfig {
            api_base: self.api_url.clone(),
            token,
            repository,
            request_timeout: Duration::from_millis(self.request_timeout_ms.max(1)),
        })
    }
}
