//! PR issue linker CLI entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration** — command-line flags with GitHub Actions
//!    environment fallbacks (see [`config::Cli`]).
//! 2. **Wire observability** — configure `tracing-subscriber` (compact text or
//!    JSON). Every `tracing` event emitted by the workspace flows through it,
//!    inside a span carrying the run id.
//! 3. **Construct infrastructure** — load the event payload, build the
//!    `GithubClient`, and inject it with a clock into `LinkerAction`.
//! 4. **Map the outcome** — a failed commit fetch or invalid configuration
//!    exits non-zero; a failed description update is logged and exits zero.

mod config;
mod telemetry;

use std::process::ExitCode;
use std::sync::Arc;

use action::{LinkerAction, RunOutcome};
use anyhow::{Context, Result};
use clap::Parser;
use github::{load_event, GithubClient, TriggerEvent};
use linker::{RunId, SystemClock};
use tracing::{error, info, info_span, Instrument};

use crate::config::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.log_format);

    let run_id = RunId::new_random();
    match run(cli).instrument(info_span!("linker_run", run_id = %run_id)).await {
        Ok(outcome) => {
            if let RunOutcome::DryRun { body, .. } = &outcome {
                println!("{body}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %format_args!("{err:#}"), "pr-issue-linker failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<RunOutcome> {
    let event = match cli.event_path.as_deref() {
        Some(path) => load_event(path)?,
        None => {
            info!("No workflow event payload configured");
            TriggerEvent::default()
        }
    };

    let Some(pull_request) = event.pull_request.as_ref() else {
        info!("Not a pull request, skipping.");
        return Ok(RunOutcome::Skipped);
    };

    let github_config = cli.github_config(event.repository.as_ref())?;
    let client = Arc::new(GithubClient::new(github_config).context("github client")?);
    let action = LinkerAction::new(client.clone(), client, Arc::new(SystemClock))
        .with_attribution_url(cli.attribution_url.clone())
        .with_dry_run(cli.dry_run);

    let outcome = action.run(pull_request).await?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut cli =
            Cli::try_parse_from(std::iter::once("pr-issue-linker").chain(args.iter().copied()))
                .expect("arguments parse");
        cli.github_token = None;
        cli.repository = None;
        cli
    }

    #[tokio::test]
    async fn functional_run_without_event_payload_is_skipped() {
        let mut cli = cli(&[]);
        cli.event_path = None;
        let outcome = run(cli).await.expect("skip");
        assert_eq!(outcome, RunOutcome::Skipped);
    }

    #[tokio::test]
    async fn functional_run_for_non_pull_request_event_is_skipped_before_config_checks() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("event.json");
        std::fs::write(&path, r#"{"ref": "refs/heads/main"}"#).expect("write event");

        let outcome = run(cli(&["--event-path", path.to_str().unwrap()]))
            .await
            .expect("skip");
        assert_eq!(outcome, RunOutcome::Skipped);
    }

    #[tokio::test]
    async fn regression_run_with_unreadable_event_payload_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.json");

        let err = run(cli(&["--event-path", path.to_str().unwrap()]))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to read event payload"));
    }

    #[tokio::test]
    async fn regression_pull_request_event_without_token_fails_before_any_request() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("event.json");
        std::fs::write(
            &path,
            r#"{"pull_request": {"number": 1, "title": "fixes #2"}, "repository": {"full_name": "o/r"}}"#,
        )
        .expect("write event");

        let err = run(cli(&["--event-path", path.to_str().unwrap()]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("GitHub token is required"));
    }
}
