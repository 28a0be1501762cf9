//! PR issue linker GitHub infrastructure adapter.
//!
//! Implements the host ports defined in the [`linker`] crate
//! ([`linker::CommitSource`], [`linker::PullRequestUpdater`]) against the
//! GitHub REST API, and reads the workflow event payload the Actions runner
//! writes to `GITHUB_EVENT_PATH`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules.
//! Authentication headers, pagination, and status mapping are handled here;
//! the [`linker`] crate never sees them.

mod client;
mod event;

pub use client::{GithubClient, GithubClientConfig, GithubClientError, DEFAULT_API_URL};
pub use event::{load_event, parse_event, EventError, TriggerEvent};
