//! Port traits the orchestration layer depends on.
//!
//! Infrastructure crates implement these; the linker domain never sees HTTP,
//! authentication, or pagination details.

use async_trait::async_trait;

use crate::{CommitRecord, HostError, PullRequestId, Timestamp};

/// Reads the commits that belong to a pull request.
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Returns every commit of `pull_request`, oldest first.
    ///
    /// Implementations must return an error rather than an empty list when
    /// the commits cannot be read.
    async fn list_commits(&self, pull_request: PullRequestId)
        -> Result<Vec<CommitRecord>, HostError>;
}

/// Writes a pull request's title and description.
#[async_trait]
pub trait PullRequestUpdater: Send + Sync {
    async fn update_pull_request(
        &self,
        pull_request: PullRequestId,
        title: &str,
        body: &str,
    ) -> Result<(), HostError>;
}

/// Source of the timestamp embedded in the annotation block.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// [`Clock`] backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
