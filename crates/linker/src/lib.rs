//! Core domain for the PR issue linker.
//!
//! Scans a pull request's title and commit messages for closing keywords
//! (`fixes #12`) and maintains a single machine-owned block in the pull
//! request description that restates those closures for GitHub.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! [`extract`] and [`annotation`] are pure functions over strings; the
//! [`ports`] module defines what the orchestration layer needs from the host.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`PullRequestId`, `RepositoryId`, etc.) |
//! | [`types`] | Value types (`IssueReference`, `ReferenceList`, `MessageSet`, etc.) |
//! | [`extract`] | Linking-phrase scanner |
//! | [`annotation`] | Annotation block rendering and upsert |
//! | [`ports`] | Host capability traits |
//! | [`errors`] | Host boundary errors |

pub mod annotation;
pub mod errors;
pub mod extract;
pub mod identifiers;
pub mod ports;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use annotation::{
    annotation_count, render_block, render_clause, strip_annotation, upsert_annotation,
    ATTRIBUTION_NAME, BLOCK_BEGIN, BLOCK_END, DEFAULT_ATTRIBUTION_URL,
};
pub use errors::HostError;
pub use extract::{extract, extract_references, scan_message, LINKING_TERMS};
pub use identifiers::{CommitSha, PullRequestId, RepositoryId, RunId};
pub use ports::{Clock, CommitSource, PullRequestUpdater, SystemClock};
pub use types::{
    CommitRecord, InvalidIssueReference, IssueReference, MessageSet, PullRequestSnapshot,
    ReferenceList, Timestamp,
};
