//! PR issue linker orchestration.
//!
//! [`LinkerAction`] drives one run: read the pull request's commits through
//! [`linker::CommitSource`], extract the referenced issues, upsert the
//! annotation block, and write the description back through
//! [`linker::PullRequestUpdater`].
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** The action sequences calls between the pure
//! functions in the [`linker`] crate and the host ports. It holds no domain
//! rules of its own beyond the run policy:
//!
//! | Condition | Result |
//! |-----------|--------|
//! | Event carries no pull request | [`RunOutcome::Skipped`], returned by the caller without building an action |
//! | Commit fetch fails | `Err(`[`ActionError::FetchCommits`]`)` |
//! | No references found | [`RunOutcome::NoReferences`], description untouched |
//! | Update fails | [`RunOutcome::UpdateFailed`], error logged, not retried |

mod runner;

pub use runner::{ActionError, LinkerAction, RunOutcome};
