//! Newtype domain identifiers.
//!
//! Every domain concept that has an identity is represented as a distinct newtype
//! wrapping a primitive, so a [`PullRequestId`] can never be passed where a
//! commit SHA or repository slug is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identifiers: GitHub-integer-backed
// ---------------------------------------------------------------------------

/// Identifies a GitHub Pull Request by its repository-scoped number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PullRequestId(u64);

impl PullRequestId {
    /// Creates a new identifier from a raw integer.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PullRequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single linker run (one invocation of the action).
///
/// Generated fresh for every CLI invocation and recorded on the run span so
/// all log lines from a single run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: String-backed
// ---------------------------------------------------------------------------

/// A Git commit SHA (40-character lowercase hex string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitSha(String);

impl CommitSha {
    /// Creates a SHA, returning `None` if the value is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        (!value.is_empty()).then_some(Self(value))
    }
}

impl std::fmt::Display for CommitSha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies a GitHub repository in `"owner/repo"` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryId {
    owner: String,
    name: String,
}

impl RepositoryId {
    /// Parses an `"owner/repo"` slug.
    ///
    /// Returns `None` unless the slug has exactly two non-empty,
    /// whitespace-free segments.
    pub fn new(slug: impl AsRef<str>) -> Option<Self> {
        let (owner, name) = slug.as_ref().trim().split_once('/')?;
        let valid = |segment: &str| {
            !segment.is_empty() && !segment.contains('/') && !segment.contains(char::is_whitespace)
        };
        if valid(owner) && valid(name) {
            Some(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            })
        } else {
            None
        }
    }

    /// Returns the owning user or organisation.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_id_splits_owner_and_name() {
        let repo = RepositoryId::new("octo-org/widgets").expect("valid slug");
        assert_eq!(repo.owner(), "octo-org");
        assert_eq!(repo.name(), "widgets");
        assert_eq!(repo.to_string(), "octo-org/widgets");
    }

    #[test]
    fn repository_id_rejects_malformed_slugs() {
        for slug in ["", "widgets", "/widgets", "octo-org/", "a/b/c", "octo org/widgets"] {
            assert!(RepositoryId::new(slug).is_none(), "accepted {slug:?}");
        }
    }

    #[test]
    fn commit_sha_rejects_empty_value() {
        assert!(CommitSha::new("").is_none());
        assert_eq!(CommitSha::new("abc123").unwrap().to_string(), "abc123");
    }

    #[test]
    fn pull_request_id_serialises_as_bare_integer() {
        let id: PullRequestId = serde_json::from_str("42").unwrap();
        assert_eq!(id.as_u64(), 42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    }
}
