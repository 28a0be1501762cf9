//! Shared value types for the linker domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! the pull request data the linker reads and the references it produces.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CommitSha, PullRequestId};

// ---------------------------------------------------------------------------
// Issue references
// ---------------------------------------------------------------------------

/// A `#<number>` token pointing at an issue in the same repository.
///
/// The number is positive and has no leading zero. It is stored as its
/// decimal digit string, so two references are equal exactly when they name
/// the same issue number, and oversized numbers are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IssueReference(String);

/// Returned when a string is not a valid `#<number>` issue reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid issue reference '{0}': expected '#' followed by a positive number")]
pub struct InvalidIssueReference(pub String);

impl IssueReference {
    /// Creates a reference from its digits (without the `#` prefix).
    ///
    /// Returns `None` unless `digits` is a non-empty ASCII digit run whose
    /// first digit is `1`–`9`.
    pub fn from_digits(digits: &str) -> Option<Self> {
        let mut chars = digits.chars();
        match chars.next() {
            Some('1'..='9') if chars.all(|c| c.is_ascii_digit()) => Some(Self(digits.to_string())),
            _ => None,
        }
    }
}

impl std::fmt::Display for IssueReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl std::str::FromStr for IssueReference {
    type Err = InvalidIssueReference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('#')
            .and_then(Self::from_digits)
            .ok_or_else(|| InvalidIssueReference(s.to_string()))
    }
}

impl TryFrom<String> for IssueReference {
    type Error = InvalidIssueReference;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IssueReference> for String {
    fn from(value: IssueReference) -> Self {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------

/// Ordered, duplicate-free list of issue references.
///
/// Order is first-insertion order; pushing a reference that is already
/// present leaves the list unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReferenceList {
    items: Vec<IssueReference>,
    #[serde(skip)]
    seen: HashSet<IssueReference>,
}

impl ReferenceList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `reference` unless it is already present.
    ///
    /// Returns `true` if the reference was added.
    pub fn push(&mut self, reference: IssueReference) -> bool {
        if self.seen.insert(reference.clone()) {
            self.items.push(reference);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IssueReference> {
        self.items.iter()
    }
}

impl FromIterator<IssueReference> for ReferenceList {
    fn from_iter<T: IntoIterator<Item = IssueReference>>(iter: T) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl Extend<IssueReference> for ReferenceList {
    fn extend<T: IntoIterator<Item = IssueReference>>(&mut self, iter: T) {
        for reference in iter {
            self.push(reference);
        }
    }
}

impl<'a> IntoIterator for &'a ReferenceList {
    type Item = &'a IssueReference;
    type IntoIter = std::slice::Iter<'a, IssueReference>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl std::fmt::Display for ReferenceList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for reference in &self.items {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{reference}")?;
            first = false;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Scanned text
// ---------------------------------------------------------------------------

/// The texts searched for linking phrases: the pull request title followed by
/// every commit message in commit order.
///
/// The pull request description is deliberately not part of the set; GitHub
/// already links closing keywords written there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageSet {
    title: String,
    commit_messages: Vec<String>,
}

impl MessageSet {
    pub fn new(title: impl Into<String>, commit_messages: Vec<String>) -> Self {
        Self {
            title: title.into(),
            commit_messages,
        }
    }

    /// Iterates title first, then commit messages, skipping empty texts.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str())
            .chain(self.commit_messages.iter().map(String::as_str))
            .filter(|message| !message.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Host-provided records
// ---------------------------------------------------------------------------

/// The pull request fields the linker reads from the triggering event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSnapshot {
    /// Repository-scoped pull request number.
    pub number: PullRequestId,

    /// Pull request title. Passed back unchanged on update.
    #[serde(default)]
    pub title: String,

    /// Pull request description; `None` when the author left it empty.
    #[serde(default)]
    pub body: Option<String>,
}

/// One commit belonging to a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: CommitSha,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
