use std::path::{Path, PathBuf};

use linker::{PullRequestSnapshot, RepositoryId};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors reading the workflow event payload.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("failed to read event payload {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse event payload {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The parts of a workflow event the linker needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerEvent {
    /// Present only for `pull_request` / `pull_request_target` events.
    pub pull_request: Option<PullRequestSnapshot>,

    /// Repository the event was raised in, when the payload names one.
    pub repository: Option<RepositoryId>,
}

#[derive(Deserialize)]
struct EventPayload {
    #[serde(default)]
    pull_request: Option<PullRequestSnapshot>,
    #[serde(default)]
    repository: Option<RepositoryPayload>,
}

#[derive(Deserialize)]
struct RepositoryPayload {
    full_name: String,
}

/// Parses a workflow event payload.
pub fn parse_event(json: &str) -> Result<TriggerEvent, serde_json::Error> {
    let payload: EventPayload = serde_json::from_str(json)?;
    Ok(TriggerEvent {
        pull_request: payload.pull_request,
        repository: payload
            .repository
            .and_then(|repository| RepositoryId::new(repository.full_name)),
    })
}

/// Reads and parses the event payload file at `path`.
pub fn load_event(path: &Path) -> Result<TriggerEvent, EventError> {
    let raw = std::fs::read_to_string(path).map_err(|source| EventError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let event = parse_event(&raw).map_err(|source| EventError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        pull_request = event.pull_request.as_ref().map(|pr| pr.number.as_u64()),
        "loaded event payload"
    );
    Ok(event)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use linker::PullRequestId;

    use super::*;

    const PULL_REQUEST_EVENT: &str = r#"{
        "action": "synchronize",
        "number": 12,
        "pull_request": {
            "number": 12,
            "title": "Fixes blue smoke",
            "body": "Some description",
            "state": "open",
            "head": {"ref": "feature"}
        },
        "repository": {"full_name": "octo-org/widgets", "private": false}
    }"#;

    #[test]
    fn parses_pull_request_event() {
        let event = parse_event(PULL_REQUEST_EVENT).unwrap();
        let pull_request = event.pull_request.expect("pull request");
        assert_eq!(pull_request.number, PullRequestId::new(12));
        assert_eq!(pull_request.title, "Fixes blue smoke");
        assert_eq!(pull_request.body.as_deref(), Some("Some description"));
        assert_eq!(event.repository.unwrap().to_string(), "octo-org/widgets");
    }

    #[test]
    fn push_event_has_no_pull_request() {
        let event = parse_event(r#"{"ref": "refs/heads/main", "repository": {"full_name": "a/b"}}"#)
            .unwrap();
        assert!(event.pull_request.is_none());
    }

    #[test]
    fn null_body_is_absent() {
        let event =
            parse_event(r#"{"pull_request": {"number": 3, "title": "t", "body": null}}"#).unwrap();
        assert_eq!(event.pull_request.unwrap().body, None);
        assert!(event.repository.is_none());
    }

    #[test]
    fn load_event_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PULL_REQUEST_EVENT.as_bytes()).unwrap();
        let event = load_event(file.path()).unwrap();
        assert!(event.pull_request.is_some());
    }

    #[test]
    fn load_event_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("event.json");
        assert!(matches!(load_event(&missing), Err(EventError::Read { .. })));

        std::fs::write(&missing, "{not json").unwrap();
        assert!(matches!(load_event(&missing), Err(EventError::Parse { .. })));
    }
}
