//! Linking-phrase scanner.
//!
//! Finds GitHub closing keywords (`fixes #12`, `Closes #3`, ...) in the pull
//! request title and commit messages and turns them into a [`ReferenceList`].
//!
//! A linking phrase is one of [`LINKING_TERMS`] (ASCII case-insensitive),
//! one or more whitespace characters, `#`, and a digit run starting with
//! `1`–`9`. The digit run must not be followed by a word character, and the
//! `#` must not directly follow a word character, `/`, `-` or `.`, so
//! `owner/repo#1` and `v1.2#1` never count.
//!
//! The `regex` crate has no lookaround, so the scanner matches the whole
//! phrase and then checks both boundaries against the scanned text.

use std::sync::OnceLock;

use regex::Regex;

use crate::{IssueReference, MessageSet, ReferenceList};

/// Keywords GitHub recognises for closing an issue from a pull request.
pub const LINKING_TERMS: [&str; 9] = [
    "close", "closes", "closed", "fix", "fixes", "fixed", "resolve", "resolves", "resolved",
];

fn linking_phrase_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r"(?i-u:{})\s+#(?P<issue>[1-9][0-9]*)",
            LINKING_TERMS.join("|")
        );
        Regex::new(&pattern).expect("linking phrase regex must compile")
    })
}

fn is_ascii_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Scans the title and commit messages, in that order, for issue references.
///
/// The result holds each referenced issue once, at the position of its first
/// occurrence.
pub fn extract_references(messages: &MessageSet) -> ReferenceList {
    messages.iter().flat_map(scan_message).collect()
}

/// Convenience wrapper over [`extract_references`] for borrowed input.
pub fn extract<S: AsRef<str>>(title: &str, commit_messages: &[S]) -> ReferenceList {
    let messages = MessageSet::new(
        title,
        commit_messages
            .iter()
            .map(|message| message.as_ref().to_string())
            .collect(),
    );
    extract_references(&messages)
}

/// Returns every issue reference in `message`, left to right, duplicates
/// included.
pub fn scan_message(message: &str) -> Vec<IssueReference> {
    linking_phrase_re()
        .captures_iter(message)
        .filter_map(|captures| {
            let issue = captures.name("issue")?;
            let hash = issue.start() - 1;

            if message[..hash].chars().next_back().is_some_and(|c| {
                is_ascii_word(c) || matches!(c, '/' | '-' | '.')
            }) {
                return None;
            }
            if message[issue.end()..].chars().next().is_some_and(is_ascii_word) {
                return None;
            }

            IssueReference::from_digits(issue.as_str())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &ReferenceList) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    fn scanned(message: &str) -> Vec<String> {
        scan_message(message).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_title_and_no_commits_yield_nothing() {
        let refs = extract::<&str>("", &[]);
        assert!(refs.is_empty());
    }

    #[test]
    fn title_without_reference_and_two_commits() {
        let refs = extract("Fixes blue smoke", &["fixes #1", "Resolves #2"]);
        assert_eq!(tokens(&refs), vec!["#1", "#2"]);
    }

    #[test]
    fn title_reference_dedups_against_commit_reference() {
        let refs = extract("Fixes blue smoke resolves #1", &["fixes #1", "Resolves #2"]);
        assert_eq!(tokens(&refs), vec!["#1", "#2"]);
    }

    #[test]
    fn every_linking_term_is_recognised() {
        let commits = [
            "close #1",
            "closes #2",
            "closed #3",
            "fix #4",
            "fixes #5",
            "fixed #6",
            "resolve #7",
            "resolves #8",
            "resolved #9",
        ];
        let refs = extract("Fixes blue smoke resolves #1", &commits);
        assert_eq!(
            tokens(&refs),
            vec!["#1", "#2", "#3", "#4", "#5", "#6", "#7", "#8", "#9"]
        );
    }

    #[test]
    fn order_follows_first_occurrence_across_messages() {
        let refs = extract(
            "closes #30",
            &["fixes #10 and fixes #30", "resolves #20, fixes #10"],
        );
        assert_eq!(tokens(&refs), vec!["#30", "#10", "#20"]);
    }

    #[test]
    fn same_reference_twice_in_one_message_counts_once() {
        let refs = extract("", &["fixes #1 and also fixes #1 again"]);
        assert_eq!(tokens(&refs), vec!["#1"]);
        assert_eq!(scanned("fixes #1 and also fixes #1 again"), vec!["#1", "#1"]);
    }

    #[test]
    fn linking_term_is_case_insensitive() {
        assert_eq!(scanned("FIXES #4, Closed #5, rEsOlVe #6"), vec!["#4", "#5", "#6"]);
    }

    #[test]
    fn linking_term_case_folding_is_ascii_only() {
        assert!(scanned("clo\u{17F}es #1").is_empty());
        assert!(scanned("\u{212A}ix #3").is_empty());
        assert_eq!(scanned("clo\u{17F}es #1, \u{212A}fix #2"), vec!["#2"]);
    }

    #[test]
    fn whitespace_run_may_include_newlines_and_tabs() {
        assert_eq!(scanned("fixes\n\t  #12"), vec!["#12"]);
    }

    #[test]
    fn punctuation_between_term_and_hash_is_rejected() {
        assert!(scanned("fixes: #1").is_empty());
        assert!(scanned("fixes (#1)").is_empty());
        assert!(scanned("fixes#1").is_empty());
    }

    #[test]
    fn cross_repository_and_path_like_references_are_rejected() {
        assert!(scanned("fixes repo#1").is_empty());
        assert!(scanned("fixes owner/repo#1").is_empty());
        assert!(scanned("fixes v1.2#1").is_empty());
        assert!(scanned("fixes some-thing#1").is_empty());
    }

    #[test]
    fn zero_and_leading_zero_numbers_are_rejected() {
        assert!(scanned("fixes #0").is_empty());
        assert!(scanned("fixes #007").is_empty());
        assert_eq!(scanned("fixes #70"), vec!["#70"]);
    }

    #[test]
    fn number_must_end_at_word_boundary() {
        assert!(scanned("fixes #123abc").is_empty());
        assert!(scanned("fixes #12_3").is_empty());
        assert_eq!(scanned("fixes #123."), vec!["#123"]);
        assert_eq!(scanned("(fixes #123)"), vec!["#123"]);
    }

    #[test]
    fn rejected_candidate_does_not_hide_later_match() {
        assert_eq!(scanned("fixes #1a fixes #2"), vec!["#2"]);
        assert_eq!(scanned("fixes #1fixes #2"), vec!["#2"]);
    }

    #[test]
    fn term_may_be_suffix_of_longer_word() {
        assert_eq!(scanned("prefixes #3"), vec!["#3"]);
    }

    #[test]
    fn non_ascii_text_around_matches_is_handled() {
        assert_eq!(scanned("résolu — fixes #5 ✓"), vec!["#5"]);
        assert_eq!(scanned("fixes #5é"), vec!["#5"]);
    }

    #[test]
    fn extract_never_returns_duplicates() {
        let commits: Vec<String> = (1..=50).map(|n| format!("fixes #{}", n % 7 + 1)).collect();
        let refs = extract("closes #3", &commits);
        let mut seen = std::collections::HashSet::new();
        assert!(refs.iter().all(|reference| seen.insert(reference.clone())));
        assert_eq!(refs.len(), 7);
        assert_eq!(tokens(&refs)[0], "#3");
    }
}
