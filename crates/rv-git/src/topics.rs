//! Topic extraction from commit-message tag trailers.
//!
//! Revup commit messages carry `tag: value` lines (for example
//! `topic: auth-refactor`). The `topic:` values group related branches
//! into review topics.

use std::collections::HashSet;
use std::path::Path;

use rv_core::types::ExecutionScope;

use crate::command::GitCli;
use crate::error::GitError;

pub const TAG_REVIEWER: &str = "reviewer";
pub const TAG_ASSIGNEE: &str = "assignee";
pub const TAG_BRANCH: &str = "branch";
pub const TAG_LABEL: &str = "label";
pub const TAG_TOPIC: &str = "topic";
pub const TAG_RELATIVE: &str = "relative";
pub const TAG_RELATIVE_BRANCH: &str = "relative-branch";
pub const TAG_UPLOADER: &str = "uploader";
pub const TAG_UPDATE_PR_BODY: &str = "update-pr-body";
pub const TAG_BRANCH_FORMAT: &str = "branch-format";

const VALID_TAGS: [&str; 10] = [
    TAG_BRANCH,
    TAG_LABEL,
    TAG_RELATIVE,
    TAG_RELATIVE_BRANCH,
    TAG_REVIEWER,
    TAG_ASSIGNEE,
    TAG_TOPIC,
    TAG_UPLOADER,
    TAG_UPDATE_PR_BODY,
    TAG_BRANCH_FORMAT,
];

pub fn is_valid_tag(name: &str) -> bool {
    VALID_TAGS.contains(&name)
}

/// Split a commit-message line into a tag name and value.
///
/// The tag must start at the beginning of the line and consist only of
/// ASCII letters and hyphens, immediately followed by a colon.
pub fn parse_tag_line(line: &str) -> Option<(&str, &str)> {
    let colon = line.find(':')?;
    let name = &line[..colon];
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
        return None;
    }
    Some((name, &line[colon + 1..]))
}

/// Collect unique `topic:` values from commit messages, first-seen order.
pub fn topics_from_messages<M, L>(messages: &[M]) -> Vec<String>
where
    M: AsRef<[L]>,
    L: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut topics = Vec::new();
    for message in messages {
        for line in message.as_ref() {
            let Some((name, value)) = parse_tag_line(line.as_ref()) else {
                continue;
            };
            if name != TAG_TOPIC {
                continue;
            }
            let topic = value.trim();
            if topic.is_empty() {
                continue;
            }
            if seen.insert(topic.to_string()) {
                topics.push(topic.to_string());
            }
        }
    }
    topics
}

/// All commit messages in the repository, local and remote refs included.
///
/// `%B%x00` separates raw message bodies with NUL so multi-line messages
/// survive intact. Each message comes back as its non-empty trimmed lines.
pub fn commit_messages(root: &Path, git: &GitCli) -> Result<Vec<Vec<String>>, GitError> {
    let scope = ExecutionScope::workspace(root);
    let output = git.run(&scope, ["log", "--all", "--format=%B%x00"])?;
    Ok(split_message_blocks(&output.stdout))
}

fn split_message_blocks(stdout: &str) -> Vec<Vec<String>> {
    stdout
        .split('\0')
        .filter(|msg| !msg.trim().is_empty())
        .map(|msg| {
            msg.trim()
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        })
        .collect()
}

/// Unique topics named by `topic:` tags anywhere in the repository history.
pub fn all_commit_topics(root: &Path, git: &GitCli) -> Result<Vec<String>, GitError> {
    let messages = commit_messages(root, git)?;
    Ok(topics_from_messages(&messages))
}
