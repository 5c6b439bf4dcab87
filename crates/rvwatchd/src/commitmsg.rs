//! Commit-message template injection.
//!
//! Git writes `.git/COMMIT_EDITMSG` with an empty first line followed by
//! a `#` comment block. When that shape is detected and no `topic:` tag
//! is present yet, a tag template plus a commented list of the known
//! topics is spliced in so the author can pick one. Installed as a
//! `prepare-commit-msg` hook or run against the file directly.

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum CommitMsgError {
    #[error("failed to read commit message at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write commit message at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Splice the topic template into a fresh commit-message buffer.
///
/// Applies only when the first line is blank and the second is a `#`
/// comment that does not already mention `topic:`; returns `None` when
/// the buffer should stay untouched (amends, merges, already templated).
pub fn inject_topic_template(content: &str, topics: &[String]) -> Option<String> {
    let lines: Vec<&str> = content.split('\n').collect();
    if lines.len() < 2 || !lines[0].trim().is_empty() || !lines[1].starts_with('#') {
        return None;
    }
    if lines[1].contains("topic:") {
        return None;
    }

    let mut out: Vec<String> = Vec::with_capacity(lines.len() + topics.len() + 3);
    out.push(lines[0].to_string());
    // The leading comment marker moves below the editable tag lines.
    out.push(format!("topic: \n#relative: \n#{}", &lines[1][1..]));
    if !topics.is_empty() {
        out.push("#".to_string());
        out.push("# Available topics:".to_string());
        out.extend(topics.iter().map(|topic| format!("# topic: {topic}")));
    }
    out.extend(lines[2..].iter().map(|line| line.to_string()));
    Some(out.join("\n"))
}

/// Read-modify-write `path` with the topic template. Returns whether the
/// file was changed.
pub fn prepare_commit_message(path: &Path, topics: &[String]) -> Result<bool, CommitMsgError> {
    let content = fs::read_to_string(path).map_err(|source| CommitMsgError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let Some(updated) = inject_topic_template(&content, topics) else {
        return Ok(false);
    };

    fs::write(path, updated).map_err(|source| CommitMsgError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}
