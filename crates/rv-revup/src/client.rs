use std::path::{Path, PathBuf};

use rv_core::types::ExecutionScope;

use crate::command::{RevupCli, RevupInvocation, RevupOutput};
use crate::error::RevupError;
use crate::types::{parse_topic_list, TopicSnapshot};

/// Revup invocations scoped to one project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevupClient {
    pub cli: RevupCli,
    pub root: PathBuf,
}

impl RevupClient {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            cli: RevupCli::default(),
            root: root.into(),
        }
    }

    pub fn with_cli(root: impl Into<PathBuf>, cli: RevupCli) -> Self {
        Self {
            cli,
            root: root.into(),
        }
    }

    /// One-shot check that the tool is present and runnable.
    ///
    /// Runs globally: whether revup is installed does not depend on the
    /// project root.
    pub fn probe_version(&self) -> Result<RevupOutput, RevupError> {
        self.cli
            .run_allowed(&ExecutionScope::Global, RevupInvocation::Version, [
                "--version",
            ])
    }

    /// Topics the tool reports for this project root.
    pub fn list_topics(&self) -> Result<TopicSnapshot, RevupError> {
        let output = self.cli.run_allowed(
            &ExecutionScope::workspace(&self.root),
            RevupInvocation::ListTopics,
            ["toolkit", "list-topics"],
        )?;
        Ok(TopicSnapshot {
            captured_at: chrono::Utc::now(),
            topics: parse_topic_list(&output.stdout),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::RevupClient;
    use crate::command::RevupCli;
    use crate::error::RevupError;

    fn missing_client() -> RevupClient {
        RevupClient::with_cli(
            PathBuf::from("."),
            RevupCli::new("/definitely/missing/revup"),
        )
    }

    #[test]
    fn probe_version_runs_the_fixed_version_invocation() {
        let err = missing_client()
            .probe_version()
            .expect_err("missing binary should surface io error");
        match err {
            RevupError::Io { command, .. } => {
                assert!(command.contains("--version"));
                assert!(!command.contains("toolkit"));
            }
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn list_topics_runs_the_fixed_toolkit_invocation() {
        let err = missing_client()
            .list_topics()
            .expect_err("missing binary should surface io error");
        match err {
            RevupError::Io { command, .. } => {
                assert!(command.contains("toolkit"));
                assert!(command.contains("list-topics"));
            }
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
