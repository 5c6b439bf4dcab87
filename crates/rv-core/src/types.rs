//! Core types shared across the revwatch crates.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Whether the external revup tool is known to be runnable.
///
/// `Unknown` until the first probe completes; only an explicit probe moves
/// the status, never a transient listing failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallStatus {
    Unknown,
    Installed,
    NotInstalled,
}

impl std::fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstallStatus::Unknown => f.write_str("unknown"),
            InstallStatus::Installed => f.write_str("installed"),
            InstallStatus::NotInstalled => f.write_str("not_installed"),
        }
    }
}

/// Outcome of a yes/no prompt. `Dismissed` means the host closed the
/// prompt without answering either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptChoice {
    Yes,
    No,
    Dismissed,
}

/// Where an external command runs.
///
/// `Global` inherits the caller's working directory; `Workspace` pins the
/// command to a specific project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionScope {
    Global,
    Workspace { directory: PathBuf },
}

impl ExecutionScope {
    pub fn workspace(directory: impl Into<PathBuf>) -> Self {
        ExecutionScope::Workspace {
            directory: directory.into(),
        }
    }

    pub fn working_directory(&self) -> Option<&Path> {
        match self {
            ExecutionScope::Global => None,
            ExecutionScope::Workspace { directory } => Some(directory.as_path()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ExecutionScope, InstallStatus};
    use std::path::{Path, PathBuf};

    #[test]
    fn install_status_displays_snake_case_labels() {
        assert_eq!(InstallStatus::Unknown.to_string(), "unknown");
        assert_eq!(InstallStatus::Installed.to_string(), "installed");
        assert_eq!(InstallStatus::NotInstalled.to_string(), "not_installed");
    }

    #[test]
    fn global_scope_has_no_working_directory() {
        assert_eq!(ExecutionScope::Global.working_directory(), None);
    }

    #[test]
    fn workspace_scope_exposes_its_directory() {
        let scope = ExecutionScope::workspace("/srv/repo");
        assert_eq!(
            scope.working_directory(),
            Some(Path::new("/srv/repo")),
        );
        assert_eq!(
            scope,
            ExecutionScope::Workspace {
                directory: PathBuf::from("/srv/repo"),
            }
        );
    }

    #[test]
    fn install_status_serializes_in_snake_case() {
        let encoded = serde_json::to_string(&InstallStatus::NotInstalled).expect("serialize");
        assert_eq!(encoded, "\"not_installed\"");
        let decoded: InstallStatus = serde_json::from_str(&encoded).expect("deserialize");
        assert_eq!(decoded, InstallStatus::NotInstalled);
    }
}
