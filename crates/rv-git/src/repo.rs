use std::path::{Path, PathBuf};

use rv_core::types::ExecutionScope;

use crate::command::GitCli;
use crate::error::GitError;

/// Check whether `directory` lives inside a git work tree.
///
/// A non-zero exit is the normal "no" answer, not an error.
pub fn is_git_repository(directory: &Path, git: &GitCli) -> Result<bool, GitError> {
    let scope = ExecutionScope::workspace(directory);
    match git.run(&scope, ["rev-parse", "--is-inside-work-tree"]) {
        Ok(output) => Ok(output.stdout.trim().eq("true")),
        Err(GitError::CommandFailed { .. }) => Ok(false),
        Err(err) => Err(err),
    }
}

/// Resolve the repository root containing `start_path`.
pub fn discover_root(start_path: &Path, git: &GitCli) -> Result<PathBuf, GitError> {
    if !is_git_repository(start_path, git)? {
        return Err(GitError::NotARepository {
            path: start_path.to_path_buf(),
        });
    }

    let scope = ExecutionScope::workspace(start_path);
    let output = git.run(&scope, ["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(output.stdout.trim()))
}

/// Git user email as seen from `root` (local config shadows global).
pub fn user_email(root: &Path, git: &GitCli) -> Result<String, GitError> {
    identity(root, git, "user.email")
}

/// Git user name as seen from `root`.
pub fn user_name(root: &Path, git: &GitCli) -> Result<String, GitError> {
    identity(root, git, "user.name")
}

fn identity(root: &Path, git: &GitCli, key: &'static str) -> Result<String, GitError> {
    let scope = ExecutionScope::workspace(root);
    let output = match git.run(&scope, ["config", key]) {
        Ok(output) => output,
        Err(GitError::CommandFailed { .. }) => return Err(GitError::MissingIdentity { key }),
        Err(err) => return Err(err),
    };
    identity_from_output(key, &output.stdout)
}

fn identity_from_output(key: &'static str, stdout: &str) -> Result<String, GitError> {
    let value = stdout.trim();
    if value.is_empty() {
        return Err(GitError::MissingIdentity { key });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::process::Command;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{discover_root, identity_from_output, is_git_repository, user_email, user_name};
    use crate::command::GitCli;
    use crate::error::GitError;

    fn unique_temp_dir(prefix: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        std::env::temp_dir().join(format!("revwatch-repo-{prefix}-{now}"))
    }

    fn run_git(cwd: &Path, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .output()
            .expect("spawn git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn init_repo() -> PathBuf {
        let root = unique_temp_dir("repo");
        fs::create_dir_all(&root).expect("create temp repo");
        run_git(&root, &["init"]);
        root
    }

    #[test]
    fn is_git_repository_distinguishes_repo_from_plain_directory() {
        let root = init_repo();
        let plain = unique_temp_dir("plain");
        fs::create_dir_all(&plain).expect("create plain dir");

        let git = GitCli::default();
        assert!(is_git_repository(&root, &git).expect("check repo"));
        assert!(!is_git_repository(&plain, &git).expect("check plain dir"));

        let _ = fs::remove_dir_all(&root);
        let _ = fs::remove_dir_all(&plain);
    }

    #[test]
    fn discover_root_finds_toplevel_from_nested_path() {
        let root = init_repo();
        let nested = root.join("a").join("b");
        fs::create_dir_all(&nested).expect("create nested dir");

        let git = GitCli::default();
        let discovered = discover_root(&nested, &git).expect("discover root");
        assert_eq!(
            discovered.canonicalize().expect("canonicalize discovered"),
            root.canonicalize().expect("canonicalize root")
        );

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn discover_root_rejects_plain_directory() {
        let plain = unique_temp_dir("no-repo");
        fs::create_dir_all(&plain).expect("create plain dir");

        let git = GitCli::default();
        let err = discover_root(&plain, &git).expect_err("expected not a repository");
        assert!(matches!(err, GitError::NotARepository { path } if path == plain));

        let _ = fs::remove_dir_all(&plain);
    }

    #[test]
    fn identity_reads_local_config() {
        let root = init_repo();
        run_git(&root, &["config", "user.email", "dev@example.com"]);
        run_git(&root, &["config", "user.name", "Dev Example"]);

        let git = GitCli::default();
        assert_eq!(
            user_email(&root, &git).expect("user email"),
            "dev@example.com"
        );
        assert_eq!(user_name(&root, &git).expect("user name"), "Dev Example");

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn blank_identity_output_maps_to_missing_identity() {
        let err = identity_from_output("user.email", "  \n").expect_err("blank value");
        assert!(matches!(
            err,
            GitError::MissingIdentity { key } if key == "user.email"
        ));

        let value = identity_from_output("user.name", " Dev Example \n").expect("trimmed value");
        assert_eq!(value, "Dev Example");
    }
}
