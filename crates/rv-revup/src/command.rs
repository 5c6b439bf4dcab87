use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use rv_core::types::ExecutionScope;

use crate::error::RevupError;

/// Install command line handed to an interactive shell when the user
/// accepts the install prompt. Never run silently.
pub const INSTALL_COMMAND: &str = "pip install --upgrade revup";

/// The automated invocations the tracker is allowed to run on its own.
///
/// Everything else (install, upload, config edits) goes through an
/// interactive terminal where the user can see and stop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevupInvocation {
    Version,
    ListTopics,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevupOutput {
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevupCli {
    pub binary: PathBuf,
}

impl Default for RevupCli {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("revup"),
        }
    }
}

impl RevupCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn run_allowed<I, S>(
        &self,
        scope: &ExecutionScope,
        allowed: RevupInvocation,
        args: I,
    ) -> Result<RevupOutput, RevupError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let owned_args: Vec<OsString> = args
            .into_iter()
            .map(|arg| arg.as_ref().to_os_string())
            .collect();
        validate_contract(allowed, &owned_args)?;

        let mut command = Command::new(&self.binary);
        if let Some(cwd) = scope.working_directory() {
            command.current_dir(cwd);
        }
        for arg in &owned_args {
            command.arg(arg);
        }

        let rendered = render_command(&self.binary, &owned_args);
        let output = command.output().map_err(|source| RevupError::Io {
            command: rendered.clone(),
            source,
        })?;

        let stdout =
            String::from_utf8(output.stdout).map_err(|source| RevupError::NonUtf8Output {
                command: rendered.clone(),
                stream: "stdout",
                source,
            })?;
        let stderr =
            String::from_utf8(output.stderr).map_err(|source| RevupError::NonUtf8Output {
                command: rendered.clone(),
                stream: "stderr",
                source,
            })?;

        if !output.status.success() {
            return Err(RevupError::CommandFailed {
                command: rendered,
                status: output.status.code(),
                stdout,
                stderr,
            });
        }

        Ok(RevupOutput { stdout, stderr })
    }
}

fn validate_contract(allowed: RevupInvocation, args: &[OsString]) -> Result<(), RevupError> {
    let ok = match allowed {
        RevupInvocation::Version => args.len() == 1 && arg_eq(args, 0, "--version"),
        RevupInvocation::ListTopics => {
            args.len() == 2 && arg_eq(args, 0, "toolkit") && arg_eq(args, 1, "list-topics")
        }
    };

    if ok {
        return Ok(());
    }

    Err(RevupError::ContractViolation {
        message: format!("disallowed automated revup invocation: {:?}", args),
    })
}

fn arg_eq(args: &[OsString], idx: usize, expected: &str) -> bool {
    args.get(idx)
        .map(|x| x.to_string_lossy() == expected)
        .unwrap_or(false)
}

fn render_command(binary: &Path, args: &[OsString]) -> String {
    let mut rendered = binary.to_string_lossy().into_owned();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(&arg.to_string_lossy());
    }
    rendered
}
