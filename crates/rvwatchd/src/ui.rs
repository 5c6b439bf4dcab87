//! Host seams: prompt, interactive launcher, change notification.
//!
//! An editor host wires these to dialogs, terminals, and status
//! indicators; the bundled implementations talk to stdio so the tracker
//! works headless.

use std::io::{self, BufRead, Write};
use std::process::Command;

use rv_core::events::{TrackerEvent, TrackerEventKind};
use rv_core::types::PromptChoice;

pub trait InstallPrompt: Send + Sync {
    fn confirm_install(&self, message: &str) -> PromptChoice;
}

pub trait InstallerLauncher: Send + Sync {
    fn launch_interactive(&self, command: &str) -> Result<(), LaunchError>;
}

/// Fire-and-forget hook invoked after any state transition, topic
/// refresh, or polling transition.
pub trait ChangeListener: Send + Sync {
    fn tracker_changed(&self, event: &TrackerEvent);
}

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to launch interactive shell ({command}): {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("interactive shell exited with status {status:?} ({command})")]
    Failed {
        command: String,
        status: Option<i32>,
    },
}

/// y/N prompt on stderr, answer read from stdin. EOF counts as a
/// dismissal, not a decline.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioPrompt;

impl InstallPrompt for StdioPrompt {
    fn confirm_install(&self, message: &str) -> PromptChoice {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{message} [y/N] ");
        let _ = stderr.flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => PromptChoice::Dismissed,
            Ok(_) => choice_from_answer(&line),
        }
    }
}

fn choice_from_answer(line: &str) -> PromptChoice {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => PromptChoice::Yes,
        _ => PromptChoice::No,
    }
}

/// Runs the command through `sh -c` with inherited stdio so the user
/// sees installer output and can answer its prompts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellLauncher;

impl InstallerLauncher for ShellLauncher {
    fn launch_interactive(&self, command: &str) -> Result<(), LaunchError> {
        let status = Command::new("sh")
            .arg("-c")
            .arg(command)
            .status()
            .map_err(|source| LaunchError::Spawn {
                command: command.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(LaunchError::Failed {
                command: command.to_string(),
                status: status.code(),
            });
        }
        Ok(())
    }
}

/// Logs every tracker event to stderr with a `[tracker]` tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogListener;

impl ChangeListener for LogListener {
    fn tracker_changed(&self, event: &TrackerEvent) {
        let root = event.root.display();
        match &event.kind {
            TrackerEventKind::StatusChanged { from, to } => {
                eprintln!("[tracker] {root}: status {from} -> {to}");
            }
            TrackerEventKind::TopicsRefreshed { count } => {
                eprintln!("[tracker] {root}: {count} topic(s)");
            }
            TrackerEventKind::InstallerLaunched { command } => {
                eprintln!("[tracker] {root}: installer launched ({command})");
            }
            TrackerEventKind::PollingStarted => {
                eprintln!("[tracker] {root}: polling started");
            }
            TrackerEventKind::PollingStopped => {
                eprintln!("[tracker] {root}: polling stopped");
            }
        }
    }
}
