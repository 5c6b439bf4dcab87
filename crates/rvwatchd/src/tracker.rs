//! Installation-status and topic tracking for one project root.
//!
//! The tracker probes the external revup tool, caches the topic list it
//! reports, and refreshes that cache on a timer while the tool is known
//! to be installed. Probing and listing are deliberately decoupled: a
//! transient listing failure keeps the stale cache and never flips
//! installation status; only an explicit probe does that.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::Utc;
use rv_core::events::{TrackerEvent, TrackerEventKind};
use rv_core::types::{InstallStatus, PromptChoice};
use rv_revup::client::RevupClient;
use rv_revup::command::{RevupCli, INSTALL_COMMAND};
use rv_revup::error::RevupError;

use crate::ui::{ChangeListener, InstallPrompt, InstallerLauncher};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

pub const INSTALL_PROMPT_MESSAGE: &str =
    "revup is not installed. Launch an interactive install now?";

/// The two revup invocations the tracker drives. `RevupCli` is the
/// production implementation; tests script the results.
pub trait RevupRunner: Send + Sync {
    fn probe_version(&self) -> Result<(), RevupError>;
    fn list_topics(&self, root: &Path) -> Result<Vec<String>, RevupError>;
}

impl RevupRunner for RevupCli {
    fn probe_version(&self) -> Result<(), RevupError> {
        RevupClient::with_cli(".", self.clone()).probe_version()?;
        Ok(())
    }

    fn list_topics(&self, root: &Path) -> Result<Vec<String>, RevupError> {
        let snapshot = RevupClient::with_cli(root, self.clone()).list_topics()?;
        Ok(snapshot.topics)
    }
}

/// Status and topic cache, guarded as one unit so every multi-field
/// transition is atomic.
struct TrackerState {
    status: InstallStatus,
    topics: Vec<String>,
}

struct TrackerShared {
    root: PathBuf,
    runner: Arc<dyn RevupRunner>,
    listener: Arc<dyn ChangeListener>,
    state: Mutex<TrackerState>,
}

impl TrackerShared {
    fn emit(&self, kind: TrackerEventKind) {
        self.listener.tracker_changed(&TrackerEvent {
            at: Utc::now(),
            root: self.root.clone(),
            kind,
        });
    }

    fn status(&self) -> InstallStatus {
        self.state.lock().expect("tracker state lock").status
    }

    fn refresh_topics(&self) {
        if self.status() != InstallStatus::Installed {
            return;
        }

        match self.runner.list_topics(&self.root) {
            Ok(topics) => {
                let count = topics.len();
                {
                    let mut state = self.state.lock().expect("tracker state lock");
                    // The tracker may have left Installed while the
                    // listing ran; a superseded result must not land.
                    if state.status != InstallStatus::Installed {
                        return;
                    }
                    state.topics = topics;
                }
                self.emit(TrackerEventKind::TopicsRefreshed { count });
            }
            Err(err) => {
                eprintln!(
                    "[tracker] failed to list topics for {}: {err} (keeping cached topics)",
                    self.root.display()
                );
            }
        }
    }
}

struct PollStop {
    stopped: Mutex<bool>,
    wake: Condvar,
}

impl PollStop {
    fn new() -> Self {
        Self {
            stopped: Mutex::new(false),
            wake: Condvar::new(),
        }
    }

    fn signal(&self) {
        let mut stopped = self.stopped.lock().expect("poll stop lock");
        *stopped = true;
        self.wake.notify_all();
    }

    /// Sleep one interval. Returns true if stop was requested, waking
    /// immediately instead of finishing the interval.
    fn wait(&self, interval: Duration) -> bool {
        let deadline = Instant::now() + interval;
        let mut stopped = self.stopped.lock().expect("poll stop lock");
        while !*stopped {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let (guard, _) = self
                .wake
                .wait_timeout(stopped, deadline - now)
                .expect("poll stop wait");
            stopped = guard;
        }
        true
    }
}

struct PollHandle {
    stop: Arc<PollStop>,
    thread: JoinHandle<()>,
}

/// Tracks revup installation status and cached topics for one root.
pub struct TopicTracker {
    shared: Arc<TrackerShared>,
    prompt: Arc<dyn InstallPrompt>,
    launcher: Arc<dyn InstallerLauncher>,
    refresh_interval: Duration,
    poll: Mutex<Option<PollHandle>>,
}

impl TopicTracker {
    pub fn new(
        root: impl Into<PathBuf>,
        refresh_interval: Duration,
        runner: Arc<dyn RevupRunner>,
        prompt: Arc<dyn InstallPrompt>,
        launcher: Arc<dyn InstallerLauncher>,
        listener: Arc<dyn ChangeListener>,
    ) -> Self {
        Self {
            shared: Arc::new(TrackerShared {
                root: root.into(),
                runner,
                listener,
                state: Mutex::new(TrackerState {
                    status: InstallStatus::Unknown,
                    topics: Vec::new(),
                }),
            }),
            prompt,
            launcher,
            refresh_interval,
            poll: Mutex::new(None),
        }
    }

    pub fn root(&self) -> &Path {
        &self.shared.root
    }

    pub fn installation_status(&self) -> InstallStatus {
        self.shared.status()
    }

    /// Defensive copy of the cached topics. Never blocks on the external
    /// tool and never triggers a refresh.
    pub fn topics(&self) -> Vec<String> {
        self.shared
            .state
            .lock()
            .expect("tracker state lock")
            .topics
            .clone()
    }

    /// Run the version probe and transition accordingly.
    ///
    /// Success on a rising edge (previous status was not Installed)
    /// triggers exactly one immediate refresh and starts polling.
    /// Failure stops polling, clears topics, and offers an interactive
    /// install: accepting leaves status Unknown until the next explicit
    /// probe; declining records NotInstalled; dismissing the prompt
    /// leaves Unknown.
    pub fn probe_installed(&self) -> bool {
        match self.shared.runner.probe_version() {
            Ok(()) => {
                self.apply_probe_success();
                true
            }
            Err(err) => {
                eprintln!(
                    "[tracker] revup probe failed for {}: {err}",
                    self.shared.root.display()
                );
                self.stop_polling();

                let next = match self.prompt.confirm_install(INSTALL_PROMPT_MESSAGE) {
                    PromptChoice::Yes => {
                        match self.launcher.launch_interactive(INSTALL_COMMAND) {
                            Ok(()) => self.shared.emit(TrackerEventKind::InstallerLaunched {
                                command: INSTALL_COMMAND.to_string(),
                            }),
                            Err(err) => {
                                eprintln!("[tracker] failed to launch installer: {err}");
                            }
                        }
                        InstallStatus::Unknown
                    }
                    PromptChoice::No => InstallStatus::NotInstalled,
                    PromptChoice::Dismissed => InstallStatus::Unknown,
                };

                let previous = {
                    let mut state = self.shared.state.lock().expect("tracker state lock");
                    let previous = state.status;
                    state.status = next;
                    state.topics.clear();
                    previous
                };
                if previous != next {
                    self.shared.emit(TrackerEventKind::StatusChanged {
                        from: previous,
                        to: next,
                    });
                }
                false
            }
        }
    }

    /// Probe without the install-prompt flow.
    ///
    /// Success follows the normal rising-edge path (refresh plus
    /// polling); failure leaves status and topics untouched. Lets a host
    /// poll for an interactive install finishing in the background
    /// without nagging the user on every miss.
    pub fn recheck_installed(&self) -> bool {
        match self.shared.runner.probe_version() {
            Ok(()) => {
                self.apply_probe_success();
                true
            }
            Err(_) => false,
        }
    }

    fn apply_probe_success(&self) {
        let previous = {
            let mut state = self.shared.state.lock().expect("tracker state lock");
            let previous = state.status;
            state.status = InstallStatus::Installed;
            previous
        };
        if previous != InstallStatus::Installed {
            self.shared.emit(TrackerEventKind::StatusChanged {
                from: previous,
                to: InstallStatus::Installed,
            });
            self.shared.refresh_topics();
            self.start_polling();
        }
    }

    /// Re-list topics now. No-op unless status is Installed; on failure
    /// the previous cache stays untouched.
    pub fn force_refresh(&self) {
        self.shared.refresh_topics();
    }

    /// Idempotent: starting while running is a no-op.
    pub fn start_polling(&self) {
        let mut poll = self.poll.lock().expect("poll handle lock");
        if poll.is_some() {
            return;
        }

        let stop = Arc::new(PollStop::new());
        let shared = Arc::clone(&self.shared);
        let thread_stop = Arc::clone(&stop);
        let interval = self.refresh_interval;
        let thread = thread::spawn(move || loop {
            if thread_stop.wait(interval) {
                break;
            }
            // A tick that raced a teardown must not act.
            if shared.status() != InstallStatus::Installed {
                continue;
            }
            shared.refresh_topics();
        });

        *poll = Some(PollHandle { stop, thread });
        drop(poll);
        self.shared.emit(TrackerEventKind::PollingStarted);
    }

    /// Idempotent: stopping while stopped is a no-op. Signals the poll
    /// thread and joins it, so no tick fires after this returns.
    pub fn stop_polling(&self) {
        let handle = self.poll.lock().expect("poll handle lock").take();
        let Some(handle) = handle else {
            return;
        };
        handle.stop.signal();
        let _ = handle.thread.join();
        self.shared.emit(TrackerEventKind::PollingStopped);
    }

    pub fn polling_active(&self) -> bool {
        self.poll.lock().expect("poll handle lock").is_some()
    }

    /// Stop polling and clear state. Safe to call repeatedly.
    pub fn dispose(&self) {
        self.stop_polling();
        let previous = {
            let mut state = self.shared.state.lock().expect("tracker state lock");
            let previous = state.status;
            state.status = InstallStatus::Unknown;
            state.topics.clear();
            previous
        };
        if previous != InstallStatus::Unknown {
            self.shared.emit(TrackerEventKind::StatusChanged {
                from: previous,
                to: InstallStatus::Unknown,
            });
        }
    }
}

impl Drop for TopicTracker {
    fn drop(&mut self) {
        self.stop_polling();
    }
}
