use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::InstallStatus;

/// What happened inside a tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerEventKind {
    StatusChanged {
        from: InstallStatus,
        to: InstallStatus,
    },
    TopicsRefreshed {
        count: usize,
    },
    InstallerLaunched {
        command: String,
    },
    PollingStarted,
    PollingStopped,
}

/// A state-change notification emitted to the host after any transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerEvent {
    pub at: DateTime<Utc>,
    pub root: PathBuf,
    pub kind: TrackerEventKind,
}
