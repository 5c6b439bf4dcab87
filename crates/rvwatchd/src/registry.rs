//! Owns one tracker per project root.
//!
//! Hosts ask the registry for a root's tracker instead of constructing
//! trackers themselves, so two views of the same root always observe
//! the same status and cache.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::tracker::{RevupRunner, TopicTracker};
use crate::ui::{ChangeListener, InstallPrompt, InstallerLauncher};

pub struct TrackerRegistry {
    refresh_interval: Duration,
    runner: Arc<dyn RevupRunner>,
    prompt: Arc<dyn InstallPrompt>,
    launcher: Arc<dyn InstallerLauncher>,
    listener: Arc<dyn ChangeListener>,
    trackers: Mutex<BTreeMap<PathBuf, Arc<TopicTracker>>>,
}

impl TrackerRegistry {
    pub fn new(
        refresh_interval: Duration,
        runner: Arc<dyn RevupRunner>,
        prompt: Arc<dyn InstallPrompt>,
        launcher: Arc<dyn InstallerLauncher>,
        listener: Arc<dyn ChangeListener>,
    ) -> Self {
        Self {
            refresh_interval,
            runner,
            prompt,
            launcher,
            listener,
            trackers: Mutex::new(BTreeMap::new()),
        }
    }

    /// The tracker for `root`, created on first request. The tracker
    /// starts in Unknown; callers drive the first probe.
    pub fn tracker_for(&self, root: impl AsRef<Path>) -> Arc<TopicTracker> {
        let root = root.as_ref();
        let mut trackers = self.trackers.lock().expect("registry lock");
        if let Some(tracker) = trackers.get(root) {
            return Arc::clone(tracker);
        }

        let tracker = Arc::new(TopicTracker::new(
            root,
            self.refresh_interval,
            Arc::clone(&self.runner),
            Arc::clone(&self.prompt),
            Arc::clone(&self.launcher),
            Arc::clone(&self.listener),
        ));
        trackers.insert(root.to_path_buf(), Arc::clone(&tracker));
        tracker
    }

    pub fn get(&self, root: impl AsRef<Path>) -> Option<Arc<TopicTracker>> {
        self.trackers
            .lock()
            .expect("registry lock")
            .get(root.as_ref())
            .map(Arc::clone)
    }

    /// Dispose and drop the tracker for `root`. No-op for unknown roots.
    pub fn remove(&self, root: impl AsRef<Path>) {
        let removed = self
            .trackers
            .lock()
            .expect("registry lock")
            .remove(root.as_ref());
        if let Some(tracker) = removed {
            tracker.dispose();
        }
    }

    /// Dispose every tracker and empty the registry.
    pub fn dispose_all(&self) {
        let drained: Vec<_> = {
            let mut trackers = self.trackers.lock().expect("registry lock");
            std::mem::take(&mut *trackers).into_values().collect()
        };
        for tracker in drained {
            tracker.dispose();
        }
    }

    pub fn roots(&self) -> Vec<PathBuf> {
        self.trackers
            .lock()
            .expect("registry lock")
            .keys()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.trackers.lock().expect("registry lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
