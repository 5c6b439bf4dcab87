pub mod commitmsg;
pub mod registry;
pub mod tracker;
pub mod ui;

pub use commitmsg::{inject_topic_template, prepare_commit_message, CommitMsgError};
pub use registry::TrackerRegistry;
pub use tracker::{
    RevupRunner, TopicTracker, DEFAULT_REFRESH_INTERVAL, INSTALL_PROMPT_MESSAGE,
};
pub use ui::{
    ChangeListener, InstallPrompt, InstallerLauncher, LaunchError, LogListener, ShellLauncher,
    StdioPrompt,
};
