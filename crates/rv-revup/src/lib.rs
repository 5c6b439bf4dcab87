pub mod client;
pub mod command;
pub mod error;
pub mod types;

pub use client::RevupClient;
pub use command::{RevupCli, RevupInvocation, RevupOutput, INSTALL_COMMAND};
pub use error::RevupError;
pub use types::{parse_topic_list, TopicSnapshot};
