pub mod command;
pub mod error;
pub mod repo;
pub mod topics;

pub use command::{GitCli, GitOutput};
pub use error::GitError;
pub use repo::{discover_root, is_git_repository, user_email, user_name};
pub use topics::{
    all_commit_topics, commit_messages, is_valid_tag, parse_tag_line, topics_from_messages,
    TAG_TOPIC,
};
