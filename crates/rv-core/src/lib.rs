pub mod config;
pub mod events;
pub mod types;
pub mod validation;

pub use config::*;
pub use events::*;
pub use types::*;
pub use validation::*;

#[cfg(test)]
mod tests {
    use super::{parse_watch_config, ExecutionScope, InstallStatus, PromptChoice, Validate};
    use std::any::TypeId;

    #[test]
    fn crate_root_reexports_core_types() {
        let _ = TypeId::of::<InstallStatus>();
        let _ = TypeId::of::<PromptChoice>();
        let _ = TypeId::of::<ExecutionScope>();
    }

    #[test]
    fn crate_root_reexports_parse_and_validate_helpers() {
        let mut config = parse_watch_config(
            r#"
refresh_interval_ms = 10000
revup_binary = "revup"
git_binary = "git"
"#,
        )
        .expect("parse watch config");

        assert!(config.validate().is_empty());

        config.refresh_interval_ms = 0;
        let issues = config.validate();
        assert!(issues
            .iter()
            .any(|issue| issue.code == "refresh.interval.zero"));
    }
}
