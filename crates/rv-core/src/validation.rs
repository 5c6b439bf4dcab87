//! Validation for revwatch configuration.

use serde::{Deserialize, Serialize};

use crate::config::WatchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationLevel {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub level: ValidationLevel,
    pub code: &'static str,
    pub message: String,
}

pub trait Validate {
    fn validate(&self) -> Vec<ValidationIssue>;
}

impl Validate for WatchConfig {
    fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.refresh_interval_ms == 0 {
            issues.push(ValidationIssue {
                level: ValidationLevel::Error,
                code: "refresh.interval.zero",
                message: "refresh interval cannot be 0".to_string(),
            });
        } else if self.refresh_interval_ms < 1000 {
            issues.push(ValidationIssue {
                level: ValidationLevel::Warning,
                code: "refresh.interval.low",
                message: format!(
                    "refresh interval {}ms is below one second; every tick spawns a revup process",
                    self.refresh_interval_ms
                ),
            });
        }

        if self.revup_binary.as_os_str().is_empty() {
            issues.push(ValidationIssue {
                level: ValidationLevel::Error,
                code: "revup.binary.empty",
                message: "revup binary path must not be empty".to_string(),
            });
        }

        if self.git_binary.as_os_str().is_empty() {
            issues.push(ValidationIssue {
                level: ValidationLevel::Error,
                code: "git.binary.empty",
                message: "git binary path must not be empty".to_string(),
            });
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::{Validate, ValidationLevel};
    use crate::config::WatchConfig;
    use std::path::PathBuf;

    #[test]
    fn default_config_validates_clean() {
        assert!(WatchConfig::default().validate().is_empty());
    }

    #[test]
    fn zero_interval_is_an_error() {
        let config = WatchConfig {
            refresh_interval_ms: 0,
            ..WatchConfig::default()
        };
        let issues = config.validate();
        assert!(issues
            .iter()
            .any(|i| i.code == "refresh.interval.zero" && i.level == ValidationLevel::Error));
    }

    #[test]
    fn sub_second_interval_is_a_warning() {
        let config = WatchConfig {
            refresh_interval_ms: 250,
            ..WatchConfig::default()
        };
        let issues = config.validate();
        assert!(issues
            .iter()
            .any(|i| i.code == "refresh.interval.low" && i.level == ValidationLevel::Warning));
    }

    #[test]
    fn empty_binary_paths_are_errors() {
        let config = WatchConfig {
            revup_binary: PathBuf::new(),
            git_binary: PathBuf::new(),
            ..WatchConfig::default()
        };
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.code == "revup.binary.empty"));
        assert!(issues.iter().any(|i| i.code == "git.binary.empty"));
    }
}
