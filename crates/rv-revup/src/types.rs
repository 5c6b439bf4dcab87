use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Topic list as reported by one `revup toolkit list-topics` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSnapshot {
    pub captured_at: DateTime<Utc>,
    pub topics: Vec<String>,
}

/// Parse line-oriented topic output: split on newlines, trim each line,
/// drop empty lines, collapse duplicates keeping first-seen order.
pub fn parse_topic_list(stdout: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut topics = Vec::new();
    for line in stdout.split('\n') {
        let topic = line.trim();
        if topic.is_empty() {
            continue;
        }
        if seen.insert(topic.to_string()) {
            topics.push(topic.to_string());
        }
    }
    topics
}

#[cfg(test)]
mod tests {
    use super::{parse_topic_list, TopicSnapshot};
    use chrono::{TimeZone, Utc};

    #[test]
    fn parse_drops_blank_lines_and_trims_padding() {
        assert_eq!(
            parse_topic_list("auth\n\n  sessions \n\tbilling\n"),
            vec!["auth", "sessions", "billing"]
        );
    }

    #[test]
    fn parse_collapses_duplicates_keeping_first_seen_order() {
        assert_eq!(parse_topic_list("a\n\nb \n a\n"), vec!["a", "b"]);
    }

    #[test]
    fn parse_of_empty_output_is_empty() {
        assert!(parse_topic_list("").is_empty());
        assert!(parse_topic_list("\n\n \n").is_empty());
    }

    #[test]
    fn snapshot_roundtrips_through_json() {
        let snapshot = TopicSnapshot {
            captured_at: Utc
                .with_ymd_and_hms(2026, 5, 2, 18, 40, 0)
                .single()
                .expect("valid timestamp"),
            topics: vec!["auth".to_string(), "sessions".to_string()],
        };

        let encoded = serde_json::to_string(&snapshot).expect("serialize snapshot");
        let decoded: TopicSnapshot = serde_json::from_str(&encoded).expect("deserialize snapshot");
        assert_eq!(decoded, snapshot);
    }
}
