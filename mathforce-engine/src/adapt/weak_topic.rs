//! Weak-topic derivation and the per-grade marker.

use serde::{Deserialize, Serialize};

use crate::types::Grade;

/// The topic to reinforce next time, tied to the grade it was seen in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeakTopicMarker {
    pub grade: Grade,
    pub topic: String,
}

impl WeakTopicMarker {
    pub fn new(grade: Grade, topic: impl Into<String>) -> Self {
        Self {
            grade,
            topic: topic.into(),
        }
    }

    /// The topic, if this marker applies to `grade`.
    pub fn topic_for(&self, grade: Grade) -> Option<&str> {
        (self.grade == grade).then_some(self.topic.as_str())
    }
}

/// Most frequently missed topic. Ties go to the topic missed first.
pub fn weak_topic(wrong_topics: &[String]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for topic in wrong_topics {
        match counts.iter_mut().find(|(t, _)| *t == topic.as_str()) {
            Some((_, n)) => *n += 1,
            None => counts.push((topic.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (topic, n) in counts {
        if best.is_none_or(|(_, top)| n > top) {
            best = Some((topic, n));
        }
    }
    best.map(|(topic, _)| topic.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_most_missed_topic_wins() {
        let wrong = topics(&["algebra", "fractions", "fractions", "algebra", "fractions"]);
        assert_eq!(weak_topic(&wrong).as_deref(), Some("fractions"));
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let wrong = topics(&["geometry", "algebra", "algebra", "geometry"]);
        assert_eq!(weak_topic(&wrong).as_deref(), Some("geometry"));
    }

    #[test]
    fn test_no_wrong_topics() {
        assert_eq!(weak_topic(&[]), None);
    }

    #[test]
    fn test_marker_applies_only_to_its_grade() {
        let marker = WeakTopicMarker::new(Grade::clamped(7), "fractions");
        assert_eq!(marker.topic_for(Grade::clamped(7)), Some("fractions"));
        assert_eq!(marker.topic_for(Grade::clamped(8)), None);
    }

    #[test]
    fn test_marker_json_shape() {
        let marker = WeakTopicMarker::new(Grade::clamped(9), "ratios");
        let json = serde_json::to_string(&marker).unwrap();
        assert_eq!(json, r#"{"grade":9,"topic":"ratios"}"#);
    }
}
