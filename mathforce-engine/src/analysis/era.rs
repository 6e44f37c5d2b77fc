//! ERA: heuristic root-cause classification of a session.
//!
//! Rules are independent and may co-fire. They are evaluated in a fixed
//! order, and that order is the order of the emitted tags:
//!
//! | # | Tag | Fires when |
//! |---|-----|-----------|
//! | 1 | Careless mistakes | mean time < 5 s and at least one wrong answer |
//! | 2 | Concept misunderstanding | mean time > 20 s and at least one wrong answer |
//! | 3 | Knowledge gap detected | three or more wrong answers in a row |
//! | 4 | Pressure instability | accuracy > 80% and time range > mean time |
//! | 5 | Pressure instability detected | accuracy > 80% and time std-dev > 10 s |
//!
//! Rules 4 and 5 measure the same signal two ways and both are kept;
//! consumers match on the substring "pressure instability".
//!
//! Accuracy here is the rounded integer percentage that gets stored with
//! the session.

use serde::{Deserialize, Serialize};

use super::metrics::{HIGH_ACCURACY_THRESHOLD, PRESSURE_STDDEV_THRESHOLD, TimingMetrics};
use crate::session::SessionAggregate;

/// Stored ERA summary when no rule fires.
pub const STABLE_SUMMARY: &str = "Stable performance";

/// Sentinel for an empty tag list in live/result displays.
pub const STABLE_SENTINEL: &str = "stable";

/// Separator between messages in a stored summary.
pub const SUMMARY_SEPARATOR: &str = " | ";

/// Substring shared by both instability tags.
pub const PRESSURE_INSTABILITY_MARKER: &str = "pressure instability";

const CARELESS_MEAN_SECONDS: f64 = 5.0;
const CONCEPT_MEAN_SECONDS: f64 = 20.0;
const KNOWLEDGE_GAP_STREAK: u32 = 3;

/// Display language for ERA text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Kk,
}

/// A diagnostic label produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EraTag {
    CarelessMistakes,
    ConceptMisunderstanding,
    KnowledgeGap,
    PressureInstability,
    PressureInstabilityDetected,
}

impl EraTag {
    /// Every tag in rule-evaluation order.
    pub const ALL: [EraTag; 5] = [
        EraTag::CarelessMistakes,
        EraTag::ConceptMisunderstanding,
        EraTag::KnowledgeGap,
        EraTag::PressureInstability,
        EraTag::PressureInstabilityDetected,
    ];

    /// Stable English label; downstream matching keys off these.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CarelessMistakes => "Careless mistakes",
            Self::ConceptMisunderstanding => "Concept misunderstanding",
            Self::KnowledgeGap => "Knowledge gap detected",
            Self::PressureInstability => "Pressure instability",
            Self::PressureInstabilityDetected => "Pressure instability detected",
        }
    }

    /// Student-facing explanation, without the label.
    pub fn detail(&self, locale: Locale) -> Option<&'static str> {
        match (self, locale) {
            (Self::CarelessMistakes, Locale::Kk) => {
                Some("жауаптар өте тез берілген, бірақ қателер бар.")
            }
            (Self::CarelessMistakes, Locale::En) => {
                Some("answers were given very quickly, but there are mistakes.")
            }
            (Self::ConceptMisunderstanding, Locale::Kk) => {
                Some("сұрақтарға көп уақыт жұмсалған, бірақ қателер кездеседі.")
            }
            (Self::ConceptMisunderstanding, Locale::En) => {
                Some("a lot of time was spent on questions, yet mistakes occur.")
            }
            (Self::KnowledgeGap, Locale::Kk) => Some("қатарынан кем дегенде үш қате жауап."),
            (Self::KnowledgeGap, Locale::En) => Some("at least three wrong answers in a row."),
            (Self::PressureInstability, Locale::Kk) => {
                Some("дәлдік жоғары, бірақ уақыт бойынша тұрақсыздық байқалады.")
            }
            (Self::PressureInstability, Locale::En) => {
                Some("accuracy is high, but timing is unstable.")
            }
            (Self::PressureInstabilityDetected, _) => None,
        }
    }

    /// `label: detail` in the given locale, or the bare label.
    pub fn message(&self, locale: Locale) -> String {
        match self.detail(locale) {
            Some(detail) => format!("{}: {}", self.label(), detail),
            None => self.label().to_string(),
        }
    }

    /// Whether this tag belongs to the pressure-instability family.
    pub fn is_pressure_instability(&self) -> bool {
        matches!(self, Self::PressureInstability | Self::PressureInstabilityDetected)
    }

    /// Match one stored message segment back to its tag.
    fn matches_segment(&self, segment: &str) -> bool {
        let segment = segment.trim().to_lowercase();
        let label = self.label().to_lowercase();
        segment == label || segment.starts_with(&format!("{label}:"))
    }
}

impl std::fmt::Display for EraTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Inputs every rule reads.
struct RuleInput {
    metrics: TimingMetrics,
    wrong_count: u32,
    accuracy: f64,
}

type Rule = fn(&RuleInput) -> bool;

/// Ordered rule table; order here is emission order.
const RULES: [(EraTag, Rule); 5] = [
    (EraTag::CarelessMistakes, |i| {
        i.metrics.mean_time.is_some_and(|m| m < CARELESS_MEAN_SECONDS) && i.wrong_count > 0
    }),
    (EraTag::ConceptMisunderstanding, |i| {
        i.metrics.mean_time.is_some_and(|m| m > CONCEPT_MEAN_SECONDS) && i.wrong_count > 0
    }),
    (EraTag::KnowledgeGap, |i| {
        i.metrics.longest_wrong_streak >= KNOWLEDGE_GAP_STREAK
    }),
    (EraTag::PressureInstability, |i| {
        i.accuracy > HIGH_ACCURACY_THRESHOLD && i.metrics.high_variance
    }),
    (EraTag::PressureInstabilityDetected, |i| {
        i.accuracy > HIGH_ACCURACY_THRESHOLD
            && i.metrics.std_dev.is_some_and(|sd| sd > PRESSURE_STDDEV_THRESHOLD)
    }),
];

/// Classify a session into zero or more ERA tags, in rule order.
pub fn classify(aggregate: &SessionAggregate) -> Vec<EraTag> {
    let input = RuleInput {
        metrics: TimingMetrics::from_aggregate(aggregate),
        wrong_count: aggregate.wrong_count,
        accuracy: f64::from(aggregate.accuracy()),
    };

    RULES
        .iter()
        .filter(|(_, rule)| rule(&input))
        .map(|(tag, _)| *tag)
        .collect()
}

/// Join tags for storage, or [`STABLE_SUMMARY`] when there are none.
///
/// Stored messages carry the Kazakh detail text so existing ledgers keep
/// their format.
pub fn summarize(tags: &[EraTag]) -> String {
    if tags.is_empty() {
        return STABLE_SUMMARY.to_string();
    }
    tags.iter()
        .map(|t| t.message(Locale::Kk))
        .collect::<Vec<_>>()
        .join(SUMMARY_SEPARATOR)
}

/// Recover tags from a stored summary. Unknown segments are skipped.
pub fn parse_summary(summary: &str) -> Vec<EraTag> {
    summary
        .split(SUMMARY_SEPARATOR.trim())
        .filter_map(|segment| EraTag::ALL.into_iter().find(|t| t.matches_segment(segment)))
        .collect()
}

/// Whether a stored summary flags pressure instability (case-insensitive).
pub fn has_pressure_instability(summary: &str) -> bool {
    summary.to_lowercase().contains(PRESSURE_INSTABILITY_MARKER)
}

/// Text shown in place of an empty tag list during or right after a session.
pub fn empty_display_text(locale: Locale) -> &'static str {
    match locale {
        Locale::En => STABLE_SENTINEL,
        Locale::Kk => "Тұрақты орындау, айқын ERA ескертулері жоқ.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(times: &[f64], history: &[bool]) -> SessionAggregate {
        let correct = history.iter().filter(|c| **c).count() as u32;
        let total = history.len() as u32;
        SessionAggregate {
            total_questions: total,
            correct_count: correct,
            wrong_count: total - correct,
            question_times: times.to_vec(),
            answer_history: history.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn test_fast_with_errors_is_careless() {
        let tags = classify(&session(&[3.0, 4.0, 3.0], &[true, false, false]));
        assert!(tags.contains(&EraTag::CarelessMistakes));
        assert!(!tags.iter().any(EraTag::is_pressure_instability));
    }

    #[test]
    fn test_slow_with_errors_is_concept_misunderstanding() {
        let tags = classify(&session(&[25.0, 30.0, 22.0], &[true, false, true]));
        assert_eq!(tags, vec![EraTag::ConceptMisunderstanding]);
    }

    #[test]
    fn test_three_wrong_in_a_row_is_knowledge_gap() {
        let tags = classify(&session(
            &[10.0, 10.0, 10.0, 10.0, 10.0],
            &[true, false, false, false, true],
        ));
        assert_eq!(tags, vec![EraTag::KnowledgeGap]);
    }

    #[test]
    fn test_fast_without_errors_fires_nothing() {
        assert!(classify(&session(&[2.0, 2.0, 2.0], &[true, true, true])).is_empty());
    }

    #[test]
    fn test_both_instability_rules_fire_in_order() {
        let history = vec![true; 10];
        let times = [2.0, 3.0, 45.0, 2.0, 3.0, 4.0, 2.0, 3.0, 40.0, 2.0];
        let tags = classify(&session(&times, &history));
        assert_eq!(
            tags,
            vec![EraTag::PressureInstability, EraTag::PressureInstabilityDetected]
        );
    }

    #[test]
    fn test_instability_needs_accuracy_above_80() {
        // 8/10 correct rounds to exactly 80
        let history = [true, true, true, true, false, true, true, true, false, true];
        let times = [2.0, 3.0, 45.0, 2.0, 3.0, 4.0, 2.0, 3.0, 40.0, 2.0];
        let tags = classify(&session(&times, &history));
        assert!(!tags.iter().any(EraTag::is_pressure_instability));
    }

    #[test]
    fn test_rules_co_fire_in_fixed_order() {
        let tags = classify(&session(&[1.0, 1.0, 1.0, 1.0], &[false, false, false, true]));
        assert_eq!(tags, vec![EraTag::CarelessMistakes, EraTag::KnowledgeGap]);
    }

    #[test]
    fn test_empty_session_is_stable() {
        assert!(classify(&SessionAggregate::default()).is_empty());
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), STABLE_SUMMARY);
    }

    #[test]
    fn test_summarize_joins_messages() {
        let summary = summarize(&[EraTag::CarelessMistakes, EraTag::PressureInstabilityDetected]);
        assert!(summary.starts_with("Careless mistakes: "));
        assert!(summary.ends_with(" | Pressure instability detected"));
    }

    #[test]
    fn test_parse_summary_recovers_tags() {
        let tags = vec![
            EraTag::ConceptMisunderstanding,
            EraTag::KnowledgeGap,
            EraTag::PressureInstability,
            EraTag::PressureInstabilityDetected,
        ];
        assert_eq!(parse_summary(&summarize(&tags)), tags);
        assert!(parse_summary(STABLE_SUMMARY).is_empty());
    }

    #[test]
    fn test_has_pressure_instability_is_case_insensitive() {
        assert!(has_pressure_instability("x | PRESSURE INSTABILITY detected"));
        assert!(!has_pressure_instability(STABLE_SUMMARY));
    }

    #[test]
    fn test_empty_display_text() {
        assert_eq!(empty_display_text(Locale::En), "stable");
        assert_eq!(
            empty_display_text(Locale::Kk),
            "Тұрақты орындау, айқын ERA ескертулері жоқ."
        );
    }

    #[test]
    fn test_message_without_detail() {
        assert_eq!(
            EraTag::PressureInstabilityDetected.message(Locale::En),
            "Pressure instability detected"
        );
        assert!(EraTag::KnowledgeGap.message(Locale::En).starts_with("Knowledge gap detected: "));
    }
}
