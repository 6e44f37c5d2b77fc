//! Per-session aggregates built from answered questions.

use serde::{Deserialize, Serialize};

use crate::types::{DifficultyLevel, Grade};

/// One resolved question: answered, or missed on timeout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionEvent {
    pub topic_id: String,
    pub is_correct: bool,
    pub elapsed_seconds: f64,
}

impl QuestionEvent {
    pub fn new(topic_id: impl Into<String>, is_correct: bool, elapsed_seconds: f64) -> Self {
        Self {
            topic_id: topic_id.into(),
            is_correct,
            elapsed_seconds: elapsed_seconds.max(0.0),
        }
    }

    /// A timeout with no selected answer.
    pub fn miss(topic_id: impl Into<String>, elapsed_seconds: f64) -> Self {
        Self::new(topic_id, false, elapsed_seconds)
    }
}

/// Running totals for one quiz session.
///
/// Field names serialize in the camelCase layout the result view reads, so
/// a stored aggregate doubles as the "last session" record. Every list field
/// defaults to empty so partially written records still load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionAggregate {
    pub total_questions: u32,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub max_streak: u32,
    pub question_times: Vec<f64>,
    pub answer_history: Vec<bool>,
    pub wrong_topics: Vec<String>,
    /// Seconds the whole session took; `None` until finalized.
    #[serde(rename = "totalTimeUsed", skip_serializing_if = "Option::is_none")]
    pub total_time_used_seconds: Option<f64>,
    pub difficulty: DifficultyLevel,
    pub grade: Grade,
}

impl SessionAggregate {
    pub fn new(grade: Grade, difficulty: DifficultyLevel) -> Self {
        Self {
            grade,
            difficulty,
            ..Default::default()
        }
    }

    /// Accuracy as a rounded integer percentage; 0 for an empty session.
    pub fn accuracy(&self) -> u8 {
        if self.total_questions == 0 {
            return 0;
        }
        (self.raw_accuracy()).round() as u8
    }

    /// Unrounded accuracy percentage; 0.0 for an empty session.
    pub fn raw_accuracy(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        100.0 * f64::from(self.correct_count) / f64::from(self.total_questions)
    }

    /// Mean seconds per question, if any question was timed.
    pub fn mean_time(&self) -> Option<f64> {
        if self.question_times.is_empty() {
            return None;
        }
        Some(self.question_times.iter().sum::<f64>() / self.question_times.len() as f64)
    }

    /// Whether a total session time has been recorded.
    pub fn is_finalized(&self) -> bool {
        self.total_time_used_seconds.is_some()
    }

    /// Check the counting invariants between the totals and the sequences.
    pub fn is_consistent(&self) -> bool {
        let total = self.total_questions as usize;
        self.correct_count + self.wrong_count == self.total_questions
            && self.max_streak <= self.total_questions
            && self.question_times.len() == total
            && self.answer_history.len() == total
    }
}
