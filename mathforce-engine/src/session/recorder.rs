//! Session recorder: accumulates question events for one timed session.
//!
//! A recording ends exactly once, in one of two ways:
//!
//! 1. **Finished**: the student asks for results after the last question
//! 2. **Timed out**: the countdown reached zero
//!
//! ```text
//! record(event) ──► aggregate updated (streaks, times, wrong topics)
//!        │
//!        ├─ finish(total)          → SessionEndReason::Finished
//!        └─ expire(pending, total) → SessionEndReason::TimedOut
//!                                     (pending answer recorded first)
//! ```
//!
//! Once finalized, every further `record`, `finish` or `expire` call fails
//! with [`EngineError::SessionFinalized`].

use tracing::{debug, info};
use uuid::Uuid;

use super::aggregate::{QuestionEvent, SessionAggregate};
use crate::error::{EngineError, Result};
use crate::types::{DifficultyLevel, Grade};

/// Why a session stopped recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionEndReason {
    /// The student finished explicitly.
    Finished,
    /// The countdown expired.
    TimedOut,
}

impl SessionEndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Finished => "finished",
            Self::TimedOut => "timed_out",
        }
    }
}

impl std::fmt::Display for SessionEndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The question on screen when the countdown expired.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingQuestion {
    pub topic_id: String,
    /// Correctness of the selected-but-unsubmitted option, if any.
    pub selected_correct: Option<bool>,
    /// Seconds spent on this question up to expiry.
    pub elapsed_seconds: f64,
}

impl PendingQuestion {
    fn into_event(self) -> QuestionEvent {
        match self.selected_correct {
            Some(correct) => QuestionEvent::new(self.topic_id, correct, self.elapsed_seconds),
            None => QuestionEvent::miss(self.topic_id, self.elapsed_seconds),
        }
    }
}

/// Records one session's answers into a [`SessionAggregate`].
#[derive(Debug)]
pub struct SessionRecorder {
    id: Uuid,
    aggregate: SessionAggregate,
    current_streak: u32,
    ended: Option<SessionEndReason>,
}

impl SessionRecorder {
    pub fn new(grade: Grade, difficulty: DifficultyLevel) -> Self {
        let id = Uuid::now_v7();
        debug!(session = %id, %grade, %difficulty, "session recording started");
        Self {
            id,
            aggregate: SessionAggregate::new(grade, difficulty),
            current_streak: 0,
            ended: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn is_finalized(&self) -> bool {
        self.ended.is_some()
    }

    pub fn end_reason(&self) -> Option<SessionEndReason> {
        self.ended
    }

    /// The aggregate as recorded so far.
    pub fn snapshot(&self) -> &SessionAggregate {
        &self.aggregate
    }

    /// Record a resolved question.
    pub fn record(&mut self, event: QuestionEvent) -> Result<()> {
        self.ensure_open()?;
        self.apply(event);
        Ok(())
    }

    /// Finalize after an explicit finish.
    pub fn finish(&mut self, total_time_used_seconds: f64) -> Result<SessionAggregate> {
        self.ensure_open()?;
        Ok(self.finalize(SessionEndReason::Finished, total_time_used_seconds))
    }

    /// Finalize after the countdown expired.
    ///
    /// A pending question is recorded first: its selected answer if there is
    /// one, otherwise a miss timed up to expiry.
    pub fn expire(
        &mut self,
        pending: Option<PendingQuestion>,
        total_time_used_seconds: f64,
    ) -> Result<SessionAggregate> {
        self.ensure_open()?;
        if let Some(pending) = pending {
            self.apply(pending.into_event());
        }
        Ok(self.finalize(SessionEndReason::TimedOut, total_time_used_seconds))
    }

    fn ensure_open(&self) -> Result<()> {
        if self.ended.is_some() {
            return Err(EngineError::SessionFinalized(self.id));
        }
        Ok(())
    }

    fn apply(&mut self, event: QuestionEvent) {
        let agg = &mut self.aggregate;
        agg.question_times.push(event.elapsed_seconds);
        agg.answer_history.push(event.is_correct);
        agg.total_questions += 1;

        if event.is_correct {
            agg.correct_count += 1;
            self.current_streak += 1;
            agg.max_streak = agg.max_streak.max(self.current_streak);
        } else {
            agg.wrong_count += 1;
            agg.wrong_topics.push(event.topic_id.clone());
            self.current_streak = 0;
        }

        debug!(
            session = %self.id,
            topic = %event.topic_id,
            correct = event.is_correct,
            elapsed = event.elapsed_seconds,
            "question recorded"
        );
    }

    fn finalize(&mut self, reason: SessionEndReason, total_time_used_seconds: f64) -> SessionAggregate {
        self.aggregate.total_time_used_seconds = Some(total_time_used_seconds.max(0.0));
        self.ended = Some(reason);
        info!(
            session = %self.id,
            %reason,
            questions = self.aggregate.total_questions,
            correct = self.aggregate.correct_count,
            "session finalized"
        );
        self.aggregate.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> SessionRecorder {
        SessionRecorder::new(Grade::clamped(9), DifficultyLevel::clamped(3))
    }

    #[test]
    fn test_streaks_and_counts() {
        let mut rec = recorder();
        for correct in [true, true, false, true, true, true] {
            rec.record(QuestionEvent::new("algebra", correct, 4.0)).unwrap();
        }

        let agg = rec.snapshot();
        assert_eq!(agg.total_questions, 6);
        assert_eq!(agg.correct_count, 5);
        assert_eq!(agg.wrong_count, 1);
        assert_eq!(agg.max_streak, 3);
        assert_eq!(rec.current_streak(), 3);
        assert!(agg.is_consistent());
    }

    #[test]
    fn test_wrong_answers_collect_topics() {
        let mut rec = recorder();
        rec.record(QuestionEvent::new("trig", false, 6.0)).unwrap();
        rec.record(QuestionEvent::new("logs", true, 6.0)).unwrap();
        rec.record(QuestionEvent::new("trig", false, 6.0)).unwrap();

        assert_eq!(rec.snapshot().wrong_topics, vec!["trig", "trig"]);
    }

    #[test]
    fn test_finish_sets_total_time_once() {
        let mut rec = recorder();
        rec.record(QuestionEvent::new("algebra", true, 3.0)).unwrap();

        let agg = rec.finish(95.0).unwrap();
        assert_eq!(agg.total_time_used_seconds, Some(95.0));
        assert_eq!(rec.end_reason(), Some(SessionEndReason::Finished));

        assert!(matches!(rec.finish(100.0), Err(EngineError::SessionFinalized(_))));
        assert!(matches!(rec.expire(None, 180.0), Err(EngineError::SessionFinalized(_))));
        assert!(rec.record(QuestionEvent::new("algebra", true, 1.0)).is_err());
        assert_eq!(rec.snapshot().total_time_used_seconds, Some(95.0));
    }

    #[test]
    fn test_expire_records_selected_answer() {
        let mut rec = recorder();
        let pending = PendingQuestion {
            topic_id: "geometry".into(),
            selected_correct: Some(true),
            elapsed_seconds: 12.0,
        };

        let agg = rec.expire(Some(pending), 180.0).unwrap();
        assert_eq!(agg.total_questions, 1);
        assert_eq!(agg.correct_count, 1);
        assert_eq!(agg.question_times, vec![12.0]);
        assert_eq!(rec.end_reason(), Some(SessionEndReason::TimedOut));
    }

    #[test]
    fn test_expire_without_selection_records_miss() {
        let mut rec = recorder();
        rec.record(QuestionEvent::new("geometry", true, 5.0)).unwrap();
        let pending = PendingQuestion {
            topic_id: "probability".into(),
            selected_correct: None,
            elapsed_seconds: 17.0,
        };

        let agg = rec.expire(Some(pending), 180.0).unwrap();
        assert_eq!(agg.total_questions, 2);
        assert_eq!(agg.wrong_count, 1);
        assert_eq!(agg.wrong_topics, vec!["probability"]);
        assert_eq!(agg.answer_history, vec![true, false]);
        assert_eq!(agg.question_times, vec![5.0, 17.0]);
        assert_eq!(rec.current_streak(), 0);
    }

    #[test]
    fn test_expire_after_submission_records_nothing_extra() {
        let mut rec = recorder();
        rec.record(QuestionEvent::new("geometry", false, 5.0)).unwrap();
        let agg = rec.expire(None, 180.0).unwrap();
        assert_eq!(agg.total_questions, 1);
    }

    #[test]
    fn test_end_reason_display() {
        assert_eq!(SessionEndReason::Finished.to_string(), "finished");
        assert_eq!(SessionEndReason::TimedOut.to_string(), "timed_out");
    }
}
