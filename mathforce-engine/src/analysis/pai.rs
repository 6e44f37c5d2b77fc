//! Performance-Pressure Index (PAI).
//!
//! PAI blends three 0-100 terms into one rounded score:
//!
//! | Term | Formula | Weight |
//! |------|---------|--------|
//! | Accuracy (A) | `100 · correct / total` | 0.5 |
//! | Speed (T) | `100 · budget / time_used`, capped at 100 | 0.3 |
//! | Consistency (S) | `100 · max_streak / total` | 0.2 |
//!
//! Finishing under the standard budget never earns more than full speed
//! credit; going over degrades the speed term proportionally.

use serde::{Deserialize, Serialize};

use crate::session::SessionAggregate;

/// Standard time budget for a full session, in seconds.
pub const STANDARD_TIME_SECONDS: f64 = 180.0;

const ACCURACY_WEIGHT: f64 = 0.5;
const SPEED_WEIGHT: f64 = 0.3;
const CONSISTENCY_WEIGHT: f64 = 0.2;
const SPEED_CEILING: f64 = 100.0;

/// The three PAI terms and the final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaiBreakdown {
    pub accuracy: f64,
    pub speed: f64,
    pub consistency: f64,
    pub score: u8,
}

/// PAI of a finished session.
///
/// `None` when the session has no questions, or its total time is missing or
/// not positive (unmeasurable, not infinitely fast).
pub fn compute(aggregate: &SessionAggregate) -> Option<u8> {
    breakdown(aggregate).map(|b| b.score)
}

/// Full PAI breakdown of a finished session.
pub fn breakdown(aggregate: &SessionAggregate) -> Option<PaiBreakdown> {
    let time_used = aggregate.total_time_used_seconds?;
    score_terms(aggregate, time_used)
}

/// In-progress PAI using elapsed time so far in place of the total.
///
/// Elapsed time is floored to whole seconds and never below one second.
pub fn live_preview(aggregate: &SessionAggregate, elapsed_seconds: f64) -> Option<u8> {
    let elapsed = elapsed_seconds.floor().max(1.0);
    score_terms(aggregate, elapsed).map(|b| b.score)
}

fn score_terms(aggregate: &SessionAggregate, time_used: f64) -> Option<PaiBreakdown> {
    if aggregate.total_questions == 0 || !(time_used > 0.0) {
        return None;
    }

    let total = f64::from(aggregate.total_questions);
    let accuracy = 100.0 * f64::from(aggregate.correct_count) / total;
    let speed = (100.0 * STANDARD_TIME_SECONDS / time_used).min(SPEED_CEILING);
    let consistency = 100.0 * f64::from(aggregate.max_streak) / total;

    let raw = ACCURACY_WEIGHT * accuracy + SPEED_WEIGHT * speed + CONSISTENCY_WEIGHT * consistency;
    let score = raw.round().clamp(0.0, 100.0) as u8;

    Some(PaiBreakdown {
        accuracy,
        speed,
        consistency,
        score,
    })
}
