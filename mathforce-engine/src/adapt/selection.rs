//! Question selection for the next session, biased toward the weak topic.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{DifficultyLevel, Grade, Question};

/// Share of a session drawn from the weak topic when one is known.
pub const WEAK_TOPIC_SHARE: f64 = 0.6;

/// Default length of a review list.
pub const REVIEW_LIMIT: usize = 10;

pub const DEFAULT_QUESTION_COUNT: usize = 10;
pub const MAX_QUESTION_COUNT: usize = 30;

/// Raw question difficulties eligible at a selected level.
pub fn allowed_difficulties(level: DifficultyLevel) -> &'static [u8] {
    match level.get() {
        1 => &[1],
        2 => &[1, 2],
        3 => &[2, 3],
        4 => &[3, 4],
        _ => &[4, 5],
    }
}

/// Normalized parameters for building a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub grade: Grade,
    pub difficulty: DifficultyLevel,
    pub count: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            grade: Grade::default(),
            difficulty: DifficultyLevel::default(),
            count: DEFAULT_QUESTION_COUNT,
        }
    }
}

impl SessionSettings {
    /// Clamp requested values into range. Missing or zero values take the
    /// default.
    pub fn normalized(grade: Option<u8>, difficulty: Option<u8>, count: Option<usize>) -> Self {
        let defaults = Self::default();
        Self {
            grade: grade
                .filter(|g| *g > 0)
                .map(Grade::clamped)
                .unwrap_or(defaults.grade),
            difficulty: difficulty
                .filter(|d| *d > 0)
                .map(DifficultyLevel::clamped)
                .unwrap_or(defaults.difficulty),
            count: count
                .filter(|c| *c > 0)
                .map(|c| c.min(MAX_QUESTION_COUNT))
                .unwrap_or(defaults.count),
        }
    }
}

/// Pick up to `count` questions for the given grade and level.
///
/// With a weak topic present in the eligible pool, about 60% of the set
/// comes from that topic and the rest from other topics. Neither side is
/// backfilled from the other, so the result can be shorter than `count`.
/// An empty result means the bank has nothing for this grade and level.
pub fn select_questions<R: Rng + ?Sized>(
    pool: &[Question],
    grade: Grade,
    level: DifficultyLevel,
    count: usize,
    weak_topic: Option<&str>,
    rng: &mut R,
) -> Vec<Question> {
    let allowed = allowed_difficulties(level);
    let eligible: Vec<&Question> = pool
        .iter()
        .filter(|q| q.grade == grade.get() && allowed.contains(&q.difficulty))
        .collect();

    if eligible.is_empty() {
        debug!(%grade, %level, "no eligible questions");
        return Vec::new();
    }

    if let Some(topic) = weak_topic
        && eligible.iter().any(|q| q.topic == topic)
    {
        let (mut weak, mut other): (Vec<&Question>, Vec<&Question>) =
            eligible.into_iter().partition(|q| q.topic == topic);

        let weak_target = ((count as f64) * WEAK_TOPIC_SHARE).round() as usize;
        let weak_take = weak_target.min(weak.len());
        let other_take = (count - weak_take).min(other.len());

        weak.shuffle(rng);
        other.shuffle(rng);

        let mut selected: Vec<Question> = weak
            .into_iter()
            .take(weak_take)
            .chain(other.into_iter().take(other_take))
            .cloned()
            .collect();
        selected.shuffle(rng);

        debug!(topic, weak = weak_take, other = other_take, "selected with weak-topic bias");
        return selected;
    }

    let mut eligible = eligible;
    eligible.shuffle(rng);
    eligible.into_iter().take(count).cloned().collect()
}

/// Questions of the weak topic across the whole bank, in bank order.
pub fn review_questions(pool: &[Question], weak_topic: &str, limit: usize) -> Vec<Question> {
    pool.iter()
        .filter(|q| q.topic == weak_topic)
        .take(limit)
        .cloned()
        .collect()
}
